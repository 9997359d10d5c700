//! Source CSV reading.

mod coerce;
mod header;
mod reader;

pub use header::{normalize_header, resolve_columns};
pub use reader::{read_dvf_table, read_mapped_table};
