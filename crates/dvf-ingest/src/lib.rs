//! DVF record loading.
//!
//! Reads a yearly DVF transaction file into a Polars DataFrame holding only
//! the mapped fields, renamed to their canonical names and coerced to their
//! declared types.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dvf_ingest::read_dvf_table;
//!
//! let df = read_dvf_table(Path::new("data/dvf_2021.csv"))?;
//! assert!(df.column("price").is_ok());
//! ```

mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use source::{normalize_header, read_dvf_table, read_mapped_table, resolve_columns};
