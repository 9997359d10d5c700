//! Library components of the `dvf-etl` command.

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod progress;

pub use error::{EtlError, FailureKind, StageError};
pub use pipeline::{RunOptions, RunReport, Stage, StageRecord, run_etl, run_transform};
pub use progress::StageProgress;
