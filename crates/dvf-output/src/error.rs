//! Error types for output generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing the transformed table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The destination could not be created or written.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

impl OutputError {
    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
