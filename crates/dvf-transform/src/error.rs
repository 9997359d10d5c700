//! Error types for the table stages.

use thiserror::Error;

/// Errors raised by the transform stages.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A field the stage operates on is absent from the table.
    #[error("field '{field}' not found in table ({stage})")]
    FieldNotFound { field: String, stage: &'static str },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
