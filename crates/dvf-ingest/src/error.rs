//! Error types for DVF record loading.

use std::path::PathBuf;

use dvf_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading the source table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A column required by the field mapping is absent from the header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A non-empty value could not be coerced to its declared type.
    #[error("malformed {expected} value '{value}' for field '{field}' at {path}:{line}")]
    MalformedInput {
        path: PathBuf,
        line: u64,
        field: String,
        value: String,
        expected: &'static str,
    },

    // === Schema Errors ===
    /// The field mapping itself is inconsistent.
    #[error("invalid field mapping: {0}")]
    Schema(#[from] ModelError),

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Whether the error comes from the content of the source file rather
    /// than from its absence or from the environment.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::CsvParse { .. }
                | Self::EmptyCsv { .. }
                | Self::MissingColumn { .. }
                | Self::MalformedInput { .. }
        )
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
