//! Error types for the load step.

use std::path::PathBuf;

use dvf_model::ModelError;
use thiserror::Error;

/// Errors that can occur while importing the transformed file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file to import does not exist.
    #[error("file to import not found: {path}")]
    NotFound { path: PathBuf },

    /// The import tool could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The import tool exited unsuccessfully.
    #[error("{program} exited with {}", describe_status(.status))]
    ToolFailed { program: String, status: Option<i32> },

    /// The imported file could not be removed.
    #[error("failed to remove imported file {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target database or collection missing from the configuration.
    #[error(transparent)]
    Config(#[from] ModelError),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failed_display() {
        let err = LoadError::ToolFailed {
            program: "mongoimport".to_string(),
            status: Some(1),
        };
        assert_eq!(err.to_string(), "mongoimport exited with status 1");

        let err = LoadError::ToolFailed {
            program: "mongoimport".to_string(),
            status: None,
        };
        assert_eq!(err.to_string(), "mongoimport exited with a signal");
    }
}
