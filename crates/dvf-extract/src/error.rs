//! Error types for the extract step.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a yearly export.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The server answered with a non-success status.
    #[error("download of {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Transport failure (DNS, connection, TLS, body read).
    #[error("network error while downloading {url}: {message}")]
    Network { url: String, message: String },

    /// Local file I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive is not valid gzip data.
    #[error("failed to decompress {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for extract operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractError::HttpStatus {
            url: "https://example.org/full.csv.gz".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "download of https://example.org/full.csv.gz failed with status 404"
        );
    }
}
