//! Error types for schema and configuration validation.

use thiserror::Error;

/// Errors raised while validating the field mapping or the pipeline configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A source or canonical field name is empty.
    #[error("field mapping entry {index} has an empty {side} name")]
    EmptyFieldName { index: usize, side: &'static str },

    /// Two mapping entries read the same source column.
    #[error("source column '{name}' is mapped more than once")]
    DuplicateSourceField { name: String },

    /// Two mapping entries produce the same canonical field.
    #[error("canonical field '{name}' is produced more than once")]
    DuplicateCanonicalField { name: String },

    /// Range bounds leave no admissible value.
    #[error("invalid bounds: lower {lower} must be below upper {upper}")]
    InvalidBounds { lower: f64, upper: f64 },

    /// A required configuration value is missing.
    #[error("missing configuration value: {0}")]
    MissingValue(&'static str),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::DuplicateSourceField {
            name: "id_mutation".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "source column 'id_mutation' is mapped more than once"
        );
    }
}
