//! Error types for schema document I/O.
//!
//! Parsing and help rendering never fail; only reading and writing schema
//! documents does.

use argv_schema_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading or saving a schema document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The document parsed but its schema is inconsistent.
    #[error("invalid schema: {} validation error(s)", .0.len())]
    InvalidSchema(Vec<ValidationError>),
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
