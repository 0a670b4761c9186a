//! Error types for Hanzo Validate
//!
//! Validation failures are never errors: they are reported through
//! [`ValidationResult`](crate::types::ValidationResult). These errors cover
//! the surfaces around the validation loop (parsing schemas and records
//! from JSON, loading configuration).

use thiserror::Error;

/// Result type alias for fallible validator operations
pub type Result<T> = std::result::Result<T, ValidateError>;

/// Validator error types
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Schema document has the wrong shape
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Input document is not a keyed record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// TOML configuration parse error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
