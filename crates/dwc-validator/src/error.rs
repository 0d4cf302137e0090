//! Error types for the validator.
//!
//! These cover failures of the run itself. Problems found *in* the data are
//! never errors here; they are reported as issues in a `ValidationReport`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for validator operations.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row does not have one cell per column.
    #[error("Malformed table at row {row}: expected {expected} cells, found {found}")]
    TableShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name.
    #[error("Duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no columns to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;
