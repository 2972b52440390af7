//! Custom error types for the petty cash ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Structural problems found while reading a backup document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The payload is not valid JSON
    #[error("file is not valid JSON: {0}")]
    Malformed(String),

    /// The top-level value is not a JSON object
    #[error("backup must be a JSON object")]
    NotAnObject,

    /// A scalar field is missing or not an in-range number
    #[error("field '{field}' must be a number")]
    NotNumeric { field: &'static str },

    /// The transactions field is missing or not an array
    #[error("field 'transactions' must be a list")]
    NotAList,

    /// A transaction entry could not be decoded
    #[error("transaction #{index} is invalid: {reason}")]
    InvalidTransaction { index: usize, reason: String },

    /// Two transaction entries share an id
    #[error("transaction #{index} reuses id '{id}'")]
    DuplicateId { index: usize, id: String },
}

/// The main error type for petty cash operations
#[derive(Error, Debug)]
pub enum PettyCashError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Backup import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A bulk action that the current selection does not permit
    #[error("Action not allowed: {0}")]
    IllegalAction(String),
}

impl PettyCashError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PettyCashError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PettyCashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for petty cash operations
pub type PettyCashResult<T> = Result<T, PettyCashError>;
