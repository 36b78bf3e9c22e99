//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur when reading or mutating a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The input was rejected before reaching the backing store.
    #[error("{}", format_validation(field.as_deref(), message))]
    Validation {
        /// The offending field, when one can be named.
        field: Option<String>,
        /// What was wrong with it.
        message: String,
    },

    /// The requested record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// The kind of record (e.g., "listing", "saved relation").
        resource: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The backing store could not be reached or read.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Description of the transport or I/O failure.
        message: String,
    },
}

fn format_validation(field: Option<&str>, message: &str) -> String {
    match field {
        Some(name) => format!("validation error on {name}: {message}"),
        None => format!("validation error: {message}"),
    }
}

impl StoreError {
    /// Creates a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }

    /// Returns true if this error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            StoreError::Validation { .. } => 1,
            StoreError::NotFound { .. } => 2,
            StoreError::Unavailable { .. } => 3,
        }
    }
}
