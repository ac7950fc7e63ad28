//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These errors represent rejected input and missing records.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Input has the wrong shape or range (duplicate id, short contact, ...)
    #[error("{0}")]
    Validation(String),

    /// Employee identifier is not in the store
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// Any other addressed record that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unparseable JSON, date or number
    #[error("Malformed data: {0}")]
    MalformedData(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a malformed data error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData(message.into())
    }
}
