//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Sender identifier is empty or malformed
    #[error("Invalid sender id: {0}")]
    InvalidSenderId(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
