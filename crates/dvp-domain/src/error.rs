//! Domain error types

use thiserror::Error;

/// Errors raised when input violates a domain invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or out-of-range input; nothing was mutated
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
