//! Service error types

use dvp_domain::{ClaimId, DomainError};
use dvp_store::StoreError;
use thiserror::Error;

/// Errors reported by [`ClaimService`](crate::ClaimService) operations
///
/// Every variant means the ledger on disk was left as it was.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed input; rejected before any mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced claim is not in the ledger
    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    /// Another writer changed the ledger during this operation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Reading or writing the ledger failed
    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(message) => ServiceError::Validation(message),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        if e.is_conflict() {
            ServiceError::Conflict(e.to_string())
        } else {
            ServiceError::Storage(e)
        }
    }
}
