//! Domain error types.
//!
//! These errors represent validation failures on values entering the
//! domain layer. They are distinct from API/IO errors.

use super::InvalidCoordinate;

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Origin or station coordinates outside WGS84 bounds
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Result count must not be negative
    #[error("invalid result count {0}: must not be negative")]
    NegativeCount(i64),
}

impl DomainError {
    /// Convert a signed result count into a `usize`, rejecting negatives.
    pub fn check_count(k: i64) -> Result<usize, DomainError> {
        usize::try_from(k).map_err(|_| DomainError::NegativeCount(k))
    }
}
