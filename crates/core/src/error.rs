//! Errors reported by the host ports.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure raised by persistence, unit conversion, shipment operations or
/// wizard sessions. The sales rules pass these through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced record does not exist.
    #[error("{0} does not exist")]
    NotFound(String),

    /// Input rejected, e.g. units from different categories.
    #[error("invalid value: {0}")]
    Validation(String),

    #[error("malformed id: {0}")]
    InvalidId(String),

    /// A record was not in a state that allows the requested change.
    #[error("not allowed: {0}")]
    InvariantViolation(String),

    /// The store could not serve the request (poisoned lock).
    #[error("store conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Stable machine-readable code, used as the `error` field of API responses.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::InvariantViolation(_) => "invariant_violation",
            DomainError::Conflict(_) => "conflict",
        }
    }
}
