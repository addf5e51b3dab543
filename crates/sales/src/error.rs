//! Errors raised by the sales rules.

use thiserror::Error;

use sale_revoke_core::DomainError;

pub type SaleResult<T> = Result<T, SaleError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// Revocation blocked by moves or shipments still in progress.
    ///
    /// `names` is the already truncated list (see
    /// [`blocking_names`](crate::revoke::blocking_names)).
    #[error("cannot revoke sale \"{record}\": moves or shipments in progress: {names}")]
    CannotRevoke { record: String, names: String },

    /// Failure reported by a host port, propagated unchanged.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
