//! Sale order revocation and pending-move regeneration.
//!
//! Business rules layered on top of the sale order model: revoking a
//! confirmed/processing order back to `done` once no shipment activity is in
//! flight, and duplicating orders for the moves that exception handling
//! ignored or recreated. Everything the host system provides (storage,
//! shipment operations, the exception wizard, unit conversion) is reached
//! through the traits in [`ports`].

#[cfg(test)]
mod fixtures;

pub mod error;
pub mod order;
pub mod pending;
pub mod ports;
pub mod revoke;
pub mod variant;

pub use error::{SaleError, SaleResult};
pub use order::{distinct_sale_ids, LineType, SaleButtons, SaleId, SaleLine, SaleLineId, SaleOrder, SaleState};
pub use pending::{ActionResult, CreatePendingMoves, PendingQuantities, QuantityOverride, ViewKind};
pub use ports::{
    HandleExceptionAsk, LineCopy, SaleRepository, SessionId, ShipmentExceptionWizard,
    ShipmentService, UomService,
};
pub use revoke::{MAX_LISTED_NAMES, RevokeConflicts, RevokeService, blocking_names, check_revocable};
pub use variant::RevokeVariant;
