//! Stock moves and shipments.
//!
//! Snapshots of the stock documents linked to a sale order, with the state
//! predicates the revoke rules are written against.

pub mod moves;
pub mod shipment;

pub use moves::{Move, MoveId, MoveState};
pub use shipment::{Shipment, ShipmentId, ShipmentKind, ShipmentState};
