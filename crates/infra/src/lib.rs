//! Infrastructure layer: in-memory adapters for the sales ports.

pub mod demo;
pub mod store;


pub use demo::{seed_demo, DemoData};
pub use store::{InMemoryErp, LineRecord, MoveRecord, SaleRecord, ShipmentRecord};
