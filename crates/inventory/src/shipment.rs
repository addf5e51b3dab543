use serde::{Deserialize, Serialize};

use sale_revoke_core::{define_id, Entity};

use crate::moves::Move;

define_id!(
    /// Shipment identifier (outbound and return shipments share the id space).
    ShipmentId
);

/// Direction of a shipment relative to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentKind {
    /// Goods leaving the warehouse for the customer.
    Outbound,
    /// Goods coming back from the customer.
    Return,
}

/// Shipment lifecycle.
///
/// Outbound shipments go draft → waiting → assigned → picked → packed → done;
/// returns go draft → received → done. Both can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentState {
    Draft,
    Waiting,
    Assigned,
    Picked,
    Packed,
    Received,
    Done,
    Cancelled,
}

/// A goods-movement document linked to a sale order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub number: String,
    pub kind: ShipmentKind,
    pub state: ShipmentState,
    /// Inventory moves for outbound shipments, incoming moves for returns.
    pub moves: Vec<Move>,
}

impl Shipment {
    pub fn is_waiting(&self) -> bool {
        self.state == ShipmentState::Waiting
    }

    pub fn is_draft(&self) -> bool {
        self.state == ShipmentState::Draft
    }

    /// Moves still in flight (not cancelled, draft or done).
    pub fn unsettled_moves(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(|m| !m.state.is_settled())
    }
}

impl Entity for Shipment {
    type Id = ShipmentId;

    fn id(&self) -> ShipmentId {
        self.id
    }

    fn rec_name(&self) -> String {
        self.number.clone()
    }
}
