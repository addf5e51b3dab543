use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sale_revoke_core::{define_id, Entity};
use sale_revoke_products::{ProductRef, UnitRef};

define_id!(
    /// Stock move identifier.
    MoveId
);

/// Stock move lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    Staging,
    Draft,
    Assigned,
    Done,
    Cancelled,
}

impl MoveState {
    /// `true` for moves that no longer (or not yet) hold stock in flight:
    /// cancelled, draft or done.
    pub fn is_settled(self) -> bool {
        matches!(self, MoveState::Cancelled | MoveState::Draft | MoveState::Done)
    }
}

/// A single quantity movement of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: MoveId,
    pub product: ProductRef,
    pub quantity: Decimal,
    pub unit: UnitRef,
    pub state: MoveState,
}

impl Entity for Move {
    type Id = MoveId;

    fn id(&self) -> MoveId {
        self.id
    }

    fn rec_name(&self) -> String {
        format!(
            "{}{} {}",
            self.quantity.normalize(),
            self.unit.symbol,
            self.product.rec_name()
        )
    }
}
