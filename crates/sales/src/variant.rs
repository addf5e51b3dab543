//! The two rule sets revocation has been deployed with.
//!
//! They disagree on which shipment states block a revoke, on which moves are
//! handed to exception handling, and on which moves (and lines) a pending
//! order is built from. Both are kept as-is behind [`RevokeVariant`].

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sale_revoke_core::DomainError;
use sale_revoke_inventory::{Move, MoveState, ShipmentState};

use crate::order::{LineType, SaleLine, SaleOrder};
use crate::pending::PendingQuantities;
use crate::ports::LineCopy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevokeVariant {
    /// Pending orders are built from ignored moves.
    #[default]
    Ignored,
    /// Pending orders are built from recreated moves.
    Recreated,
}

impl RevokeVariant {
    /// Whether a shipment in `state` prevents the order from being revoked.
    pub fn blocks_shipment(self, state: ShipmentState) -> bool {
        match self {
            RevokeVariant::Ignored => !matches!(
                state,
                ShipmentState::Waiting | ShipmentState::Draft | ShipmentState::Done
            ),
            RevokeVariant::Recreated => matches!(
                state,
                ShipmentState::Assigned | ShipmentState::Picked | ShipmentState::Packed
            ),
        }
    }

    /// Line moves handed to exception handling once the shipments are
    /// cancelled. Moves already ignored or recreated are never included.
    pub fn pending_moves(self, sale: &SaleOrder) -> Vec<&Move> {
        let skip = sale.skipped_moves();
        sale.lines
            .iter()
            .flat_map(|l| l.moves.iter())
            .filter(|m| match self {
                RevokeVariant::Ignored => m.state == MoveState::Cancelled,
                RevokeVariant::Recreated => true,
            })
            .filter(|m| !skip.contains(&m.id))
            .collect()
    }

    /// The computed move set a pending order is built from.
    pub fn outstanding_moves(self, sale: &SaleOrder) -> Vec<&Move> {
        match self {
            RevokeVariant::Ignored => sale.ignored_moves(),
            RevokeVariant::Recreated => sale.recreated_moves(),
        }
    }

    /// Copy requests for the lines of a pending order.
    pub fn line_copies(self, lines: &[SaleLine], pending: &PendingQuantities) -> Vec<LineCopy> {
        match self {
            RevokeVariant::Ignored => lines.iter().map(|line| pending.apply(line)).collect(),
            RevokeVariant::Recreated => lines
                .iter()
                .filter(|line| line.line_type == LineType::Line)
                .filter_map(|line| {
                    let product = line.product.as_ref()?;
                    let over = pending.get(product.id)?;
                    (over.quantity > Decimal::ZERO).then(|| LineCopy {
                        source: line.id,
                        quantity: Some(over.quantity),
                        unit: Some(over.unit),
                    })
                })
                .collect(),
        }
    }
}

impl fmt::Display for RevokeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevokeVariant::Ignored => f.write_str("ignored"),
            RevokeVariant::Recreated => f.write_str("recreated"),
        }
    }
}

impl FromStr for RevokeVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignored" => Ok(RevokeVariant::Ignored),
            "recreated" => Ok(RevokeVariant::Recreated),
            other => Err(DomainError::validation(format!(
                "unknown revoke variant '{other}' (expected 'ignored' or 'recreated')"
            ))),
        }
    }
}
