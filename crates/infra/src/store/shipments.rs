use sale_revoke_core::{DomainError, DomainResult};
use sale_revoke_inventory::{MoveState, ShipmentId, ShipmentKind, ShipmentState};
use sale_revoke_sales::ShipmentService;

use super::{InMemoryErp, Tables};

impl Tables {
    fn set_move_states(&mut self, shipment: ShipmentId, state: MoveState) {
        let Some(ids) = self.shipments.get(&shipment).map(|s| s.moves.clone()) else {
            return;
        };
        for id in ids {
            if let Some(mv) = self.moves.get_mut(&id) {
                if !matches!(mv.state, MoveState::Done | MoveState::Cancelled) {
                    mv.state = state;
                }
            }
        }
    }

    /// Validate a batch before touching anything.
    fn check_shipments(
        &self,
        ids: &[ShipmentId],
        kind: ShipmentKind,
        allowed: impl Fn(ShipmentState) -> bool,
        action: &str,
    ) -> DomainResult<()> {
        for id in ids {
            let shipment = self
                .shipments
                .get(id)
                .ok_or_else(|| DomainError::not_found(format!("shipment {id}")))?;
            if shipment.kind != kind {
                return Err(DomainError::invariant(format!(
                    "shipment {} is not a {kind:?} shipment",
                    shipment.number
                )));
            }
            if !allowed(shipment.state) {
                return Err(DomainError::invariant(format!(
                    "cannot {action} shipment {} in state {:?}",
                    shipment.number, shipment.state
                )));
            }
        }
        Ok(())
    }
}

impl ShipmentService for InMemoryErp {
    fn draft(&self, ids: &[ShipmentId]) -> DomainResult<()> {
        let mut tables = self.write()?;
        tables.check_shipments(
            ids,
            ShipmentKind::Outbound,
            |s| matches!(s, ShipmentState::Draft | ShipmentState::Waiting),
            "reset to draft",
        )?;

        for id in ids {
            if let Some(shipment) = tables.shipments.get_mut(id) {
                shipment.state = ShipmentState::Draft;
            }
            tables.set_move_states(*id, MoveState::Draft);
        }
        Ok(())
    }

    fn cancel(&self, kind: ShipmentKind, ids: &[ShipmentId]) -> DomainResult<()> {
        let mut tables = self.write()?;
        tables.check_shipments(ids, kind, |s| s != ShipmentState::Done, "cancel")?;

        for id in ids {
            if let Some(shipment) = tables.shipments.get_mut(id) {
                shipment.state = ShipmentState::Cancelled;
            }
            tables.set_move_states(*id, MoveState::Cancelled);
        }
        Ok(())
    }
}
