//! Revoking confirmed or processing sale orders.
//!
//! ```text
//! load orders ─▶ skip those that cannot go to `done`
//!             ─▶ check every order for moves/shipments in progress (fail = nothing touched)
//!             ─▶ per order: waiting → draft, draft → cancelled
//!                           reload, hand pending moves to the exception wizard
//!             ─▶ write `done`
//! ```

use sale_revoke_core::Entity;
use sale_revoke_inventory::{Move, Shipment, ShipmentId, ShipmentKind};

use crate::error::{SaleError, SaleResult};
use crate::order::{distinct_sale_ids, SaleId, SaleOrder, SaleState};
use crate::ports::{
    HandleExceptionAsk, SaleRepository, SessionId, ShipmentExceptionWizard, ShipmentService,
};
use crate::variant::RevokeVariant;

/// How many blocking records the error message names.
pub const MAX_LISTED_NAMES: usize = 5;

/// Join the first [`MAX_LISTED_NAMES`] names, marking the cut with `...`.
pub fn blocking_names(names: &[String]) -> String {
    let mut joined = names
        .iter()
        .take(MAX_LISTED_NAMES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > MAX_LISTED_NAMES {
        joined.push_str("...");
    }
    joined
}

/// Moves and shipments that prevent an order from being revoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeConflicts<'a> {
    pub moves: Vec<&'a Move>,
    pub shipments: Vec<&'a Shipment>,
}

impl<'a> RevokeConflicts<'a> {
    pub fn find(sale: &'a SaleOrder, variant: RevokeVariant) -> Self {
        let moves = sale
            .all_shipments()
            .flat_map(|s| s.unsettled_moves())
            .collect();
        let shipments = sale
            .all_shipments()
            .filter(|s| variant.blocks_shipment(s.state))
            .collect();
        Self { moves, shipments }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.shipments.is_empty()
    }

    /// Display names, moves first.
    pub fn names(&self) -> Vec<String> {
        self.moves
            .iter()
            .map(|m| m.rec_name())
            .chain(self.shipments.iter().map(|s| s.rec_name()))
            .collect()
    }

    pub fn into_error(self, sale: &SaleOrder) -> SaleError {
        SaleError::CannotRevoke {
            record: sale.rec_name(),
            names: blocking_names(&self.names()),
        }
    }
}

/// Ensure `sale` has nothing in flight.
pub fn check_revocable(sale: &SaleOrder, variant: RevokeVariant) -> SaleResult<()> {
    let conflicts = RevokeConflicts::find(sale, variant);
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(conflicts.into_error(sale))
    }
}

/// Shipment state changes revocation applies to one order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ShipmentPlan {
    to_draft: Vec<ShipmentId>,
    to_cancel: Vec<ShipmentId>,
    returns_to_cancel: Vec<ShipmentId>,
}

impl ShipmentPlan {
    /// Partition on the states as loaded, so a shipment reset to draft here
    /// is not cancelled in the same pass.
    fn for_sale(sale: &SaleOrder) -> Self {
        fn ids(shipments: &[Shipment], pick: fn(&Shipment) -> bool) -> Vec<ShipmentId> {
            shipments.iter().filter(|&s| pick(s)).map(|s| s.id).collect()
        }
        Self {
            to_draft: ids(&sale.shipments, Shipment::is_waiting),
            to_cancel: ids(&sale.shipments, Shipment::is_draft),
            returns_to_cancel: ids(&sale.shipment_returns, Shipment::is_draft),
        }
    }
}

/// A live exception wizard session; deleted when dropped.
struct ExceptionSession<'w, W: ShipmentExceptionWizard> {
    wizard: &'w W,
    id: SessionId,
}

impl<'w, W: ShipmentExceptionWizard> ExceptionSession<'w, W> {
    fn open(wizard: &'w W, active_id: SaleId) -> SaleResult<Self> {
        let id = wizard.create(active_id)?;
        Ok(Self { wizard, id })
    }

    fn handle(&self, ask: HandleExceptionAsk) -> SaleResult<()> {
        self.wizard.configure(self.id, ask)?;
        self.wizard.transition_handle(self.id)?;
        Ok(())
    }
}

impl<W: ShipmentExceptionWizard> Drop for ExceptionSession<'_, W> {
    fn drop(&mut self) {
        if let Err(e) = self.wizard.delete(self.id) {
            tracing::warn!(session = %self.id, "failed to delete exception session: {e}");
        }
    }
}

/// Revocation service.
#[derive(Debug, Clone)]
pub struct RevokeService<R, S, W> {
    repo: R,
    shipments: S,
    wizard: W,
    variant: RevokeVariant,
}

impl<R, S, W> RevokeService<R, S, W>
where
    R: SaleRepository,
    S: ShipmentService,
    W: ShipmentExceptionWizard,
{
    pub fn new(repo: R, shipments: S, wizard: W, variant: RevokeVariant) -> Self {
        Self {
            repo,
            shipments,
            wizard,
            variant,
        }
    }

    pub fn variant(&self) -> RevokeVariant {
        self.variant
    }

    /// Revoke `ids`, returning the orders that were moved to `done`.
    ///
    /// Repeated ids are revoked once. Orders whose state does not allow the
    /// transition are skipped. If any remaining order has moves or shipments
    /// in progress, the whole batch fails before anything is changed.
    ///
    /// A port failure after the check leaves earlier orders of the batch with
    /// their shipments reset but not yet `done`; rolling that back is up to the
    /// transaction the caller runs this in.
    pub fn revoke(&self, ids: &[SaleId]) -> SaleResult<Vec<SaleId>> {
        let sales: Vec<SaleOrder> = self
            .repo
            .get_many(&distinct_sale_ids(ids))?
            .into_iter()
            .filter(|sale| {
                let allowed = sale.state.can_transition_to(SaleState::Done);
                if !allowed {
                    tracing::debug!(sale = %sale.rec_name(), state = ?sale.state, "not revocable in this state; skipping");
                }
                allowed
            })
            .collect();

        for sale in &sales {
            check_revocable(sale, self.variant)?;
        }

        for sale in &sales {
            self.revoke_one(sale)?;
        }

        let revoked: Vec<SaleId> = sales.iter().map(|s| s.id).collect();
        if !revoked.is_empty() {
            self.repo.set_state(&revoked, SaleState::Done)?;
        }
        Ok(revoked)
    }

    fn revoke_one(&self, sale: &SaleOrder) -> SaleResult<()> {
        let plan = ShipmentPlan::for_sale(sale);
        self.shipments.draft(&plan.to_draft)?;
        self.shipments.cancel(ShipmentKind::Outbound, &plan.to_cancel)?;
        self.shipments.cancel(ShipmentKind::Return, &plan.returns_to_cancel)?;

        // Cancelling shipments cancels their moves; read them back.
        let sale = self.repo.get(sale.id)?;
        let pending: Vec<_> = self
            .variant
            .pending_moves(&sale)
            .into_iter()
            .map(|m| m.id)
            .collect();

        tracing::info!(
            sale = %sale.rec_name(),
            drafted = plan.to_draft.len(),
            cancelled = plan.to_cancel.len() + plan.returns_to_cancel.len(),
            pending = pending.len(),
            "revoking sale"
        );

        let session = ExceptionSession::open(&self.wizard, sale.id)?;
        session.handle(HandleExceptionAsk {
            recreate_moves: Vec::new(),
            domain_moves: pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use sale_revoke_inventory::{MoveState, ShipmentState};

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("OUT-{i}")).collect()
    }

    #[test]
    fn blocking_names_lists_up_to_five() {
        assert_eq!(blocking_names(&names(0)), "");
        assert_eq!(blocking_names(&names(2)), "OUT-1, OUT-2");
        assert_eq!(
            blocking_names(&names(5)),
            "OUT-1, OUT-2, OUT-3, OUT-4, OUT-5"
        );
        assert_eq!(
            blocking_names(&names(7)),
            "OUT-1, OUT-2, OUT-3, OUT-4, OUT-5..."
        );
    }

    #[test]
    fn assigned_moves_in_waiting_shipment_block_revoke() {
        let units = Units::new();
        let widget = units.product("Widget");
        let out = shipment(
            "OUT-1",
            ShipmentKind::Outbound,
            ShipmentState::Waiting,
            vec![stock_move(&widget, "3", &units.unit, MoveState::Assigned)],
        );
        let sale = sale_with(SaleState::Confirmed, vec![], vec![out], vec![]);

        let err = check_revocable(&sale, RevokeVariant::Ignored).unwrap_err();
        assert_eq!(
            err,
            SaleError::CannotRevoke {
                record: "SO-1".to_string(),
                names: "3u Widget".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot revoke sale \"SO-1\": moves or shipments in progress: 3u Widget"
        );
    }

    #[test]
    fn return_incoming_moves_are_checked_too() {
        let units = Units::new();
        let widget = units.product("Widget");
        let ret = shipment(
            "RET-1",
            ShipmentKind::Return,
            ShipmentState::Draft,
            vec![stock_move(&widget, "1", &units.unit, MoveState::Staging)],
        );
        let sale = sale_with(SaleState::Processing, vec![], vec![], vec![ret]);

        assert!(check_revocable(&sale, RevokeVariant::Recreated).is_err());
    }

    #[test]
    fn variants_disagree_on_received_returns() {
        let ret = shipment("RET-1", ShipmentKind::Return, ShipmentState::Received, vec![]);
        let sale = sale_with(SaleState::Processing, vec![], vec![], vec![ret]);

        assert!(check_revocable(&sale, RevokeVariant::Ignored).is_err());
        assert!(check_revocable(&sale, RevokeVariant::Recreated).is_ok());
    }

    #[test]
    fn conflicts_name_moves_before_shipments() {
        let units = Units::new();
        let widget = units.product("Widget");
        let packed = shipment(
            "OUT-9",
            ShipmentKind::Outbound,
            ShipmentState::Packed,
            vec![stock_move(&widget, "2", &units.unit, MoveState::Assigned)],
        );
        let sale = sale_with(SaleState::Processing, vec![], vec![packed], vec![]);

        let conflicts = RevokeConflicts::find(&sale, RevokeVariant::Recreated);
        assert_eq!(conflicts.names(), vec!["2u Widget".to_string(), "OUT-9".to_string()]);
    }

    #[test]
    fn settled_shipments_do_not_block() {
        let units = Units::new();
        let widget = units.product("Widget");
        let sale = sale_with(
            SaleState::Processing,
            vec![],
            vec![
                shipment("OUT-1", ShipmentKind::Outbound, ShipmentState::Waiting, vec![
                    stock_move(&widget, "1", &units.unit, MoveState::Draft),
                ]),
                shipment("OUT-2", ShipmentKind::Outbound, ShipmentState::Done, vec![
                    stock_move(&widget, "1", &units.unit, MoveState::Done),
                ]),
            ],
            vec![shipment("RET-1", ShipmentKind::Return, ShipmentState::Draft, vec![
                stock_move(&widget, "1", &units.unit, MoveState::Cancelled),
            ])],
        );

        for variant in [RevokeVariant::Ignored, RevokeVariant::Recreated] {
            assert!(check_revocable(&sale, variant).is_ok(), "{variant}");
        }
    }

    #[test]
    fn shipment_plan_partitions_on_loaded_states() {
        let waiting = shipment("OUT-1", ShipmentKind::Outbound, ShipmentState::Waiting, vec![]);
        let draft = shipment("OUT-2", ShipmentKind::Outbound, ShipmentState::Draft, vec![]);
        let done = shipment("OUT-3", ShipmentKind::Outbound, ShipmentState::Done, vec![]);
        let ret = shipment("RET-1", ShipmentKind::Return, ShipmentState::Draft, vec![]);
        let sale = sale_with(
            SaleState::Processing,
            vec![],
            vec![waiting.clone(), draft.clone(), done],
            vec![ret.clone()],
        );

        let plan = ShipmentPlan::for_sale(&sale);
        assert_eq!(plan.to_draft, vec![waiting.id]);
        assert_eq!(plan.to_cancel, vec![draft.id]);
        assert_eq!(plan.returns_to_cancel, vec![ret.id]);
    }

    mod session_cleanup {
        use std::sync::Mutex;

        use sale_revoke_core::{DomainError, DomainResult};

        use super::*;
        use crate::ports::LineCopy;
        use crate::order::SaleLineId;

        /// Repository holding a single order; records state writes.
        struct OneSale {
            sale: SaleOrder,
            written: Mutex<Vec<SaleState>>,
        }

        impl SaleRepository for OneSale {
            fn get(&self, id: SaleId) -> DomainResult<SaleOrder> {
                if id == self.sale.id {
                    Ok(self.sale.clone())
                } else {
                    Err(DomainError::not_found(format!("sale {id}")))
                }
            }

            fn set_state(&self, _ids: &[SaleId], state: SaleState) -> DomainResult<()> {
                self.written.lock().unwrap().push(state);
                Ok(())
            }

            fn copy(&self, _id: SaleId) -> DomainResult<SaleId> {
                Err(DomainError::invariant("copy is not expected here"))
            }

            fn copy_lines(&self, _target: SaleId, _lines: &[LineCopy]) -> DomainResult<Vec<SaleLineId>> {
                Err(DomainError::invariant("copy_lines is not expected here"))
            }
        }

        struct AcceptAll;

        impl ShipmentService for AcceptAll {
            fn draft(&self, _ids: &[ShipmentId]) -> DomainResult<()> {
                Ok(())
            }

            fn cancel(&self, _kind: ShipmentKind, _ids: &[ShipmentId]) -> DomainResult<()> {
                Ok(())
            }
        }

        #[derive(Default)]
        struct ScriptedWizard {
            fail_handle: bool,
            fail_delete: bool,
            created: Mutex<Vec<SessionId>>,
            deleted: Mutex<Vec<SessionId>>,
        }

        impl ShipmentExceptionWizard for ScriptedWizard {
            fn create(&self, _active_id: SaleId) -> DomainResult<SessionId> {
                let id = SessionId::new();
                self.created.lock().unwrap().push(id);
                Ok(id)
            }

            fn configure(&self, _session: SessionId, _ask: HandleExceptionAsk) -> DomainResult<()> {
                Ok(())
            }

            fn transition_handle(&self, _session: SessionId) -> DomainResult<()> {
                if self.fail_handle {
                    Err(DomainError::conflict("handle step failed"))
                } else {
                    Ok(())
                }
            }

            fn delete(&self, session: SessionId) -> DomainResult<()> {
                self.deleted.lock().unwrap().push(session);
                if self.fail_delete {
                    Err(DomainError::conflict("delete failed"))
                } else {
                    Ok(())
                }
            }
        }

        fn service(wizard: ScriptedWizard) -> RevokeService<OneSale, AcceptAll, ScriptedWizard> {
            let repo = OneSale {
                sale: sale_with(SaleState::Processing, vec![], vec![], vec![]),
                written: Mutex::new(Vec::new()),
            };
            RevokeService::new(repo, AcceptAll, wizard, RevokeVariant::Ignored)
        }

        #[test]
        fn session_is_deleted_when_the_handle_step_fails() {
            let svc = service(ScriptedWizard {
                fail_handle: true,
                ..ScriptedWizard::default()
            });

            let err = svc.revoke(&[svc.repo.sale.id]).unwrap_err();
            assert_eq!(err, SaleError::Domain(DomainError::conflict("handle step failed")));

            let created = svc.wizard.created.lock().unwrap().clone();
            assert_eq!(created.len(), 1);
            assert_eq!(*svc.wizard.deleted.lock().unwrap(), created);
            assert!(svc.repo.written.lock().unwrap().is_empty());
        }

        #[test]
        fn failed_session_delete_does_not_fail_the_revoke() {
            let svc = service(ScriptedWizard {
                fail_delete: true,
                ..ScriptedWizard::default()
            });
            let id = svc.repo.sale.id;

            assert_eq!(svc.revoke(&[id, id]).unwrap(), vec![id]);
            assert_eq!(svc.wizard.deleted.lock().unwrap().len(), 1);
            assert_eq!(*svc.repo.written.lock().unwrap(), vec![SaleState::Done]);
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: never more than five names, `...` exactly when some were cut.
            #[test]
            fn blocking_names_is_capped(n in 0usize..40) {
                let listed = blocking_names(&names(n));
                let shown = listed.trim_end_matches("...");
                let count = if shown.is_empty() { 0 } else { shown.split(", ").count() };

                prop_assert_eq!(count, n.min(MAX_LISTED_NAMES));
                prop_assert_eq!(listed.ends_with("..."), n > MAX_LISTED_NAMES);
            }
        }
    }
}
