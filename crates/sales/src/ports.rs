//! Host-system capabilities the sales rules depend on.
//!
//! Each trait is a narrow port onto something the surrounding ERP provides.
//! `sale-revoke-infra` ships in-memory adapters for all of them; production
//! deployments plug in their own.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sale_revoke_core::{define_id, DomainResult, ValueObject};
use sale_revoke_inventory::{MoveId, ShipmentId, ShipmentKind};
use sale_revoke_products::UomId;

use crate::order::{SaleId, SaleLineId, SaleOrder, SaleState};

/// Request to duplicate one sale line into another order.
///
/// `None` keeps the source line's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCopy {
    pub source: SaleLineId,
    pub quantity: Option<Decimal>,
    pub unit: Option<UomId>,
}

impl ValueObject for LineCopy {}

/// Sale order persistence.
pub trait SaleRepository: Send + Sync {
    /// Load a fully hydrated order (lines, moves, shipments).
    fn get(&self, id: SaleId) -> DomainResult<SaleOrder>;

    fn get_many(&self, ids: &[SaleId]) -> DomainResult<Vec<SaleOrder>> {
        ids.iter().map(|id| self.get(*id)).collect()
    }

    fn set_state(&self, ids: &[SaleId], state: SaleState) -> DomainResult<()>;

    /// Duplicate an order without its lines. The copy starts as a draft
    /// without number, sale date or shipments.
    fn copy(&self, id: SaleId) -> DomainResult<SaleId>;

    /// Duplicate lines into `target`, applying the per-line overrides.
    fn copy_lines(&self, target: SaleId, lines: &[LineCopy]) -> DomainResult<Vec<SaleLineId>>;
}

/// Bulk shipment state operations.
pub trait ShipmentService: Send + Sync {
    /// Reset waiting outbound shipments to draft.
    fn draft(&self, ids: &[ShipmentId]) -> DomainResult<()>;

    /// Cancel shipments of the given kind.
    fn cancel(&self, kind: ShipmentKind, ids: &[ShipmentId]) -> DomainResult<()>;
}

define_id!(
    /// Identifier of a transient wizard session.
    SessionId
);

/// Answers of the "ask" step of the shipment exception wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HandleExceptionAsk {
    /// Moves to recreate; every other domain move is ignored.
    pub recreate_moves: Vec<MoveId>,
    /// Moves the wizard is allowed to act on.
    pub domain_moves: Vec<MoveId>,
}

/// Host wizard reconciling moves that could not be fulfilled as planned.
///
/// Sessions are transient: create, configure, advance, delete.
pub trait ShipmentExceptionWizard: Send + Sync {
    /// Open a session with `active_id` as the record it acts on.
    fn create(&self, active_id: SaleId) -> DomainResult<SessionId>;

    fn configure(&self, session: SessionId, ask: HandleExceptionAsk) -> DomainResult<()>;

    /// Run the `handle` transition.
    fn transition_handle(&self, session: SessionId) -> DomainResult<()>;

    fn delete(&self, session: SessionId) -> DomainResult<()>;
}

/// Unit of measure conversion.
pub trait UomService: Send + Sync {
    fn compute_qty(&self, from: UomId, quantity: Decimal, to: UomId, round: bool) -> DomainResult<Decimal>;
}

impl<S> SaleRepository for Arc<S>
where
    S: SaleRepository + ?Sized,
{
    fn get(&self, id: SaleId) -> DomainResult<SaleOrder> {
        (**self).get(id)
    }

    fn get_many(&self, ids: &[SaleId]) -> DomainResult<Vec<SaleOrder>> {
        (**self).get_many(ids)
    }

    fn set_state(&self, ids: &[SaleId], state: SaleState) -> DomainResult<()> {
        (**self).set_state(ids, state)
    }

    fn copy(&self, id: SaleId) -> DomainResult<SaleId> {
        (**self).copy(id)
    }

    fn copy_lines(&self, target: SaleId, lines: &[LineCopy]) -> DomainResult<Vec<SaleLineId>> {
        (**self).copy_lines(target, lines)
    }
}

impl<S> ShipmentService for Arc<S>
where
    S: ShipmentService + ?Sized,
{
    fn draft(&self, ids: &[ShipmentId]) -> DomainResult<()> {
        (**self).draft(ids)
    }

    fn cancel(&self, kind: ShipmentKind, ids: &[ShipmentId]) -> DomainResult<()> {
        (**self).cancel(kind, ids)
    }
}

impl<S> ShipmentExceptionWizard for Arc<S>
where
    S: ShipmentExceptionWizard + ?Sized,
{
    fn create(&self, active_id: SaleId) -> DomainResult<SessionId> {
        (**self).create(active_id)
    }

    fn configure(&self, session: SessionId, ask: HandleExceptionAsk) -> DomainResult<()> {
        (**self).configure(session, ask)
    }

    fn transition_handle(&self, session: SessionId) -> DomainResult<()> {
        (**self).transition_handle(session)
    }

    fn delete(&self, session: SessionId) -> DomainResult<()> {
        (**self).delete(session)
    }
}

impl<S> UomService for Arc<S>
where
    S: UomService + ?Sized,
{
    fn compute_qty(&self, from: UomId, quantity: Decimal, to: UomId, round: bool) -> DomainResult<Decimal> {
        (**self).compute_qty(from, quantity, to, round)
    }
}
