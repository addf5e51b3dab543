use std::sync::Arc;

use sale_revoke_core::DomainResult;
use sale_revoke_infra::{seed_demo, DemoData, InMemoryErp};
use sale_revoke_sales::{
    ActionResult, CreatePendingMoves, RevokeService, RevokeVariant, SaleId, SaleOrder, SaleRepository, SaleResult,
};

type Erp = Arc<InMemoryErp>;

/// Store plus the two sale actions wired onto it.
pub struct AppServices {
    erp: Erp,
    revoke: RevokeService<Erp, Erp, Erp>,
    pending: CreatePendingMoves<Erp, Erp>,
}

impl AppServices {
    pub fn new(erp: Arc<InMemoryErp>, variant: RevokeVariant) -> Self {
        Self {
            revoke: RevokeService::new(erp.clone(), erp.clone(), erp.clone(), variant),
            pending: CreatePendingMoves::new(erp.clone(), erp.clone(), variant),
            erp,
        }
    }

    pub fn variant(&self) -> RevokeVariant {
        self.revoke.variant()
    }

    pub fn sale(&self, id: SaleId) -> DomainResult<SaleOrder> {
        self.erp.get(id)
    }

    pub fn sales(&self) -> DomainResult<Vec<SaleOrder>> {
        let ids = self.erp.sale_ids()?;
        self.erp.get_many(&ids)
    }

    pub fn revoke(&self, ids: &[SaleId]) -> SaleResult<Vec<SaleId>> {
        self.revoke.revoke(ids)
    }

    pub fn create_pending_moves(&self, ids: &[SaleId]) -> SaleResult<ActionResult> {
        self.pending.run(ids)
    }
}

/// Build the services on a fresh store, optionally seeded with demo orders.
pub fn build_services(variant: RevokeVariant, seed: bool) -> DomainResult<(AppServices, Option<DemoData>)> {
    let erp = Arc::new(InMemoryErp::new());
    let demo = if seed { Some(seed_demo(&erp)?) } else { None };
    Ok((AppServices::new(erp, variant), demo))
}
