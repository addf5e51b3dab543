//! "Create pending moves": duplicate orders for moves that were never delivered.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sale_revoke_core::{DomainError, Entity, ValueObject};
use sale_revoke_inventory::Move;
use sale_revoke_products::{ProductId, UomId};

use crate::error::SaleResult;
use crate::order::{distinct_sale_ids, SaleId, SaleLine};
use crate::ports::{LineCopy, SaleRepository, UomService};
use crate::variant::RevokeVariant;

/// Quantity and unit a copied line is forced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityOverride {
    pub quantity: Decimal,
    pub unit: UomId,
}

impl ValueObject for QuantityOverride {}

/// Outstanding quantity per product, expressed in each product's sale unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingQuantities {
    by_product: HashMap<ProductId, QuantityOverride>,
}

impl PendingQuantities {
    /// Sum `moves` per product. Moves in another unit than the product's sale
    /// unit are converted without rounding.
    pub fn aggregate<'a, U>(moves: impl IntoIterator<Item = &'a Move>, uoms: &U) -> SaleResult<Self>
    where
        U: UomService + ?Sized,
    {
        let mut by_product: HashMap<ProductId, QuantityOverride> = HashMap::new();
        for mv in moves {
            let to = mv.product.sale_unit.id;
            let quantity = if mv.unit.id != to {
                uoms.compute_qty(mv.unit.id, mv.quantity, to, false)?
            } else {
                mv.quantity
            };
            let total = by_product.entry(mv.product.id).or_insert(QuantityOverride {
                quantity: Decimal::ZERO,
                unit: to,
            });
            total.quantity = total.quantity.checked_add(quantity).ok_or_else(|| {
                DomainError::validation(format!("pending quantity of {} overflows", mv.product.rec_name()))
            })?;
        }
        Ok(Self { by_product })
    }

    pub fn get(&self, product: ProductId) -> Option<&QuantityOverride> {
        self.by_product.get(&product)
    }

    /// Copy request for `line` with this map's override applied.
    ///
    /// Lines without a product are copied untouched. A product line whose
    /// product has nothing outstanding is copied with a zero quantity.
    pub fn apply(&self, line: &SaleLine) -> LineCopy {
        let Some(product) = &line.product else {
            return LineCopy {
                source: line.id,
                quantity: None,
                unit: None,
            };
        };
        match self.by_product.get(&product.id) {
            Some(over) => LineCopy {
                source: line.id,
                quantity: Some(over.quantity),
                unit: Some(over.unit),
            },
            None => LineCopy {
                source: line.id,
                quantity: Some(Decimal::ZERO),
                unit: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Tree,
    Form,
}

/// Where the UI should go after the action ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub model: String,
    pub res_ids: Vec<SaleId>,
    pub views: Vec<ViewKind>,
}

impl ActionResult {
    pub const SALE_MODEL: &'static str = "sale.sale";

    /// Open the given sales: list first, or straight into the form when
    /// there is exactly one.
    pub fn open_sales(res_ids: Vec<SaleId>) -> Self {
        let mut views = vec![ViewKind::Tree, ViewKind::Form];
        if res_ids.len() == 1 {
            views.reverse();
        }
        Self {
            model: Self::SALE_MODEL.to_string(),
            res_ids,
            views,
        }
    }
}

/// The "create pending moves" wizard.
#[derive(Debug, Clone)]
pub struct CreatePendingMoves<R, U> {
    repo: R,
    uoms: U,
    variant: RevokeVariant,
}

impl<R, U> CreatePendingMoves<R, U>
where
    R: SaleRepository,
    U: UomService,
{
    pub fn new(repo: R, uoms: U, variant: RevokeVariant) -> Self {
        Self { repo, uoms, variant }
    }

    /// Create one new order per selected sale that has outstanding moves.
    /// A sale listed more than once is duplicated once.
    pub fn run(&self, ids: &[SaleId]) -> SaleResult<ActionResult> {
        let mut new_sales = Vec::new();

        for sale in self.repo.get_many(&distinct_sale_ids(ids))? {
            let outstanding = self.variant.outstanding_moves(&sale);
            if outstanding.is_empty() {
                tracing::debug!(sale = %sale.rec_name(), "no outstanding moves; skipping");
                continue;
            }

            let pending = PendingQuantities::aggregate(outstanding, &self.uoms)?;
            let new_sale = self.repo.copy(sale.id)?;
            let copies = self.variant.line_copies(&sale.lines, &pending);
            self.repo.copy_lines(new_sale, &copies)?;

            tracing::info!(
                sale = %sale.rec_name(),
                new_sale = %new_sale,
                lines = copies.len(),
                variant = %self.variant,
                "created pending order"
            );
            new_sales.push(new_sale);
        }

        Ok(ActionResult::open_sales(new_sales))
    }
}
