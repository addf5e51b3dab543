use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sale_revoke_core::{define_id, Entity};
use sale_revoke_inventory::{Move, MoveId, Shipment};
use sale_revoke_products::{ProductRef, UnitRef};

use crate::variant::RevokeVariant;

define_id!(
    /// Sale order identifier.
    SaleId
);

/// `ids` with repeats removed, first occurrence kept.
pub fn distinct_sale_ids(ids: &[SaleId]) -> Vec<SaleId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

define_id!(
    /// Sale line identifier.
    SaleLineId
);

/// Sale order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleState {
    Draft,
    Quotation,
    Confirmed,
    Processing,
    Done,
    Cancelled,
}

/// Allowed `(from, to)` workflow transitions.
///
/// The base sale workflow plus `confirmed → done`, which revocation adds so an
/// order that never started processing can be closed directly.
const TRANSITIONS: &[(SaleState, SaleState)] = &[
    (SaleState::Draft, SaleState::Quotation),
    (SaleState::Quotation, SaleState::Confirmed),
    (SaleState::Confirmed, SaleState::Processing),
    (SaleState::Processing, SaleState::Done),
    (SaleState::Done, SaleState::Processing),
    (SaleState::Draft, SaleState::Cancelled),
    (SaleState::Quotation, SaleState::Cancelled),
    (SaleState::Quotation, SaleState::Draft),
    (SaleState::Cancelled, SaleState::Draft),
    (SaleState::Confirmed, SaleState::Done),
];

impl SaleState {
    pub fn can_transition_to(self, to: SaleState) -> bool {
        TRANSITIONS.contains(&(self, to))
    }
}

/// Kind of sale line. Only `Line` entries carry a product and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Line,
    Subtotal,
    Title,
    Comment,
}

/// Sale line snapshot, including the stock moves it generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: SaleLineId,
    pub sequence: u32,
    pub line_type: LineType,
    pub product: Option<ProductRef>,
    pub quantity: Decimal,
    pub unit: Option<UnitRef>,
    pub unit_price: Decimal,
    pub description: String,
    pub moves: Vec<Move>,
    /// Moves that exception handling decided not to deliver.
    pub moves_ignored: Vec<MoveId>,
    /// Moves that exception handling replaced with new ones.
    pub moves_recreated: Vec<MoveId>,
}

impl SaleLine {
    /// Ids of the moves exception handling already decided on.
    pub fn skipped_moves(&self) -> HashSet<MoveId> {
        self.moves_ignored
            .iter()
            .chain(self.moves_recreated.iter())
            .copied()
            .collect()
    }

    fn moves_in<'a>(&'a self, ids: &'a [MoveId]) -> impl Iterator<Item = &'a Move> + 'a {
        self.moves.iter().filter(move |m| ids.contains(&m.id))
    }
}

impl Entity for SaleLine {
    type Id = SaleLineId;

    fn id(&self) -> SaleLineId {
        self.id
    }

    fn rec_name(&self) -> String {
        match &self.product {
            Some(product) => product.name.clone(),
            None => self.description.clone(),
        }
    }
}

/// Which actions the UI should offer for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleButtons {
    pub revoke: bool,
    pub create_pending_moves: bool,
}

/// Sale order snapshot as handed out by the [`SaleRepository`](crate::ports::SaleRepository).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleOrder {
    pub id: SaleId,
    pub number: Option<String>,
    pub reference: Option<String>,
    pub party: String,
    pub sale_date: Option<NaiveDate>,
    pub state: SaleState,
    pub lines: Vec<SaleLine>,
    pub shipments: Vec<Shipment>,
    pub shipment_returns: Vec<Shipment>,
}

impl SaleOrder {
    /// Moves the exception handling marked as ignored, across all lines.
    pub fn ignored_moves(&self) -> Vec<&Move> {
        self.lines
            .iter()
            .flat_map(|l| l.moves_in(&l.moves_ignored))
            .collect()
    }

    /// Moves the exception handling marked as recreated, across all lines.
    pub fn recreated_moves(&self) -> Vec<&Move> {
        self.lines
            .iter()
            .flat_map(|l| l.moves_in(&l.moves_recreated))
            .collect()
    }

    /// Union of every line's ignored and recreated move ids.
    pub fn skipped_moves(&self) -> HashSet<MoveId> {
        self.lines.iter().flat_map(|l| l.skipped_moves()).collect()
    }

    /// Outbound shipments followed by return shipments.
    pub fn all_shipments(&self) -> impl Iterator<Item = &Shipment> {
        self.shipments.iter().chain(self.shipment_returns.iter())
    }

    pub fn buttons(&self, variant: RevokeVariant) -> SaleButtons {
        SaleButtons {
            revoke: matches!(self.state, SaleState::Confirmed | SaleState::Processing),
            create_pending_moves: matches!(self.state, SaleState::Processing | SaleState::Done)
                && !variant.outstanding_moves(self).is_empty(),
        }
    }
}

impl Entity for SaleOrder {
    type Id = SaleId;

    fn id(&self) -> SaleId {
        self.id
    }

    fn rec_name(&self) -> String {
        match &self.number {
            Some(number) => number.clone(),
            None => format!("({})", self.id),
        }
    }
}
