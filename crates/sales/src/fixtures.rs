//! Snapshot builders shared by the unit tests.

use std::str::FromStr;

use rust_decimal::Decimal;

use sale_revoke_core::{DomainError, DomainResult};
use sale_revoke_inventory::{Move, MoveId, MoveState, Shipment, ShipmentId, ShipmentKind, ShipmentState};
use sale_revoke_products::{ProductId, ProductRef, Uom, UomCategoryId, UomId};

use crate::order::{LineType, SaleId, SaleLine, SaleLineId, SaleOrder, SaleState};
use crate::ports::UomService;

pub fn qty(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A "unit" and a "pair" (two units) in the same category.
pub struct Units {
    pub unit: Uom,
    pub pair: Uom,
}

impl Units {
    pub fn new() -> Self {
        let category = UomCategoryId::new();
        Self {
            unit: Uom {
                id: UomId::new(),
                name: "Unit".to_string(),
                symbol: "u".to_string(),
                category,
                factor: qty("1"),
                rounding: qty("1"),
            },
            pair: Uom {
                id: UomId::new(),
                name: "Pair".to_string(),
                symbol: "pr".to_string(),
                category,
                factor: qty("2"),
                rounding: qty("1"),
            },
        }
    }

    /// Product sold by the unit.
    pub fn product(&self, name: &str) -> ProductRef {
        ProductRef {
            id: ProductId::new(),
            code: None,
            name: name.to_string(),
            sale_unit: self.unit.unit_ref(),
        }
    }
}

impl UomService for Units {
    fn compute_qty(&self, from: UomId, quantity: Decimal, to: UomId, round: bool) -> DomainResult<Decimal> {
        let find = |id: UomId| {
            [&self.unit, &self.pair]
                .into_iter()
                .find(|u| u.id == id)
                .ok_or_else(|| DomainError::not_found(format!("uom {id}")))
        };
        Uom::compute_qty(find(from)?, quantity, find(to)?, round)
    }
}

pub fn stock_move(product: &ProductRef, quantity: &str, unit: &Uom, state: MoveState) -> Move {
    Move {
        id: MoveId::new(),
        product: product.clone(),
        quantity: qty(quantity),
        unit: unit.unit_ref(),
        state,
    }
}

pub fn product_line(product: &ProductRef, quantity: &str, unit: &Uom) -> SaleLine {
    SaleLine {
        id: SaleLineId::new(),
        sequence: 10,
        line_type: LineType::Line,
        product: Some(product.clone()),
        quantity: qty(quantity),
        unit: Some(unit.unit_ref()),
        unit_price: qty("10"),
        description: product.name.clone(),
        moves: vec![],
        moves_ignored: vec![],
        moves_recreated: vec![],
    }
}

pub fn comment_line(text: &str) -> SaleLine {
    SaleLine {
        id: SaleLineId::new(),
        sequence: 20,
        line_type: LineType::Comment,
        product: None,
        quantity: Decimal::ZERO,
        unit: None,
        unit_price: Decimal::ZERO,
        description: text.to_string(),
        moves: vec![],
        moves_ignored: vec![],
        moves_recreated: vec![],
    }
}

pub fn shipment(number: &str, kind: ShipmentKind, state: ShipmentState, moves: Vec<Move>) -> Shipment {
    Shipment {
        id: ShipmentId::new(),
        number: number.to_string(),
        kind,
        state,
        moves,
    }
}

pub fn sale_with(
    state: SaleState,
    lines: Vec<SaleLine>,
    shipments: Vec<Shipment>,
    shipment_returns: Vec<Shipment>,
) -> SaleOrder {
    SaleOrder {
        id: SaleId::new(),
        number: Some("SO-1".to_string()),
        reference: None,
        party: "ACME".to_string(),
        sale_date: None,
        state,
        lines,
        shipments,
        shipment_returns,
    }
}
