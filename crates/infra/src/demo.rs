//! Demo data set for local runs and black-box tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use sale_revoke_core::DomainResult;
use sale_revoke_inventory::{MoveId, MoveState, ShipmentId, ShipmentKind, ShipmentState};
use sale_revoke_products::{Product, ProductId, Uom, UomCategoryId, UomId};
use sale_revoke_sales::{LineType, SaleId, SaleLineId, SaleState};

use crate::store::{InMemoryErp, LineRecord, MoveRecord, SaleRecord, ShipmentRecord};

/// Ids of the seeded records.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub unit: UomId,
    pub pair: UomId,
    pub widget: ProductId,
    /// Processing order with a waiting and a draft shipment: revocable.
    pub revocable: SaleId,
    /// Processing order with a packed shipment: revoke is blocked.
    pub blocked: SaleId,
    /// Done order with ignored moves: ready for "create pending moves".
    pub with_pending: SaleId,
}

struct Seeder<'a> {
    erp: &'a InMemoryErp,
    unit: UomId,
    widget: ProductId,
}

impl Seeder<'_> {
    fn sale(&self, number: &str, state: SaleState) -> DomainResult<SaleId> {
        self.erp.insert_sale(SaleRecord {
            id: SaleId::new(),
            number: Some(number.to_string()),
            reference: None,
            party: "Demo Customer".to_string(),
            sale_date: None,
            state,
        })
    }

    fn stock_move(&self, quantity: Decimal, unit: UomId, state: MoveState) -> DomainResult<MoveId> {
        self.erp.insert_move(MoveRecord {
            id: MoveId::new(),
            product: self.widget,
            quantity,
            unit,
            state,
        })
    }

    fn line(
        &self,
        sale: SaleId,
        quantity: Decimal,
        moves: Vec<MoveId>,
        moves_ignored: Vec<MoveId>,
    ) -> DomainResult<SaleLineId> {
        self.erp.insert_line(LineRecord {
            id: SaleLineId::new(),
            sale,
            sequence: 10,
            line_type: LineType::Line,
            product: Some(self.widget),
            quantity,
            unit: Some(self.unit),
            unit_price: dec!(12.50),
            description: "Widget".to_string(),
            moves,
            moves_ignored,
            moves_recreated: Vec::new(),
        })
    }

    fn shipment(
        &self,
        sale: SaleId,
        number: &str,
        kind: ShipmentKind,
        state: ShipmentState,
        moves: Vec<MoveId>,
    ) -> DomainResult<ShipmentId> {
        self.erp.insert_shipment(ShipmentRecord {
            id: ShipmentId::new(),
            sale,
            number: number.to_string(),
            kind,
            state,
            moves,
        })
    }
}

/// Populate `erp` with a small catalogue and three orders.
pub fn seed_demo(erp: &InMemoryErp) -> DomainResult<DemoData> {
    let category = UomCategoryId::new();
    let unit = erp.insert_uom(Uom {
        id: UomId::new(),
        name: "Unit".to_string(),
        symbol: "u".to_string(),
        category,
        factor: Decimal::ONE,
        rounding: Decimal::ONE,
    })?;
    let pair = erp.insert_uom(Uom {
        id: UomId::new(),
        name: "Pair".to_string(),
        symbol: "pr".to_string(),
        category,
        factor: dec!(2),
        rounding: Decimal::ONE,
    })?;
    let widget = erp.insert_product(Product {
        id: ProductId::new(),
        code: Some("W-1".to_string()),
        name: "Widget".to_string(),
        default_uom: unit,
        sale_uom: None,
    })?;

    let seeder = Seeder { erp, unit, widget };

    let revocable = seeder.sale("SO-1001", SaleState::Processing)?;
    let waiting_move = seeder.stock_move(dec!(4), unit, MoveState::Draft)?;
    let draft_move = seeder.stock_move(dec!(6), unit, MoveState::Draft)?;
    seeder.line(revocable, dec!(10), vec![waiting_move, draft_move], vec![])?;
    seeder.shipment(revocable, "OUT-1001-A", ShipmentKind::Outbound, ShipmentState::Waiting, vec![waiting_move])?;
    seeder.shipment(revocable, "OUT-1001-B", ShipmentKind::Outbound, ShipmentState::Draft, vec![draft_move])?;

    let blocked = seeder.sale("SO-1002", SaleState::Processing)?;
    let assigned = seeder.stock_move(dec!(2), unit, MoveState::Assigned)?;
    seeder.line(blocked, dec!(2), vec![assigned], vec![])?;
    seeder.shipment(blocked, "OUT-1002", ShipmentKind::Outbound, ShipmentState::Packed, vec![assigned])?;

    let with_pending = seeder.sale("SO-1003", SaleState::Done)?;
    let by_unit = seeder.stock_move(dec!(3), unit, MoveState::Cancelled)?;
    let by_pair = seeder.stock_move(dec!(2), pair, MoveState::Cancelled)?;
    seeder.line(with_pending, dec!(7), vec![by_unit, by_pair], vec![by_unit, by_pair])?;

    tracing::info!(%revocable, %blocked, %with_pending, "seeded demo data");

    Ok(DemoData {
        unit,
        pair,
        widget,
        revocable,
        blocked,
        with_pending,
    })
}
