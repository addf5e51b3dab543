//! In-memory ERP store.
//!
//! Holds normalised records (sales, lines, shipments, moves, products, units)
//! and hands out hydrated snapshots through the sales ports. Intended for
//! tests/dev. Not optimized for performance.

mod exception_wizard;
mod sales;
mod shipments;
mod uom;

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sale_revoke_core::{DomainError, DomainResult};
use sale_revoke_inventory::{Move, MoveId, MoveState, Shipment, ShipmentId, ShipmentKind, ShipmentState};
use sale_revoke_products::{Product, ProductId, ProductRef, UnitRef, Uom, UomId};
use sale_revoke_sales::{HandleExceptionAsk, LineType, SaleId, SaleLine, SaleLineId, SaleOrder, SaleState, SessionId};

/// Stored sale order header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub number: Option<String>,
    pub reference: Option<String>,
    pub party: String,
    pub sale_date: Option<NaiveDate>,
    pub state: SaleState,
}

/// Stored sale line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: SaleLineId,
    pub sale: SaleId,
    pub sequence: u32,
    pub line_type: LineType,
    pub product: Option<ProductId>,
    pub quantity: Decimal,
    pub unit: Option<UomId>,
    pub unit_price: Decimal,
    pub description: String,
    pub moves: Vec<MoveId>,
    pub moves_ignored: Vec<MoveId>,
    pub moves_recreated: Vec<MoveId>,
}

/// Stored shipment (outbound or return).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: ShipmentId,
    pub sale: SaleId,
    pub number: String,
    pub kind: ShipmentKind,
    pub state: ShipmentState,
    pub moves: Vec<MoveId>,
}

/// Stored stock move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: MoveId,
    pub product: ProductId,
    pub quantity: Decimal,
    pub unit: UomId,
    pub state: MoveState,
}

#[derive(Debug, Clone)]
struct WizardSession {
    active_id: SaleId,
    ask: HandleExceptionAsk,
}

#[derive(Debug, Default)]
struct Tables {
    uoms: BTreeMap<UomId, Uom>,
    products: BTreeMap<ProductId, Product>,
    sales: BTreeMap<SaleId, SaleRecord>,
    lines: BTreeMap<SaleLineId, LineRecord>,
    shipments: BTreeMap<ShipmentId, ShipmentRecord>,
    moves: BTreeMap<MoveId, MoveRecord>,
    sessions: BTreeMap<SessionId, WizardSession>,
}

/// In-memory implementation of every sales port.
#[derive(Debug, Default)]
pub struct InMemoryErp {
    tables: RwLock<Tables>,
}

impl InMemoryErp {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| DomainError::conflict("lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| DomainError::conflict("lock poisoned"))
    }

    pub fn insert_uom(&self, uom: Uom) -> DomainResult<UomId> {
        let id = uom.id;
        self.write()?.uoms.insert(id, uom);
        Ok(id)
    }

    pub fn insert_product(&self, product: Product) -> DomainResult<ProductId> {
        let id = product.id;
        self.write()?.products.insert(id, product);
        Ok(id)
    }

    pub fn insert_sale(&self, sale: SaleRecord) -> DomainResult<SaleId> {
        let id = sale.id;
        self.write()?.sales.insert(id, sale);
        Ok(id)
    }

    pub fn insert_line(&self, line: LineRecord) -> DomainResult<SaleLineId> {
        let mut tables = self.write()?;
        if !tables.sales.contains_key(&line.sale) {
            return Err(DomainError::not_found(format!("sale {}", line.sale)));
        }
        let id = line.id;
        tables.lines.insert(id, line);
        Ok(id)
    }

    pub fn insert_shipment(&self, shipment: ShipmentRecord) -> DomainResult<ShipmentId> {
        let mut tables = self.write()?;
        if !tables.sales.contains_key(&shipment.sale) {
            return Err(DomainError::not_found(format!("sale {}", shipment.sale)));
        }
        let id = shipment.id;
        tables.shipments.insert(id, shipment);
        Ok(id)
    }

    pub fn insert_move(&self, mv: MoveRecord) -> DomainResult<MoveId> {
        let id = mv.id;
        self.write()?.moves.insert(id, mv);
        Ok(id)
    }

    /// Raw stored state of a shipment.
    pub fn shipment_state(&self, id: ShipmentId) -> DomainResult<ShipmentState> {
        self.read()?
            .shipments
            .get(&id)
            .map(|s| s.state)
            .ok_or_else(|| DomainError::not_found(format!("shipment {id}")))
    }

    /// Raw stored state of a move.
    pub fn move_state(&self, id: MoveId) -> DomainResult<MoveState> {
        self.read()?
            .moves
            .get(&id)
            .map(|m| m.state)
            .ok_or_else(|| DomainError::not_found(format!("move {id}")))
    }

    /// Ids of every stored sale, oldest first.
    pub fn sale_ids(&self) -> DomainResult<Vec<SaleId>> {
        Ok(self.read()?.sales.keys().copied().collect())
    }

    /// Number of wizard sessions not yet deleted.
    pub fn open_sessions(&self) -> DomainResult<usize> {
        Ok(self.read()?.sessions.len())
    }
}

impl Tables {
    fn uom(&self, id: UomId) -> DomainResult<&Uom> {
        self.uoms
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("uom {id}")))
    }

    fn unit_ref(&self, id: UomId) -> DomainResult<UnitRef> {
        self.uom(id).map(Uom::unit_ref)
    }

    fn product_ref(&self, id: ProductId) -> DomainResult<ProductRef> {
        let product = self
            .products
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))?;
        Ok(ProductRef {
            id,
            code: product.code.clone(),
            name: product.name.clone(),
            sale_unit: self.unit_ref(product.sale_uom())?,
        })
    }

    fn hydrate_move(&self, id: MoveId) -> DomainResult<Move> {
        let record = self
            .moves
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("move {id}")))?;
        Ok(Move {
            id,
            product: self.product_ref(record.product)?,
            quantity: record.quantity,
            unit: self.unit_ref(record.unit)?,
            state: record.state,
        })
    }

    fn hydrate_moves(&self, ids: &[MoveId]) -> DomainResult<Vec<Move>> {
        ids.iter().map(|id| self.hydrate_move(*id)).collect()
    }

    fn hydrate_line(&self, record: &LineRecord) -> DomainResult<SaleLine> {
        Ok(SaleLine {
            id: record.id,
            sequence: record.sequence,
            line_type: record.line_type,
            product: record.product.map(|p| self.product_ref(p)).transpose()?,
            quantity: record.quantity,
            unit: record.unit.map(|u| self.unit_ref(u)).transpose()?,
            unit_price: record.unit_price,
            description: record.description.clone(),
            moves: self.hydrate_moves(&record.moves)?,
            moves_ignored: record.moves_ignored.clone(),
            moves_recreated: record.moves_recreated.clone(),
        })
    }

    fn hydrate_shipments(&self, sale: SaleId, kind: ShipmentKind) -> DomainResult<Vec<Shipment>> {
        self.shipments
            .values()
            .filter(|s| s.sale == sale && s.kind == kind)
            .map(|s| {
                Ok(Shipment {
                    id: s.id,
                    number: s.number.clone(),
                    kind: s.kind,
                    state: s.state,
                    moves: self.hydrate_moves(&s.moves)?,
                })
            })
            .collect()
    }

    fn hydrate_sale(&self, id: SaleId) -> DomainResult<SaleOrder> {
        let record = self
            .sales
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("sale {id}")))?;

        let mut line_records: Vec<&LineRecord> =
            self.lines.values().filter(|l| l.sale == id).collect();
        line_records.sort_by_key(|l| (l.sequence, l.id));

        Ok(SaleOrder {
            id,
            number: record.number.clone(),
            reference: record.reference.clone(),
            party: record.party.clone(),
            sale_date: record.sale_date,
            state: record.state,
            lines: line_records
                .into_iter()
                .map(|l| self.hydrate_line(l))
                .collect::<DomainResult<_>>()?,
            shipments: self.hydrate_shipments(id, ShipmentKind::Outbound)?,
            shipment_returns: self.hydrate_shipments(id, ShipmentKind::Return)?,
        })
    }
}
