use rust_decimal::Decimal;

use sale_revoke_core::DomainResult;
use sale_revoke_products::{Uom, UomId};
use sale_revoke_sales::UomService;

use super::InMemoryErp;

impl UomService for InMemoryErp {
    fn compute_qty(&self, from: UomId, quantity: Decimal, to: UomId, round: bool) -> DomainResult<Decimal> {
        let tables = self.read()?;
        Uom::compute_qty(tables.uom(from)?, quantity, tables.uom(to)?, round)
    }
}
