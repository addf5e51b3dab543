use sale_revoke_core::{DomainError, DomainResult};
use sale_revoke_sales::{LineCopy, SaleId, SaleLineId, SaleOrder, SaleRepository, SaleState};

use super::{InMemoryErp, LineRecord, SaleRecord};

impl SaleRepository for InMemoryErp {
    fn get(&self, id: SaleId) -> DomainResult<SaleOrder> {
        self.read()?.hydrate_sale(id)
    }

    fn get_many(&self, ids: &[SaleId]) -> DomainResult<Vec<SaleOrder>> {
        let tables = self.read()?;
        ids.iter().map(|id| tables.hydrate_sale(*id)).collect()
    }

    fn set_state(&self, ids: &[SaleId], state: SaleState) -> DomainResult<()> {
        let mut tables = self.write()?;
        if let Some(missing) = ids.iter().find(|id| !tables.sales.contains_key(*id)) {
            return Err(DomainError::not_found(format!("sale {missing}")));
        }
        for id in ids {
            if let Some(sale) = tables.sales.get_mut(id) {
                sale.state = state;
            }
        }
        Ok(())
    }

    fn copy(&self, id: SaleId) -> DomainResult<SaleId> {
        let mut tables = self.write()?;
        let source = tables
            .sales
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("sale {id}")))?;

        let copy = SaleRecord {
            id: SaleId::new(),
            number: None,
            sale_date: None,
            state: SaleState::Draft,
            ..source.clone()
        };
        let new_id = copy.id;
        tables.sales.insert(new_id, copy);
        Ok(new_id)
    }

    fn copy_lines(&self, target: SaleId, lines: &[LineCopy]) -> DomainResult<Vec<SaleLineId>> {
        let mut tables = self.write()?;
        if !tables.sales.contains_key(&target) {
            return Err(DomainError::not_found(format!("sale {target}")));
        }

        let mut copies = Vec::with_capacity(lines.len());
        for request in lines {
            let source = tables
                .lines
                .get(&request.source)
                .ok_or_else(|| DomainError::not_found(format!("sale line {}", request.source)))?;
            if let Some(unit) = request.unit {
                tables.uom(unit)?;
            }

            copies.push(LineRecord {
                id: SaleLineId::new(),
                sale: target,
                quantity: request.quantity.unwrap_or(source.quantity),
                unit: request.unit.or(source.unit),
                moves: Vec::new(),
                moves_ignored: Vec::new(),
                moves_recreated: Vec::new(),
                ..source.clone()
            });
        }

        let ids = copies.iter().map(|l| l.id).collect();
        for line in copies {
            tables.lines.insert(line.id, line);
        }
        Ok(ids)
    }
}
