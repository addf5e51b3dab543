//! The host's "handle shipment exception" wizard.
//!
//! Each move the session is allowed to act on (`domain_moves`) and that no
//! earlier run already decided on is marked on its sale line: recreated when
//! listed in `recreate_moves`, ignored otherwise.

use std::collections::HashSet;

use sale_revoke_core::{DomainError, DomainResult};
use sale_revoke_inventory::MoveId;
use sale_revoke_sales::{HandleExceptionAsk, SaleId, SessionId, ShipmentExceptionWizard};

use super::{InMemoryErp, WizardSession};

fn unknown(session: SessionId) -> DomainError {
    DomainError::not_found(format!("wizard session {session}"))
}

impl ShipmentExceptionWizard for InMemoryErp {
    fn create(&self, active_id: SaleId) -> DomainResult<SessionId> {
        let mut tables = self.write()?;
        if !tables.sales.contains_key(&active_id) {
            return Err(DomainError::not_found(format!("sale {active_id}")));
        }
        let id = SessionId::new();
        tables.sessions.insert(
            id,
            WizardSession {
                active_id,
                ask: HandleExceptionAsk::default(),
            },
        );
        Ok(id)
    }

    fn configure(&self, session: SessionId, ask: HandleExceptionAsk) -> DomainResult<()> {
        let mut tables = self.write()?;
        let state = tables.sessions.get_mut(&session).ok_or_else(|| unknown(session))?;
        state.ask = ask;
        Ok(())
    }

    fn transition_handle(&self, session: SessionId) -> DomainResult<()> {
        let mut tables = self.write()?;
        let WizardSession { active_id, ask } = tables
            .sessions
            .get(&session)
            .cloned()
            .ok_or_else(|| unknown(session))?;

        let domain: HashSet<MoveId> = ask.domain_moves.iter().copied().collect();
        let recreate: HashSet<MoveId> = ask.recreate_moves.iter().copied().collect();

        let mut ignored = 0usize;
        let mut recreated = 0usize;
        for line in tables.lines.values_mut().filter(|l| l.sale == active_id) {
            let skip: HashSet<MoveId> = line
                .moves_ignored
                .iter()
                .chain(line.moves_recreated.iter())
                .copied()
                .collect();

            let decided: Vec<MoveId> = line
                .moves
                .iter()
                .copied()
                .filter(|m| domain.contains(m) && !skip.contains(m))
                .collect();
            for mv in decided {
                if recreate.contains(&mv) {
                    line.moves_recreated.push(mv);
                    recreated += 1;
                } else {
                    line.moves_ignored.push(mv);
                    ignored += 1;
                }
            }
        }

        tracing::debug!(sale = %active_id, ignored, recreated, "handled shipment exception");
        Ok(())
    }

    fn delete(&self, session: SessionId) -> DomainResult<()> {
        self.write()?
            .sessions
            .remove(&session)
            .map(|_| ())
            .ok_or_else(|| unknown(session))
    }
}
