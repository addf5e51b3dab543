use serde::{Deserialize, Serialize};

use sale_revoke_core::Entity;
use sale_revoke_inventory::{MoveId, ShipmentState};
use sale_revoke_sales::{RevokeVariant, SaleButtons, SaleId, SaleLineId, SaleOrder, SaleState};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Record selection shared by the bulk actions.
#[derive(Debug, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

impl IdsRequest {
    pub fn parse(&self) -> Result<Vec<SaleId>, axum::response::Response> {
        self.ids
            .iter()
            .map(|raw| raw.parse::<SaleId>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(errors::domain_error_to_response)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    pub revoked: Vec<SaleId>,
}

#[derive(Debug, Serialize)]
pub struct SaleLineDto {
    pub id: SaleLineId,
    pub description: String,
    pub product: Option<String>,
    pub quantity: String,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShipmentDto {
    pub number: String,
    pub state: ShipmentState,
}

#[derive(Debug, Serialize)]
pub struct SaleSummary {
    pub id: SaleId,
    pub name: String,
    pub number: Option<String>,
    pub party: String,
    pub state: SaleState,
    pub buttons: SaleButtons,
    pub lines: Vec<SaleLineDto>,
    pub shipments: Vec<ShipmentDto>,
    /// Moves a "create pending moves" run would rebuild lines from.
    pub outstanding_moves: Vec<MoveId>,
}

impl SaleSummary {
    pub fn from_sale(sale: &SaleOrder, variant: RevokeVariant) -> Self {
        Self {
            id: sale.id,
            name: sale.rec_name(),
            number: sale.number.clone(),
            party: sale.party.clone(),
            state: sale.state,
            buttons: sale.buttons(variant),
            lines: sale
                .lines
                .iter()
                .map(|line| SaleLineDto {
                    id: line.id,
                    description: line.description.clone(),
                    product: line.product.as_ref().map(|p| p.name.clone()),
                    quantity: line.quantity.normalize().to_string(),
                    unit: line.unit.as_ref().map(|u| u.symbol.clone()),
                })
                .collect(),
            shipments: sale
                .all_shipments()
                .map(|s| ShipmentDto {
                    number: s.number.clone(),
                    state: s.state,
                })
                .collect(),
            outstanding_moves: variant.outstanding_moves(sale).iter().map(|m| m.id).collect(),
        }
    }
}
