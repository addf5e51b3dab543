use serde::{Deserialize, Serialize};

use sale_revoke_core::{define_id, Entity};

use crate::uom::{UnitRef, UomId};

define_id!(
    /// Product identifier.
    ProductId
);

/// Product master record (the fields the sales rules need).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub code: Option<String>,
    pub name: String,
    /// Stock unit.
    pub default_uom: UomId,
    /// Unit used on sale lines; falls back to the stock unit.
    pub sale_uom: Option<UomId>,
}

impl Product {
    pub fn sale_uom(&self) -> UomId {
        self.sale_uom.unwrap_or(self.default_uom)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn rec_name(&self) -> String {
        coded_name(self.code.as_deref(), &self.name)
    }
}

/// Product snapshot embedded in moves and sale lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    pub code: Option<String>,
    pub name: String,
    pub sale_unit: UnitRef,
}

impl Entity for ProductRef {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn rec_name(&self) -> String {
        coded_name(self.code.as_deref(), &self.name)
    }
}

/// `[CODE] name`, or the bare name for products without a code.
fn coded_name(code: Option<&str>, name: &str) -> String {
    match code {
        Some(code) => format!("[{code}] {name}"),
        None => name.to_string(),
    }
}
