use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sale_revoke_core::{define_id, DomainError, DomainResult, Entity};

define_id!(
    /// Unit of measure identifier.
    UomId
);

define_id!(
    /// Unit category identifier (e.g. "unit", "weight", "length").
    UomCategoryId
);

/// A unit of measure.
///
/// `factor` is the size of the unit relative to its category's reference unit:
/// a dozen in the "unit" category has factor 12, the reference unit factor 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uom {
    pub id: UomId,
    pub name: String,
    pub symbol: String,
    pub category: UomCategoryId,
    pub factor: Decimal,
    /// Smallest representable step when rounding.
    pub rounding: Decimal,
}

impl Uom {
    pub fn unit_ref(&self) -> UnitRef {
        UnitRef {
            id: self.id,
            symbol: self.symbol.clone(),
        }
    }

    /// Round `quantity` to the nearest multiple of this unit's rounding step.
    ///
    /// `None` when the intermediate step count does not fit a `Decimal`.
    pub fn round(&self, quantity: Decimal) -> Option<Decimal> {
        if self.rounding.is_zero() {
            return Some(quantity);
        }
        quantity
            .checked_div(self.rounding)?
            .round()
            .checked_mul(self.rounding)
    }

    /// Convert `quantity` expressed in `from` into `to`.
    ///
    /// Both units must belong to the same category. When `round` is false the
    /// exact converted amount is returned, otherwise it is rounded to `to`'s
    /// rounding step.
    pub fn compute_qty(from: &Uom, quantity: Decimal, to: &Uom, round: bool) -> DomainResult<Decimal> {
        if from.category != to.category {
            return Err(DomainError::validation(format!(
                "cannot convert {} to {}: units belong to different categories",
                from.name, to.name
            )));
        }
        if to.factor.is_zero() {
            return Err(DomainError::validation(format!("unit {} has a zero factor", to.name)));
        }

        let overflow = || {
            DomainError::validation(format!(
                "converting {quantity} {} to {} overflows",
                from.name, to.name
            ))
        };

        let amount = if from.id == to.id {
            quantity
        } else {
            quantity
                .checked_mul(from.factor)
                .and_then(|q| q.checked_div(to.factor))
                .ok_or_else(overflow)?
        };

        if round {
            to.round(amount).ok_or_else(overflow)
        } else {
            Ok(amount)
        }
    }
}

impl Entity for Uom {
    type Id = UomId;

    fn id(&self) -> UomId {
        self.id
    }

    fn rec_name(&self) -> String {
        self.name.clone()
    }
}

/// Lightweight reference to a unit, carried inside move and line snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    pub id: UomId,
    pub symbol: String,
}
