//! Products and units of measure.
//!
//! Only the parts of the product catalogue the sales rules read: a product's
//! sale unit and the unit conversion used when re-aggregating stock moves.

pub mod product;
pub mod uom;

pub use product::{Product, ProductId, ProductRef};
pub use uom::{Uom, UomCategoryId, UomId, UnitRef};
