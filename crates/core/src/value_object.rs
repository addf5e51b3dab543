//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attributes,
/// e.g. a `(quantity, unit)` pair used to override a copied sale line.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
