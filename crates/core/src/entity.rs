//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records handed out by the persistence ports (sale orders, lines, moves,
/// shipments) are entities: two snapshots with the same id describe the same
/// record, even if their states differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Human readable name used in user-facing messages.
    fn rec_name(&self) -> String;
}
