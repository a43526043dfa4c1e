//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Store records (products, variations) are entities: two snapshots with the same
/// id describe the same record, even if their fields differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
