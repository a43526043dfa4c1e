//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// Example:
/// - `MinorUnits(1999)` is a value object
/// - `StoreProduct { id: ProductId(...), .. }` is an entity
///
/// Value objects should be **immutable**: to "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct TaxLocation {
///     country: String,
///     state: String,
/// }
///
/// impl ValueObject for TaxLocation {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
