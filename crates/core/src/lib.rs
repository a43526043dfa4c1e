//! `catalogsync-core` — shared building blocks for catalog sync.
//!
//! This crate contains **pure domain** primitives (no store or tax concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use money::MinorUnits;
pub use value_object::ValueObject;
