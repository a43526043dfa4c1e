//! Store products as seen by the external catalog.
//!
//! This crate derives catalog price and description from store product records,
//! implemented as deterministic logic over a `ProductStore` and a `TaxEngine`.

pub mod config;
pub mod facebook;
pub mod product;
pub mod store;

pub use config::{DescriptionMode, DescriptionModeFilter, SyncConfig};
pub use facebook::FacebookProduct;
pub use product::{FB_PRODUCT_DESCRIPTION, FB_PRODUCT_PRICE, ProductKind, StoreProduct};
pub use store::{InMemoryProductStore, ProductStore};
