//! Tax adapter for catalog sync.
//!
//! Supplies tax-inclusive/exclusive unit prices for a base price, given the active
//! tax rate table and tax options. Pure computation, no IO.

pub mod engine;
pub mod options;
pub mod rate;

pub use engine::{StandardTaxEngine, TaxEngine};
pub use options::{TaxDisplayMode, TaxLocation, TaxOptions};
pub use rate::{TaxRate, TaxRateTable};
