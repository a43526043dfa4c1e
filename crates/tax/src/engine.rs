use std::sync::Arc;

use rust_decimal::Decimal;

use crate::options::{TaxDisplayMode, TaxOptions};
use crate::rate::{TaxRate, TaxRateTable};

/// Supplies the price to display for a base price under a tax display mode.
pub trait TaxEngine: Send + Sync {
    /// `base_price` is in major units, as entered in the store.
    fn adjusted_price(&self, base_price: Decimal, display_mode: TaxDisplayMode) -> Decimal;
}

impl<T> TaxEngine for Arc<T>
where
    T: TaxEngine + ?Sized,
{
    fn adjusted_price(&self, base_price: Decimal, display_mode: TaxDisplayMode) -> Decimal {
        (**self).adjusted_price(base_price, display_mode)
    }
}

/// Rate-table backed tax engine.
///
/// No rounding happens here; callers round once when converting to minor units.
#[derive(Debug, Clone, Default)]
pub struct StandardTaxEngine {
    rates: TaxRateTable,
    options: TaxOptions,
}

impl StandardTaxEngine {
    pub fn new(rates: TaxRateTable, options: TaxOptions) -> Self {
        Self { rates, options }
    }

    pub fn rates(&self) -> &TaxRateTable {
        &self.rates
    }

    pub fn options(&self) -> &TaxOptions {
        &self.options
    }

    fn applicable_rates(&self) -> Vec<&TaxRate> {
        if !self.options.calc_taxes {
            return Vec::new();
        }
        self.rates.matching(&self.options.location)
    }
}

impl TaxEngine for StandardTaxEngine {
    fn adjusted_price(&self, base_price: Decimal, display_mode: TaxDisplayMode) -> Decimal {
        let rates = self.applicable_rates();
        if rates.is_empty() {
            return base_price;
        }

        let adjusted = match (self.options.prices_include_tax, display_mode) {
            (false, TaxDisplayMode::Inclusive) => base_price + exclusive_tax(base_price, &rates),
            (true, TaxDisplayMode::Exclusive) => base_price - inclusive_tax(base_price, &rates),
            (false, TaxDisplayMode::Exclusive) | (true, TaxDisplayMode::Inclusive) => base_price,
        };

        tracing::debug!(
            %base_price,
            %adjusted,
            display_mode = %display_mode,
            rates = rates.len(),
            "tax-adjusted price"
        );

        adjusted
    }
}

/// Tax to add on top of a price entered exclusive of tax.
///
/// Regular rates apply to the price; compound rates apply to the price plus every
/// tax accumulated before them.
fn exclusive_tax(price: Decimal, rates: &[&TaxRate]) -> Decimal {
    let regular: Decimal = rates
        .iter()
        .filter(|r| !r.is_compound())
        .map(|r| price * r.fraction())
        .sum();

    rates
        .iter()
        .filter(|r| r.is_compound())
        .fold(regular, |taxes, r| taxes + (price + taxes) * r.fraction())
}

/// Tax contained in a price entered inclusive of tax.
fn inclusive_tax(price: Decimal, rates: &[&TaxRate]) -> Decimal {
    let mut non_compound_price = price;
    let mut taxes = Decimal::ZERO;

    for rate in rates.iter().rev().filter(|r| r.is_compound()) {
        let tax = non_compound_price - non_compound_price / (Decimal::ONE + rate.fraction());
        taxes += tax;
        non_compound_price -= tax;
    }

    let regular_sum: Decimal = rates
        .iter()
        .filter(|r| !r.is_compound())
        .map(|r| r.fraction())
        .sum();

    taxes + non_compound_price - non_compound_price / (Decimal::ONE + regular_sum)
}
