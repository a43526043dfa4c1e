use rust_decimal::Decimal;
use serde::Serialize;

use catalogsync_core::{DomainError, DomainResult, ValueObject};

use crate::options::TaxLocation;

/// A single configured tax rate.
///
/// `rate` is a percentage (`10` means 10 %). Empty `country`/`state` match every
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxRate {
    name: String,
    rate: Decimal,
    country: String,
    state: String,
    priority: u32,
    compound: bool,
    order: u32,
}

impl TaxRate {
    /// Create a non-compound rate matching every location, at priority 1.
    pub fn new(name: impl Into<String>, rate: Decimal) -> DomainResult<Self> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(DomainError::validation(format!("tax rate cannot be negative: {rate}")));
        }

        Ok(Self {
            name: name.into(),
            rate,
            country: String::new(),
            state: String::new(),
            priority: 1,
            compound: false,
            order: 0,
        })
    }

    pub fn with_location(mut self, country: impl Into<String>, state: impl Into<String>) -> Self {
        self.country = country.into();
        self.state = state.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Compound rates are charged on top of the price plus previously applied taxes.
    pub fn compound(mut self) -> Self {
        self.compound = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn is_compound(&self) -> bool {
        self.compound
    }

    /// Rate as a fraction (`10` -> `0.1`).
    pub fn fraction(&self) -> Decimal {
        self.rate / Decimal::ONE_HUNDRED
    }

    pub fn matches(&self, location: &TaxLocation) -> bool {
        let country_ok = self.country.is_empty() || self.country.eq_ignore_ascii_case(&location.country);
        let state_ok = self.state.is_empty() || self.state.eq_ignore_ascii_case(&location.state);
        country_ok && state_ok
    }
}

impl ValueObject for TaxRate {}

/// The active set of tax rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxRateTable {
    rates: Vec<TaxRate>,
}

impl TaxRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rate: TaxRate) {
        self.rates.push(rate);
    }

    pub fn with_rate(mut self, rate: TaxRate) -> Self {
        self.insert(rate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn rates(&self) -> &[TaxRate] {
        &self.rates
    }

    /// Rates that apply at `location`, ordered by priority.
    ///
    /// At most one rate is selected per priority: the first matching one by `order`.
    pub fn matching(&self, location: &TaxLocation) -> Vec<&TaxRate> {
        let mut candidates: Vec<&TaxRate> = self.rates.iter().filter(|r| r.matches(location)).collect();
        candidates.sort_by_key(|r| (r.priority, r.order));
        candidates.dedup_by_key(|r| r.priority);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn location(country: &str, state: &str) -> TaxLocation {
        TaxLocation {
            country: country.to_string(),
            state: state.to_string(),
        }
    }

    #[test]
    fn new_rejects_negative_rates() {
        let err = TaxRate::new("BAD", dec!(-1)).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for negative rate"),
        }
    }

    #[test]
    fn blank_location_matches_everywhere() {
        let rate = TaxRate::new("TEST", dec!(10)).unwrap();
        assert!(rate.matches(&location("", "")));
        assert!(rate.matches(&location("US", "CA")));
    }

    #[test]
    fn country_and_state_must_match_when_set() {
        let rate = TaxRate::new("CA", dec!(7.25)).unwrap().with_location("US", "CA");
        assert!(rate.matches(&location("us", "ca")));
        assert!(!rate.matches(&location("US", "NY")));
        assert!(!rate.matches(&location("", "")));
    }

    #[test]
    fn matching_keeps_first_rate_per_priority() {
        let table = TaxRateTable::new()
            .with_rate(TaxRate::new("B", dec!(5)).unwrap().with_order(2))
            .with_rate(TaxRate::new("A", dec!(10)).unwrap().with_order(1))
            .with_rate(TaxRate::new("C", dec!(2)).unwrap().with_priority(2));

        let names: Vec<&str> = table.matching(&location("", "")).iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn builder_sets_rate_attributes() {
        let rate = TaxRate::new("QST", dec!(9.975)).unwrap().with_priority(2).compound();

        assert_eq!(rate.name(), "QST");
        assert_eq!(rate.rate(), dec!(9.975));
        assert_eq!(rate.priority(), 2);
        assert!(rate.is_compound());
    }

    #[test]
    fn table_keeps_inserted_rates() {
        let mut table = TaxRateTable::new();
        assert!(table.is_empty());

        table.insert(TaxRate::new("TEST", dec!(10)).unwrap());
        assert!(!table.is_empty());
        assert_eq!(table.rates().len(), 1);
        assert_eq!(table.rates()[0].name(), "TEST");
    }

    #[test]
    fn fraction_converts_percentages() {
        assert_eq!(TaxRate::new("TEST", dec!(10)).unwrap().fraction(), dec!(0.1));
    }
}
