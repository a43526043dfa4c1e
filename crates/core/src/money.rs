//! Money in minor currency units (e.g. cents).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Number of decimal places between major and minor units.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// An amount in the smallest currency unit (e.g. 1999 for 19.99).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub const ZERO: MinorUnits = MinorUnits(0);

    pub fn new(amount: i64) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    /// Convert a major-unit amount, rounding half away from zero.
    ///
    /// `21.989` becomes `2199`, `19.995` becomes `2000`.
    pub fn from_major(major: Decimal) -> DomainResult<Self> {
        let scaled = major
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| DomainError::validation(format!("amount {major} is out of range")))?;

        scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
            .ok_or_else(|| DomainError::validation(format!("amount {major} is out of range")))
    }

    /// The exact major-unit representation (`1999` -> `19.99`).
    pub fn to_major(self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }
}

impl ValueObject for MinorUnits {}

impl core::fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<MinorUnits> for i64 {
    fn from(value: MinorUnits) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn from_major_rounds_half_away_from_zero() {
        assert_eq!(MinorUnits::from_major(dec!(21.989)).unwrap(), MinorUnits::new(2199));
        assert_eq!(MinorUnits::from_major(dec!(19.99)).unwrap(), MinorUnits::new(1999));
        assert_eq!(MinorUnits::from_major(dec!(0.005)).unwrap(), MinorUnits::new(1));
        assert_eq!(MinorUnits::from_major(dec!(-0.005)).unwrap(), MinorUnits::new(-1));
        assert_eq!(MinorUnits::from_major(dec!(0.004)).unwrap(), MinorUnits::ZERO);
    }

    #[test]
    fn from_major_rejects_amounts_beyond_i64() {
        let err = MinorUnits::from_major(Decimal::MAX).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for out-of-range amount"),
        }
    }

    #[test]
    fn to_major_keeps_two_decimal_places() {
        assert_eq!(MinorUnits::new(1999).to_major().to_string(), "19.99");
        assert_eq!(MinorUnits::new(500).to_major().to_string(), "5.00");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: minor -> major -> minor is lossless.
            #[test]
            fn major_representation_is_exact(amount in -1_000_000_000i64..1_000_000_000i64) {
                let minor = MinorUnits::new(amount);
                prop_assert_eq!(MinorUnits::from_major(minor.to_major()).unwrap(), minor);
            }
        }
    }
}
