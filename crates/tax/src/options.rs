use core::str::FromStr;
use serde::{Deserialize, Serialize};

use catalogsync_core::{DomainError, ValueObject};

/// Whether prices shown to the integrator include or exclude tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxDisplayMode {
    #[serde(rename = "incl")]
    Inclusive,
    #[default]
    #[serde(rename = "excl")]
    Exclusive,
}

impl TaxDisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxDisplayMode::Inclusive => "incl",
            TaxDisplayMode::Exclusive => "excl",
        }
    }
}

impl core::fmt::Display for TaxDisplayMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxDisplayMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incl" | "inclusive" => Ok(TaxDisplayMode::Inclusive),
            "excl" | "exclusive" => Ok(TaxDisplayMode::Exclusive),
            other => Err(DomainError::validation(format!("unknown tax display mode: {other:?}"))),
        }
    }
}

/// Location used to select tax rates (the store base location).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxLocation {
    pub country: String,
    pub state: String,
}

impl ValueObject for TaxLocation {}

/// Store-wide tax options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxOptions {
    /// When false, no rate is ever applied.
    pub calc_taxes: bool,
    /// Whether catalog prices were entered inclusive of tax.
    pub prices_include_tax: bool,
    pub location: TaxLocation,
}

impl Default for TaxOptions {
    fn default() -> Self {
        Self {
            calc_taxes: true,
            prices_include_tax: false,
            location: TaxLocation::default(),
        }
    }
}

impl TaxOptions {
    pub const CALC_TAXES_VAR: &'static str = "CATALOG_CALC_TAXES";
    pub const PRICES_INCLUDE_TAX_VAR: &'static str = "CATALOG_PRICES_INCLUDE_TAX";
    pub const COUNTRY_VAR: &'static str = "CATALOG_TAX_COUNTRY";
    pub const STATE_VAR: &'static str = "CATALOG_TAX_STATE";

    /// Read options from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read options through `lookup`; unset or invalid values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            calc_taxes: flag(&lookup, Self::CALC_TAXES_VAR, defaults.calc_taxes),
            prices_include_tax: flag(&lookup, Self::PRICES_INCLUDE_TAX_VAR, defaults.prices_include_tax),
            location: TaxLocation {
                country: lookup(Self::COUNTRY_VAR).unwrap_or_default(),
                state: lookup(Self::STATE_VAR).unwrap_or_default(),
            },
        }
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "on" => true,
        "no" | "false" | "0" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, default, "invalid boolean setting; using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn display_mode_parses_platform_codes() {
        assert_eq!("incl".parse::<TaxDisplayMode>().unwrap(), TaxDisplayMode::Inclusive);
        assert_eq!("excl".parse::<TaxDisplayMode>().unwrap(), TaxDisplayMode::Exclusive);
        assert_eq!(" Inclusive ".parse::<TaxDisplayMode>().unwrap(), TaxDisplayMode::Inclusive);
        assert!("gross".parse::<TaxDisplayMode>().is_err());
    }

    #[test]
    fn display_mode_defaults_to_exclusive() {
        assert_eq!(TaxDisplayMode::default(), TaxDisplayMode::Exclusive);
    }

    #[test]
    fn from_lookup_reads_platform_style_flags() {
        let options = TaxOptions::from_lookup(lookup_from(&[
            ("CATALOG_CALC_TAXES", "no"),
            ("CATALOG_PRICES_INCLUDE_TAX", "yes"),
            ("CATALOG_TAX_COUNTRY", "GB"),
        ]));

        assert!(!options.calc_taxes);
        assert!(options.prices_include_tax);
        assert_eq!(options.location.country, "GB");
        assert_eq!(options.location.state, "");
    }

    #[test]
    fn from_lookup_keeps_defaults_for_invalid_flags() {
        let options = TaxOptions::from_lookup(lookup_from(&[("CATALOG_CALC_TAXES", "maybe")]));
        assert_eq!(options, TaxOptions::default());
    }
}
