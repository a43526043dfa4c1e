//! Catalog sync configuration.
//!
//! Passed explicitly into every derivation call; nothing here is process-wide.

use core::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use catalogsync_core::DomainError;
use catalogsync_tax::TaxDisplayMode;

/// Which native description a product falls back to when no override is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionMode {
    #[default]
    Standard,
    Short,
}

impl DescriptionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DescriptionMode::Standard => "standard",
            DescriptionMode::Short => "short",
        }
    }
}

impl core::fmt::Display for DescriptionMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DescriptionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(DescriptionMode::Standard),
            "short" => Ok(DescriptionMode::Short),
            other => Err(DomainError::validation(format!("unknown description mode: {other:?}"))),
        }
    }
}

/// Caller-supplied hook that may replace the configured description mode.
///
/// Receives the configured mode and returns the mode to use for this call.
#[derive(Clone)]
pub struct DescriptionModeFilter(Arc<dyn Fn(DescriptionMode) -> DescriptionMode + Send + Sync>);

impl DescriptionModeFilter {
    pub fn new<F>(filter: F) -> Self
    where
        F: Fn(DescriptionMode) -> DescriptionMode + Send + Sync + 'static,
    {
        Self(Arc::new(filter))
    }

    /// A filter that always yields `mode`.
    pub fn constant(mode: DescriptionMode) -> Self {
        Self::new(move |_| mode)
    }

    pub fn apply(&self, mode: DescriptionMode) -> DescriptionMode {
        (self.0)(mode)
    }
}

impl core::fmt::Debug for DescriptionModeFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DescriptionModeFilter(..)")
    }
}

/// Configuration read by the product facade at call time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub description_mode: DescriptionMode,
    pub tax_display: TaxDisplayMode,
    #[serde(skip)]
    pub description_mode_filter: Option<DescriptionModeFilter>,
}

impl SyncConfig {
    pub const DESCRIPTION_MODE_VAR: &'static str = "CATALOG_DESCRIPTION_MODE";
    pub const TAX_DISPLAY_VAR: &'static str = "CATALOG_TAX_DISPLAY";

    pub fn with_description_mode(mut self, mode: DescriptionMode) -> Self {
        self.description_mode = mode;
        self
    }

    pub fn with_tax_display(mut self, tax_display: TaxDisplayMode) -> Self {
        self.tax_display = tax_display;
        self
    }

    pub fn with_description_mode_filter(mut self, filter: DescriptionModeFilter) -> Self {
        self.description_mode_filter = Some(filter);
        self
    }

    /// The description mode in effect right now: the configured mode passed
    /// through the filter, if one is installed.
    pub fn resolve_description_mode(&self) -> DescriptionMode {
        match &self.description_mode_filter {
            Some(filter) => filter.apply(self.description_mode),
            None => self.description_mode,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or invalid values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            description_mode: parse_or_default(&lookup, Self::DESCRIPTION_MODE_VAR),
            tax_display: parse_or_default(&lookup, Self::TAX_DISPLAY_VAR),
            description_mode_filter: None,
        }
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &str) -> T
where
    T: FromStr<Err = DomainError> + Default + core::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return T::default();
    };

    raw.parse().unwrap_or_else(|err: DomainError| {
        let default = T::default();
        tracing::warn!(key, value = %raw, %default, error = %err, "invalid setting; using default");
        default
    })
}
