//! Catalog view of a store product.
//!
//! `FacebookProduct` derives the price and description reported to the external
//! catalog. It is a transient read view: build one per call, drop it afterwards.

use catalogsync_core::{DomainResult, Entity, MinorUnits, ProductId};
use catalogsync_tax::TaxEngine;

use crate::config::{DescriptionMode, SyncConfig};
use crate::product::StoreProduct;
use crate::store::ProductStore;

/// Read view over a product (or variation) and, for variations, its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookProduct {
    product: StoreProduct,
    parent: Option<StoreProduct>,
}

impl FacebookProduct {
    /// Wrap an already loaded record. `parent` is only consulted for variations.
    pub fn new(product: StoreProduct, parent: Option<StoreProduct>) -> Self {
        Self { product, parent }
    }

    /// Load a record and, when it is a variation, its parent.
    pub fn load<S>(store: &S, id: &ProductId) -> DomainResult<Self>
    where
        S: ProductStore + ?Sized,
    {
        let product = store.load(id)?;
        let parent = store.parent_of(&product)?;
        Ok(Self::new(product, parent))
    }

    pub fn id(&self) -> &ProductId {
        self.product.id()
    }

    pub fn product(&self) -> &StoreProduct {
        &self.product
    }

    pub fn parent(&self) -> Option<&StoreProduct> {
        self.parent.as_ref()
    }

    /// Price to report, in minor currency units.
    ///
    /// Best-effort form of [`FacebookProduct::try_fb_price`]: a price that cannot be
    /// expressed in minor units is logged and reported as zero.
    pub fn fb_price(&self, tax: &dyn TaxEngine, config: &SyncConfig) -> MinorUnits {
        self.try_fb_price(tax, config).unwrap_or_else(|err| {
            tracing::error!(product_id = %self.id(), error = %err, "catalog price out of range");
            MinorUnits::ZERO
        })
    }

    /// Price to report, in minor currency units.
    ///
    /// A stored override price is returned as-is: no tax adjustment is applied to it,
    /// whatever the tax configuration. Otherwise the active price is tax-adjusted for
    /// `config.tax_display` and rounded half away from zero. Fails with `Validation`
    /// when the adjusted price does not fit in minor units.
    pub fn try_fb_price(&self, tax: &dyn TaxEngine, config: &SyncConfig) -> DomainResult<MinorUnits> {
        match self.product.stored_fb_price() {
            Ok(Some(stored)) => {
                tracing::debug!(product_id = %self.id(), %stored, "using stored catalog price");
                return Ok(stored);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(product_id = %self.id(), error = %err, "ignoring unreadable stored catalog price");
            }
        }

        let Some(price) = self.product.active_price() else {
            return Ok(MinorUnits::ZERO);
        };

        MinorUnits::from_major(tax.adjusted_price(price, config.tax_display))
    }

    /// Description to report.
    ///
    /// First match wins: override description, the variation's own description,
    /// then the mode-selected description of the owning product (the parent for a
    /// variation). Empty when nothing is set anywhere.
    pub fn fb_description(&self, config: &SyncConfig) -> String {
        if let Some(custom) = self.product.fb_description_override() {
            return custom.to_string();
        }

        if self.product.is_variation() && !is_blank(self.product.description()) {
            return self.product.description().to_string();
        }

        let mode = config.resolve_description_mode();

        let owner = match (&self.parent, self.product.is_variation()) {
            (Some(parent), true) => {
                if let Some(custom) = parent.fb_description_override() {
                    return custom.to_string();
                }
                parent
            }
            (None, true) => {
                tracing::debug!(product_id = %self.id(), "variation without parent record; using its own fields");
                &self.product
            }
            (_, false) => &self.product,
        };

        mode_selected_description(owner, mode).to_string()
    }
}

/// The native description picked by `mode`, falling back to the other field when blank.
fn mode_selected_description(product: &StoreProduct, mode: DescriptionMode) -> &str {
    let (preferred, fallback) = match mode {
        DescriptionMode::Standard => (product.description(), product.short_description()),
        DescriptionMode::Short => (product.short_description(), product.description()),
    };

    [preferred, fallback]
        .into_iter()
        .find(|d| !is_blank(d))
        .unwrap_or_default()
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
