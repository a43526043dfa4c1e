use core::str::FromStr;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalogsync_core::{DomainError, DomainResult, Entity, MinorUnits, ProductId};

/// Meta key holding the catalog override price (major units, decimal string).
pub const FB_PRODUCT_PRICE: &str = "fb_product_price";

/// Meta key holding the catalog override description.
pub const FB_PRODUCT_DESCRIPTION: &str = "fb_product_description";

/// Product type as exposed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
    Variable,
    /// A variation of a variable product. The parent is referenced by id only.
    Variation { parent_id: ProductId },
}

/// Snapshot of a store product or variation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProduct {
    id: ProductId,
    kind: ProductKind,
    regular_price: Option<Decimal>,
    sale_price: Option<Decimal>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    meta: BTreeMap<String, String>,
}

impl StoreProduct {
    fn with_kind(id: ProductId, kind: ProductKind) -> Self {
        Self {
            id,
            kind,
            regular_price: None,
            sale_price: None,
            description: String::new(),
            short_description: String::new(),
            meta: BTreeMap::new(),
        }
    }

    pub fn simple(id: ProductId) -> Self {
        Self::with_kind(id, ProductKind::Simple)
    }

    pub fn variable(id: ProductId) -> Self {
        Self::with_kind(id, ProductKind::Variable)
    }

    pub fn variation(id: ProductId, parent_id: ProductId) -> Self {
        Self::with_kind(id, ProductKind::Variation { parent_id })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn is_variation(&self) -> bool {
        matches!(self.kind, ProductKind::Variation { .. })
    }

    pub fn parent_id(&self) -> Option<ProductId> {
        match self.kind {
            ProductKind::Variation { parent_id } => Some(parent_id),
            ProductKind::Simple | ProductKind::Variable => None,
        }
    }

    pub fn regular_price(&self) -> Option<Decimal> {
        self.regular_price
    }

    pub fn sale_price(&self) -> Option<Decimal> {
        self.sale_price
    }

    /// The price a customer pays right now: the sale price when set, else the regular price.
    pub fn active_price(&self) -> Option<Decimal> {
        self.sale_price.or(self.regular_price)
    }

    /// Standard description. On a variation this is the variation's own description.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn set_regular_price(&mut self, price: Option<Decimal>) {
        self.regular_price = price;
    }

    pub fn set_sale_price(&mut self, price: Option<Decimal>) {
        self.sale_price = price;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_short_description(&mut self, short_description: impl Into<String>) {
        self.short_description = short_description.into();
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    pub fn update_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(key.into(), value.into());
    }

    pub fn delete_meta(&mut self, key: &str) -> Option<String> {
        self.meta.remove(key)
    }

    /// Override price stored against this record, if any.
    ///
    /// An empty meta value counts as unset. A value that is not a decimal number is
    /// reported as a validation error.
    pub fn stored_fb_price(&self) -> DomainResult<Option<MinorUnits>> {
        let Some(raw) = self.meta(FB_PRODUCT_PRICE).map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        let major = Decimal::from_str(raw)
            .map_err(|e| DomainError::validation(format!("{FB_PRODUCT_PRICE} {raw:?}: {e}")))?;

        MinorUnits::from_major(major).map(Some)
    }

    /// Store an override price. Reading it back yields exactly `price`.
    pub fn set_fb_price(&mut self, price: MinorUnits) {
        self.update_meta(FB_PRODUCT_PRICE, price.to_major().to_string());
    }

    /// Override description stored against this record, unless blank.
    pub fn fb_description_override(&self) -> Option<&str> {
        self.meta(FB_PRODUCT_DESCRIPTION).filter(|d| !d.trim().is_empty())
    }

    pub fn set_fb_description(&mut self, description: impl Into<String>) {
        self.update_meta(FB_PRODUCT_DESCRIPTION, description);
    }
}

impl Entity for StoreProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn variation_references_parent_by_id() {
        let parent_id = ProductId::new();
        let variation = StoreProduct::variation(ProductId::new(), parent_id);

        assert!(variation.is_variation());
        assert_eq!(variation.parent_id(), Some(parent_id));
        assert_eq!(StoreProduct::simple(ProductId::new()).parent_id(), None);
    }

    #[test]
    fn active_price_prefers_sale_price() {
        let mut product = StoreProduct::simple(ProductId::new());
        assert_eq!(product.active_price(), None);

        product.set_regular_price(Some(dec!(19.99)));
        assert_eq!(product.active_price(), Some(dec!(19.99)));

        product.set_sale_price(Some(dec!(14.99)));
        assert_eq!(product.active_price(), Some(dec!(14.99)));
    }

    #[test]
    fn stored_fb_price_reads_major_units() {
        let mut product = StoreProduct::simple(ProductId::new());
        assert_eq!(product.stored_fb_price().unwrap(), None);

        product.update_meta(FB_PRODUCT_PRICE, "19.99");
        assert_eq!(product.stored_fb_price().unwrap(), Some(MinorUnits::new(1999)));

        product.update_meta(FB_PRODUCT_PRICE, "  ");
        assert_eq!(product.stored_fb_price().unwrap(), None);
    }

    #[test]
    fn stored_fb_price_rejects_garbage() {
        let mut product = StoreProduct::simple(ProductId::new());
        product.update_meta(FB_PRODUCT_PRICE, "nineteen");

        let err = product.stored_fb_price().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains(FB_PRODUCT_PRICE)),
            _ => panic!("Expected Validation error for unparseable price"),
        }
    }

    #[test]
    fn set_fb_price_is_read_back_exactly() {
        let mut product = StoreProduct::simple(ProductId::new());
        product.set_fb_price(MinorUnits::new(2199));

        assert_eq!(product.meta(FB_PRODUCT_PRICE), Some("21.99"));
        assert_eq!(product.stored_fb_price().unwrap(), Some(MinorUnits::new(2199)));
    }

    #[test]
    fn blank_description_override_counts_as_unset() {
        let mut product = StoreProduct::simple(ProductId::new());
        product.set_fb_description("");
        assert_eq!(product.fb_description_override(), None);

        product.set_fb_description(" \n\t ");
        assert_eq!(product.fb_description_override(), None);

        product.set_fb_description("Custom Description.");
        assert_eq!(product.fb_description_override(), Some("Custom Description."));

        product.delete_meta(FB_PRODUCT_DESCRIPTION);
        assert_eq!(product.fb_description_override(), None);
    }
}
