use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use catalogsync_core::{DomainError, DomainResult, ProductId};

use crate::product::StoreProduct;

/// Read access to the e-commerce store's product records.
///
/// The store owns the records; callers get snapshots.
pub trait ProductStore: Send + Sync {
    fn get(&self, id: &ProductId) -> Option<StoreProduct>;
    fn upsert(&self, product: StoreProduct);
    /// Variations whose parent is `parent_id`.
    fn children_of(&self, parent_id: &ProductId) -> Vec<StoreProduct>;

    /// Load a record, failing with `NotFound` when the id is unknown.
    fn load(&self, id: &ProductId) -> DomainResult<StoreProduct> {
        self.get(id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    /// Parent record of a variation; `None` for any other product kind.
    fn parent_of(&self, product: &StoreProduct) -> DomainResult<Option<StoreProduct>> {
        product.parent_id().map(|parent_id| self.load(&parent_id)).transpose()
    }
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn get(&self, id: &ProductId) -> Option<StoreProduct> {
        (**self).get(id)
    }

    fn upsert(&self, product: StoreProduct) {
        (**self).upsert(product)
    }

    fn children_of(&self, parent_id: &ProductId) -> Vec<StoreProduct> {
        (**self).children_of(parent_id)
    }
}

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, StoreProduct>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn get(&self, id: &ProductId) -> Option<StoreProduct> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn upsert(&self, product: StoreProduct) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(product.id_typed(), product);
        }
    }

    fn children_of(&self, parent_id: &ProductId) -> Vec<StoreProduct> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut children: Vec<StoreProduct> = map
            .values()
            .filter(|p| p.parent_id() == Some(*parent_id))
            .cloned()
            .collect();
        children.sort_by_key(StoreProduct::id_typed);
        children
    }
}
