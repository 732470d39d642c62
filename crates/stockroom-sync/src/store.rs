//! # Product Store
//!
//! The local copy of the backend's product collection.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product Store Access                               │
//! │                                                                         │
//! │  SyncEngine::fetch_all ──────► replace_all(products)   (only writer)   │
//! │                                                                         │
//! │  FilterView / Stats ─────────► with_products(|p| ...)  (read only)     │
//! │  Snapshots ──────────────────► snapshot()              (cloned Vec)    │
//! │                                                                         │
//! │  The order is the backend's response order. Nothing here sorts,        │
//! │  patches or merges: a refetch replaces the whole collection.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The handle is cheap to clone; clones share the same collection. The lock
//! is held only for the duration of a closure and never across an `.await`.

use std::sync::{Arc, PoisonError, RwLock};

use stockroom_core::{Product, ProductId};
use tracing::debug;

/// Shared handle to the product collection.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with a fresh backend response.
    pub(crate) fn replace_all(&self, products: Vec<Product>) {
        let count = products.len();
        let mut guard = self.products.write().unwrap_or_else(PoisonError::into_inner);
        *guard = products;
        debug!(count, "Product store replaced");
    }

    /// Executes a function with read access to the collection.
    pub fn with_products<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Product]) -> R,
    {
        let guard = self.products.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Returns a copy of the collection in backend order.
    pub fn snapshot(&self) -> Vec<Product> {
        self.with_products(<[Product]>::to_vec)
    }

    /// Looks up one product by id.
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.with_products(|products| products.iter().find(|p| &p.id == id).cloned())
    }

    /// Number of products held.
    pub fn len(&self) -> usize {
        self.with_products(<[Product]>::len)
    }

    /// True when no products are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, qty: i64) -> Product {
        Product::new(ProductId::from(id), format!("P{}", id), format!("S{}", id), qty, "")
    }

    #[test]
    fn test_replace_all_keeps_backend_order() {
        let store = ProductStore::new();
        assert!(store.is_empty());

        store.replace_all(vec![product("b", 1), product("a", 2)]);
        let ids: Vec<_> = store.snapshot().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::from("b"), ProductId::from("a")]);

        store.replace_all(vec![product("c", 3)]);
        assert_eq!(store.len(), 1);
        assert!(store.get(&ProductId::from("a")).is_none());
    }

    #[test]
    fn test_clones_share_collection() {
        let store = ProductStore::new();
        let view = store.clone();
        store.replace_all(vec![product("1", 4)]);
        assert_eq!(view.get(&ProductId::from("1")).map(|p| p.quantity), Some(4));
    }
}
