//! # Filtered View
//!
//! Derives the list the rendering layer displays from the full collection.
//!
//! ## Pipeline
//! ```text
//! ProductStore order ──► search predicate ──► bucket predicate ──► view
//!                        (name | sku |        (all / low /
//!                         description,         medium / high)
//!                         case-insensitive)
//! ```
//!
//! The view is recomputed from scratch on every read. There is no cache and
//! no index: collections are expected to be small, and a cached view could
//! drift from the store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, StockFilter};
use crate::validation::normalize_search;

/// Returns the products matching `search` and `bucket`, in store order.
///
/// The output is always a subsequence of `products`.
pub fn derive<'a>(products: &'a [Product], search: &str, bucket: StockFilter) -> Vec<&'a Product> {
    let needle = normalize_search(search);
    products
        .iter()
        .filter(|product| product.matches_search(&needle))
        .filter(|product| bucket.admits(product.quantity))
        .collect()
}

/// Current view criteria: the search box text and the bucket selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterView {
    /// Raw search text as typed.
    pub search: String,
    /// Stock bucket selector.
    pub bucket: StockFilter,
}

impl FilterView {
    /// Creates a view with the given criteria.
    pub fn new(search: impl Into<String>, bucket: StockFilter) -> Self {
        FilterView {
            search: search.into(),
            bucket,
        }
    }

    /// Applies the criteria to a collection.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        derive(products, &self.search, self.bucket)
    }

    /// True when the view shows the whole collection.
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty() && self.bucket == StockFilter::All
    }
}
