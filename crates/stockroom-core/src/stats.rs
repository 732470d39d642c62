//! # Stock Statistics
//!
//! Summary numbers for the dashboard header, recomputed on every read.
//! Nothing here is stored: a stored counter could drift from the store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, StockBucket};

/// Inventory totals derived from a product collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryStats {
    /// Number of products in the collection.
    pub total_products: usize,
    /// Sum of all quantities, saturating at the `i64` bounds.
    pub total_stock: i64,
    /// Products with `quantity <= 10`.
    pub low_stock_count: usize,
    /// Products with `10 < quantity <= 50`.
    pub medium_stock_count: usize,
    /// Products with `quantity > 50`.
    pub high_stock_count: usize,
}

impl InventoryStats {
    /// Computes the totals in a single pass.
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(InventoryStats::default(), |mut stats, product| {
            stats.total_products += 1;
            stats.total_stock = stats.total_stock.saturating_add(product.quantity);
            match product.bucket() {
                StockBucket::Low => stats.low_stock_count += 1,
                StockBucket::Medium => stats.medium_stock_count += 1,
                StockBucket::High => stats.high_stock_count += 1,
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    #[test]
    fn test_empty_collection() {
        assert_eq!(InventoryStats::from_products(&[]), InventoryStats::default());
    }

    #[test]
    fn test_totals_and_buckets() {
        let products = vec![
            Product::new(ProductId::from("1"), "A", "A", 10, ""),
            Product::new(ProductId::from("2"), "B", "B", 11, ""),
            Product::new(ProductId::from("3"), "C", "C", 50, ""),
            Product::new(ProductId::from("4"), "D", "D", 51, ""),
        ];
        let stats = InventoryStats::from_products(&products);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.total_stock, 122);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.medium_stock_count, 2);
        assert_eq!(stats.high_stock_count, 1);
        assert_eq!(
            stats.low_stock_count + stats.medium_stock_count + stats.high_stock_count,
            stats.total_products
        );
    }

    #[test]
    fn test_total_stock_saturates() {
        let products = vec![
            Product::new(ProductId::from("1"), "A", "A", i64::MAX, ""),
            Product::new(ProductId::from("2"), "B", "B", 1, ""),
        ];
        let stats = InventoryStats::from_products(&products);
        assert_eq!(stats.total_stock, i64::MAX);
        assert_eq!(stats.high_stock_count, 1);
        assert_eq!(stats.low_stock_count, 1);

        let products = vec![
            Product::new(ProductId::from("1"), "A", "A", i64::MIN, ""),
            Product::new(ProductId::from("2"), "B", "B", -1, ""),
        ];
        assert_eq!(InventoryStats::from_products(&products).total_stock, i64::MIN);
    }
}
