//! Table and JSON output.

use serde::Serialize;
use stockroom_core::{InventoryStats, Product, StockBucket};
use stockroom_sync::NotificationSnapshot;
use tracing::error;

/// Prints a value as pretty JSON.
pub fn json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to serialize output: {}", e),
    }
}

/// Prints a product list.
pub fn products(products: &[Product], as_json: bool) {
    if as_json {
        json(&products);
    } else {
        print!("{}", product_table(products));
    }
}

/// Prints the statistics block.
pub fn stats(stats: &InventoryStats, as_json: bool) {
    if as_json {
        json(stats);
    } else {
        print!("{}", stats_block(stats));
    }
}

/// Prints the success banner, if any, to stdout.
pub fn success(notices: &NotificationSnapshot) {
    if let Some(ref notice) = notices.success {
        println!("✓ {}", notice.message);
    }
}

fn bucket_label(bucket: StockBucket) -> &'static str {
    match bucket {
        StockBucket::Low => "low",
        StockBucket::Medium => "medium",
        StockBucket::High => "high",
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

/// Formats products as a fixed-width table.
pub fn product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = format!(
        "{:<38} {:<24} {:<12} {:>8} {:<7} {}\n",
        "ID", "NAME", "SKU", "QTY", "STOCK", "DESCRIPTION"
    );
    for p in products {
        out.push_str(&format!(
            "{:<38} {:<24} {:<12} {:>8} {:<7} {}\n",
            clip(p.id.as_str(), 38),
            clip(&p.name, 24),
            clip(&p.sku, 12),
            p.quantity,
            bucket_label(p.bucket()),
            clip(&p.description, 40),
        ));
    }
    out
}

/// Formats statistics as aligned lines.
pub fn stats_block(stats: &InventoryStats) -> String {
    format!(
        "Total products: {}\nTotal stock:    {}\nLow stock:      {}\nMedium stock:   {}\nHigh stock:     {}\n",
        stats.total_products,
        stats.total_stock,
        stats.low_stock_count,
        stats.medium_stock_count,
        stats.high_stock_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ProductId;

    #[test]
    fn test_empty_table() {
        assert_eq!(product_table(&[]), "No products found.\n");
    }

    #[test]
    fn test_table_rows() {
        let table = product_table(&[
            Product::new(ProductId::from("1"), "Widget", "W1", 5, "desc"),
            Product::new(ProductId::from("2"), "Gadget", "G1", 51, ""),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Widget") && lines[1].contains("low"));
        assert!(lines[2].contains("high"));
    }

    #[test]
    fn test_clip_long_text() {
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("abc", 4), "abc");
    }

    #[test]
    fn test_stats_block() {
        let stats = InventoryStats::from_products(&[Product::new(
            ProductId::from("1"),
            "Widget",
            "W1",
            12,
            "",
        )]);
        let block = stats_block(&stats);
        assert!(block.contains("Total products: 1"));
        assert!(block.contains("Medium stock:   1"));
    }
}
