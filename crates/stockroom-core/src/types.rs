//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   DraftForm     │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  name (text)    │   │  name?          │       │
//! │  │  name           │   │  sku (text)     │   │  sku?           │       │
//! │  │  sku            │   │  quantity (text)│   │  quantity?      │       │
//! │  │  quantity       │   │  description    │   │  description?   │       │
//! │  │  description    │   │                 │   │                 │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │ validate_draft                        │
//! │                                 ▼                                       │
//! │                        ┌─────────────────┐                              │
//! │                        │   NewProduct    │  POST /products body         │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   EditField     │   │  StockBucket    │   │  StockFilter    │       │
//! │  │  Quantity       │   │  Low  (≤10)     │   │  All            │       │
//! │  │  Sku            │   │  Medium (≤50)   │   │  LowStock ...   │       │
//! │  │  Description    │   │  High (>50)     │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the backend and never generated here. The client only
//! ever reflects what the backend returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{parse_quantity, ValidationResult};
use crate::{LOW_STOCK_MAX, MEDIUM_STOCK_MAX};

// =============================================================================
// Product ID
// =============================================================================

/// Opaque product identifier assigned by the backend.
///
/// Backends disagree on whether ids are JSON strings or numbers, so both are
/// accepted and held as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Returns the id as text (used for URL path segments).
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => ProductId(text),
            RawId::Number(number) => ProductId(number.to_string()),
        })
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// One inventory line as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Server-assigned identifier, immutable after creation.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Stock Keeping Unit. Unique by convention only.
    #[serde(default)]
    pub sku: String,

    /// Units on hand.
    pub quantity: i64,

    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Builds a product value (tests, fixtures, mock backends).
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        sku: impl Into<String>,
        quantity: i64,
        description: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            sku: sku.into(),
            quantity,
            description: description.into(),
        }
    }

    /// Returns the stock bucket this product falls into.
    #[inline]
    pub fn bucket(&self) -> StockBucket {
        StockBucket::of(self.quantity)
    }

    /// Checks whether `needle` occurs in name, SKU or description.
    ///
    /// `needle` must already be lowercased; an empty needle always matches.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.sku.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Applies a patch, returning the merged product.
    ///
    /// The client never patches its own store; this is what a backend does
    /// on `PUT /products/{id}`.
    pub fn merged(&self, patch: &ProductPatch) -> Product {
        Product {
            id: self.id.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            sku: patch.sku.clone().unwrap_or_else(|| self.sku.clone()),
            quantity: patch.quantity.unwrap_or(self.quantity),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
        }
    }
}

// =============================================================================
// New Product (create request body)
// =============================================================================

/// Normalized body of `POST /products`.
///
/// Produced only by [`crate::validation::validate_draft`]: strings trimmed,
/// quantity parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub description: String,
}

impl NewProduct {
    /// Materializes the product a backend would store under `id`.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            sku: self.sku,
            quantity: self.quantity,
            description: self.description,
        }
    }
}

// =============================================================================
// Product Patch (update request body)
// =============================================================================

/// Partial body of `PUT /products/{id}`.
///
/// Only the fields that are `Some` are serialized; the backend merges them
/// into the stored entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductPatch {
    /// Patch that changes only the quantity.
    pub fn quantity(quantity: i64) -> Self {
        ProductPatch {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// Patch that changes only the SKU.
    pub fn sku(sku: impl Into<String>) -> Self {
        ProductPatch {
            sku: Some(sku.into()),
            ..Default::default()
        }
    }

    /// Patch that changes only the description.
    pub fn description(description: impl Into<String>) -> Self {
        ProductPatch {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Draft Form
// =============================================================================

/// Raw add-form input, kept as text until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DraftForm {
    pub name: String,
    pub sku: String,
    /// Free text; parsed only when the draft is submitted.
    pub quantity: String,
    pub description: String,
}

impl DraftForm {
    /// Builds a draft from form text.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        quantity: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        DraftForm {
            name: name.into(),
            sku: sku.into(),
            quantity: quantity.into(),
            description: description.into(),
        }
    }

    /// Resets every field to empty text.
    pub fn clear(&mut self) {
        *self = DraftForm::default();
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.sku.is_empty()
            && self.quantity.is_empty()
            && self.description.is_empty()
    }
}

// =============================================================================
// Edit Field
// =============================================================================

/// Field targeted by an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Quantity,
    Sku,
    Description,
}

impl EditField {
    /// Reads this field from a product as modal text.
    pub fn current_value(&self, product: &Product) -> String {
        match self {
            EditField::Quantity => product.quantity.to_string(),
            EditField::Sku => product.sku.clone(),
            EditField::Description => product.description.clone(),
        }
    }

    /// Turns the modal's candidate text into a single-field patch.
    ///
    /// Quantity is read by [`parse_quantity`], so "12.5" sends 12; negative
    /// values are passed through for the backend to judge. Text fields are sent as typed.
    pub fn build_patch(&self, candidate: &str) -> ValidationResult<ProductPatch> {
        Ok(match self {
            EditField::Quantity => ProductPatch::quantity(parse_quantity(candidate)?),
            EditField::Sku => ProductPatch::sku(candidate),
            EditField::Description => ProductPatch::description(candidate),
        })
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditField::Quantity => write!(f, "quantity"),
            EditField::Sku => write!(f, "sku"),
            EditField::Description => write!(f, "description"),
        }
    }
}

impl FromStr for EditField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quantity" | "qty" => Ok(EditField::Quantity),
            "sku" => Ok(EditField::Sku),
            "description" | "desc" => Ok(EditField::Description),
            other => Err(ValidationError::UnknownOption {
                field: "field".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Stock Buckets
// =============================================================================

/// Stock-level classification of a single quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockBucket {
    /// `quantity <= 10`
    Low,
    /// `10 < quantity <= 50`
    Medium,
    /// `quantity > 50`
    High,
}

impl StockBucket {
    /// Classifies a quantity.
    pub fn of(quantity: i64) -> Self {
        if quantity <= LOW_STOCK_MAX {
            StockBucket::Low
        } else if quantity <= MEDIUM_STOCK_MAX {
            StockBucket::Medium
        } else {
            StockBucket::High
        }
    }
}

/// Bucket selector applied by the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum StockFilter {
    #[default]
    All,
    LowStock,
    MediumStock,
    HighStock,
}

impl StockFilter {
    /// Checks whether a quantity passes this selector.
    pub fn admits(&self, quantity: i64) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::LowStock => StockBucket::of(quantity) == StockBucket::Low,
            StockFilter::MediumStock => StockBucket::of(quantity) == StockBucket::Medium,
            StockFilter::HighStock => StockBucket::of(quantity) == StockBucket::High,
        }
    }
}

impl fmt::Display for StockFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockFilter::All => write!(f, "all"),
            StockFilter::LowStock => write!(f, "low-stock"),
            StockFilter::MediumStock => write!(f, "medium-stock"),
            StockFilter::HighStock => write!(f, "high-stock"),
        }
    }
}

impl FromStr for StockFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(StockFilter::All),
            "low-stock" | "low" => Ok(StockFilter::LowStock),
            "medium-stock" | "medium" => Ok(StockFilter::MediumStock),
            "high-stock" | "high" => Ok(StockFilter::HighStock),
            other => Err(ValidationError::UnknownOption {
                field: "bucket".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_accepts_string_and_number() {
        let from_text: Product =
            serde_json::from_str(r#"{"id":"abc","name":"A","sku":"S","quantity":1,"description":""}"#)
                .unwrap();
        assert_eq!(from_text.id.as_str(), "abc");

        let from_number: Product =
            serde_json::from_str(r#"{"id":42,"name":"A","sku":"S","quantity":1,"description":""}"#)
                .unwrap();
        assert_eq!(from_number.id.as_str(), "42");
    }

    #[test]
    fn test_product_missing_optional_text_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id":"1","name":"Legacy","quantity":3}"#).unwrap();
        assert_eq!(product.sku, "");
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(StockBucket::of(0), StockBucket::Low);
        assert_eq!(StockBucket::of(10), StockBucket::Low);
        assert_eq!(StockBucket::of(11), StockBucket::Medium);
        assert_eq!(StockBucket::of(50), StockBucket::Medium);
        assert_eq!(StockBucket::of(51), StockBucket::High);
    }

    #[test]
    fn test_stock_filter_parsing() {
        assert_eq!("low-stock".parse::<StockFilter>().unwrap(), StockFilter::LowStock);
        assert_eq!("HIGH".parse::<StockFilter>().unwrap(), StockFilter::HighStock);
        assert_eq!("all".parse::<StockFilter>().unwrap(), StockFilter::All);
        assert!("some".parse::<StockFilter>().is_err());
    }

    #[test]
    fn test_stock_filter_serializes_kebab_case() {
        let json = serde_json::to_string(&StockFilter::MediumStock).unwrap();
        assert_eq!(json, r#""medium-stock""#);
    }

    #[test]
    fn test_patch_serializes_only_changed_fields() {
        let json = serde_json::to_string(&ProductPatch::quantity(7)).unwrap();
        assert_eq!(json, r#"{"quantity":7}"#);
    }

    #[test]
    fn test_edit_field_build_patch() {
        assert_eq!(
            EditField::Quantity.build_patch(" -3 ").unwrap(),
            ProductPatch::quantity(-3)
        );
        assert_eq!(
            EditField::Sku.build_patch("W-2").unwrap(),
            ProductPatch::sku("W-2")
        );
        assert_eq!(
            EditField::Quantity.build_patch("12.5").unwrap(),
            ProductPatch::quantity(12)
        );
        assert!(EditField::Quantity.build_patch("lots").is_err());
    }

    #[test]
    fn test_merged_replaces_only_patched_fields() {
        let product = Product::new(ProductId::from("1"), "Widget", "W1", 5, "desc");
        let merged = product.merged(&ProductPatch::description("new"));
        assert_eq!(merged.description, "new");
        assert_eq!(merged.quantity, 5);
        assert_eq!(merged.sku, "W1");
    }

    #[test]
    fn test_search_matches_any_text_field() {
        let product = Product::new(ProductId::from("1"), "Blue Widget", "BW-1", 5, "Shiny");
        assert!(product.matches_search("widget"));
        assert!(product.matches_search("bw-"));
        assert!(product.matches_search("shiny"));
        assert!(product.matches_search(""));
        assert!(!product.matches_search("gadget"));
    }
}
