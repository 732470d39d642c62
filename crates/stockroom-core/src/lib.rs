//! # stockroom-core: Pure Inventory Logic for Stockroom
//!
//! This crate holds every piece of inventory logic that does not need the
//! network: the product model, draft validation, the filtered view, the
//! stock statistics and the edit-session state machine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering Layer                              │   │
//! │  │    Add Form ──► Product List ──► Edit Modal ──► Banners         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents / snapshots                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stockroom-console (InventoryState)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  filter   │  │   stats   │  │   edit    │  │   │
//! │  │   │  Product  │  │FilterView │  │ Inventory │  │   Edit    │  │   │
//! │  │   │ DraftForm │  │  derive   │  │   Stats   │  │  Session  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-sync (Backend Client)                 │   │
//! │  │          REST CRUD, ProductStore, NotificationCenter            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DraftForm, ProductPatch, buckets)
//! - [`error`] - Domain error types
//! - [`validation`] - Draft and field normalization
//! - [`filter`] - Search + stock bucket view
//! - [`stats`] - Stock statistics
//! - [`edit`] - Single-field edit session
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{filter, InventoryStats, Product, ProductId, StockFilter};
//!
//! let products = vec![
//!     Product::new(ProductId::from("1"), "Widget", "W1", 5, "small widget"),
//!     Product::new(ProductId::from("2"), "Gadget", "G1", 80, "large gadget"),
//! ];
//!
//! let low = filter::derive(&products, "", StockFilter::LowStock);
//! assert_eq!(low.len(), 1);
//!
//! let stats = InventoryStats::from_products(&products);
//! assert_eq!(stats.total_stock, 85);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod edit;
pub mod error;
pub mod filter;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use edit::{EditCommit, EditSession};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::FilterView;
pub use stats::InventoryStats;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest quantity still classified as low stock.
///
/// ## Bucket Boundaries
/// ```text
///   0 ─────────── 10 │ 11 ─────────── 50 │ 51 ──────────►
///      LOW STOCK     │    MEDIUM STOCK   │   HIGH STOCK
/// ```
pub const LOW_STOCK_MAX: i64 = 10;

/// Highest quantity still classified as medium stock.
pub const MEDIUM_STOCK_MAX: i64 = 50;
