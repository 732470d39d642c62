//! # stockroom-sync: Backend Synchronization for Stockroom
//!
//! This crate keeps an in-memory product list in step with the inventory
//! backend and owns the user-facing notification slots.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sync Layer Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   SyncEngine (engine.rs)                         │  │
//! │  │                                                                  │  │
//! │  │  fetch_all / create / update / delete                            │  │
//! │  │  every successful write is followed by a full refetch           │  │
//! │  └──────┬─────────────────────┬─────────────────────┬──────────────┘  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  ProductsApi   │  │  ProductStore  │  │  NotificationCenter    │    │
//! │  │                │  │                │  │                        │    │
//! │  │ reqwest client │  │ Arc<RwLock<    │  │ sticky error slot      │    │
//! │  │ for /products  │  │   Vec<Product> │  │ expiring success slot  │    │
//! │  │                │  │ >>             │  │ (tokio timer)          │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  SyncConfig: TOML file + STOCKROOM_* environment overrides             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - HTTP client for the four product routes
//! - [`config`] - Base URL and notification settings
//! - [`engine`] - Refetch-after-write orchestration and error messaging
//! - [`error`] - Sync error types
//! - [`notify`] - Error and success notification slots
//! - [`store`] - Shared product collection
//! - `testing` - In-process mock backend (`test-support` feature)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_core::DraftForm;
//! use stockroom_sync::{SyncConfig, SyncEngine};
//!
//! let config = SyncConfig::load(None)?;
//! let engine = SyncEngine::from_config(&config)?;
//!
//! engine.fetch_all().await?;
//! engine.create(&DraftForm::new("Widget", "W1", "5", "Blue")).await?;
//!
//! println!("{} products", engine.store().len());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::ProductsApi;
pub use config::{ApiSettings, NotificationSettings, SyncConfig};
pub use engine::{Operation, SyncEngine};
pub use error::{SyncError, SyncResult};
pub use notify::{Notice, NotificationCenter, NotificationSnapshot};
pub use store::ProductStore;
