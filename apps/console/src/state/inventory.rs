//! # Inventory State
//!
//! The intent-dispatch surface a front end drives, and the snapshots it reads.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory State                                      │
//! │                                                                         │
//! │  ┌───────────────────────────┐     ┌───────────────────────────────┐   │
//! │  │  SyncEngine (shared)      │     │  ViewState (Arc<Mutex<T>>)    │   │
//! │  │  • ProductStore           │     │  • FilterView (search/bucket) │   │
//! │  │  • NotificationCenter     │     │  • EditSession                │   │
//! │  │  • ProductsApi            │     │  • DraftForm                  │   │
//! │  └───────────────────────────┘     └───────────────────────────────┘   │
//! │                                                                         │
//! │  Intent                   Effect                                        │
//! │  ──────                   ──────                                        │
//! │  on_add(draft)        ──► draft kept, engine.create, draft cleared on Ok│
//! │  on_delete(id)        ──► engine.delete                                 │
//! │  on_open_edit(id, f)  ──► EditSession::open (product from store)        │
//! │  on_edit_value_change ──► EditSession::set_candidate                    │
//! │  on_commit_edit()     ──► session closed, THEN engine.update           │
//! │  on_cancel_edit()     ──► EditSession::cancel                           │
//! │  on_search_change(t)  ──► FilterView.search = t                         │
//! │  on_bucket_change(b)  ──► FilterView.bucket = b                         │
//! │  dismiss_error()      ──► NotificationCenter::dismiss_error             │
//! │                                                                         │
//! │  NOTE: the view lock is released before any request is awaited.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use stockroom_core::{
    CoreError, DraftForm, EditField, EditSession, FilterView, InventoryStats, Product, ProductId,
    StockFilter,
};
use stockroom_sync::{NotificationSnapshot, SyncConfig, SyncEngine};
use tracing::{debug, info};

use crate::error::AppResult;

// =============================================================================
// Intents
// =============================================================================

/// Every user intent the state accepts, as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum InventoryIntent {
    /// Fetch the whole collection.
    Load,
    Add { draft: DraftForm },
    Delete { id: ProductId },
    OpenEdit { id: ProductId, field: EditField },
    EditValueChange { text: String },
    CommitEdit,
    CancelEdit,
    SearchChange { text: String },
    BucketChange { bucket: StockFilter },
    DismissError,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything a front end renders, read in one go.
///
/// Keys are snake_case at every level, matching the nested core types.
#[derive(Debug, Clone, Serialize)]
pub struct InventorySnapshot {
    /// Whole collection, backend order.
    pub products: Vec<Product>,
    /// Collection after search and bucket filtering.
    pub visible: Vec<Product>,
    pub stats: InventoryStats,
    pub notifications: NotificationSnapshot,
    pub edit: EditSession,
    pub draft: DraftForm,
    pub filter: FilterView,
}

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Default)]
struct ViewState {
    filter: FilterView,
    edit: EditSession,
    draft: DraftForm,
}

/// Inventory state shared by every front end.
///
/// Cheap to clone; clones share the engine and view state.
#[derive(Debug, Clone)]
pub struct InventoryState {
    engine: SyncEngine,
    view: Arc<Mutex<ViewState>>,
}

impl InventoryState {
    /// Creates state around an engine.
    pub fn new(engine: SyncEngine) -> Self {
        InventoryState {
            engine,
            view: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Creates state from configuration.
    pub fn from_config(config: &SyncConfig) -> AppResult<Self> {
        Ok(Self::new(SyncEngine::from_config(config)?))
    }

    /// The engine behind this state.
    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    fn with_view<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ViewState) -> R,
    {
        let view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&view)
    }

    fn with_view_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ViewState) -> R,
    {
        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut view)
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Runs one intent.
    pub async fn dispatch(&self, intent: InventoryIntent) -> AppResult<()> {
        debug!(?intent, "Dispatching intent");
        match intent {
            InventoryIntent::Load => self.load().await,
            InventoryIntent::Add { draft } => self.on_add(draft).await,
            InventoryIntent::Delete { id } => self.on_delete(&id).await,
            InventoryIntent::OpenEdit { id, field } => self.on_open_edit(&id, field),
            InventoryIntent::EditValueChange { text } => self.on_edit_value_change(text),
            InventoryIntent::CommitEdit => self.on_commit_edit().await,
            InventoryIntent::CancelEdit => {
                self.on_cancel_edit();
                Ok(())
            }
            InventoryIntent::SearchChange { text } => {
                self.on_search_change(text);
                Ok(())
            }
            InventoryIntent::BucketChange { bucket } => {
                self.on_bucket_change(bucket);
                Ok(())
            }
            InventoryIntent::DismissError => {
                self.dismiss_error();
                Ok(())
            }
        }
    }

    /// Fetches the collection (startup load and manual refresh).
    pub async fn load(&self) -> AppResult<()> {
        let products = self.engine.fetch_all().await?;
        info!(count = products.len(), "Inventory loaded");
        Ok(())
    }

    /// Submits a draft. The draft is kept on failure and cleared on success.
    pub async fn on_add(&self, draft: DraftForm) -> AppResult<()> {
        self.with_view_mut(|view| view.draft = draft.clone());

        self.engine.create(&draft).await?;

        self.with_view_mut(|view| view.draft.clear());
        Ok(())
    }

    /// Deletes a product.
    pub async fn on_delete(&self, id: &ProductId) -> AppResult<()> {
        self.engine.delete(id).await?;
        Ok(())
    }

    /// Opens the edit session for one field of a stored product.
    pub fn on_open_edit(&self, id: &ProductId, field: EditField) -> AppResult<()> {
        let product = self
            .engine
            .store()
            .get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        self.with_view_mut(|view| view.edit.open(&product, field));
        debug!(id = %id, %field, "Edit session opened");
        Ok(())
    }

    /// Replaces the edit candidate.
    pub fn on_edit_value_change(&self, text: impl Into<String>) -> AppResult<()> {
        let text = text.into();
        self.with_view_mut(|view| view.edit.set_candidate(text))?;
        Ok(())
    }

    /// Commits the open edit.
    ///
    /// The session is closed before the update is sent; an update failure
    /// shows up only in the error slot. A quantity candidate with no leading
    /// digits keeps the session open and sends nothing.
    pub async fn on_commit_edit(&self) -> AppResult<()> {
        let commit = self.with_view_mut(|view| {
            let commit = view.edit.begin_commit();
            if commit.is_ok() {
                view.edit.finish_commit();
            }
            commit
        });

        let commit = match commit {
            Ok(commit) => commit,
            Err(CoreError::Validation(err)) => {
                self.engine.notices().post_error(err.to_string());
                return Err(CoreError::Validation(err).into());
            }
            Err(err) => return Err(err.into()),
        };

        debug!(id = %commit.product_id, field = %commit.field, "Edit committed");
        self.engine.update(&commit.product_id, &commit.patch).await?;
        Ok(())
    }

    /// Discards the open edit.
    pub fn on_cancel_edit(&self) {
        self.with_view_mut(|view| view.edit.cancel());
    }

    /// Replaces the search text.
    pub fn on_search_change(&self, text: impl Into<String>) {
        let text = text.into();
        self.with_view_mut(|view| view.filter.search = text);
    }

    /// Replaces the bucket selector.
    pub fn on_bucket_change(&self, bucket: StockFilter) {
        self.with_view_mut(|view| view.filter.bucket = bucket);
    }

    /// Dismisses the sticky error. Returns true if one was shown.
    pub fn dismiss_error(&self) -> bool {
        self.engine.notices().dismiss_error()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Whole collection in backend order.
    pub fn products(&self) -> Vec<Product> {
        self.engine.store().snapshot()
    }

    /// Filtered view, recomputed from the store on every call.
    pub fn visible_products(&self) -> Vec<Product> {
        let filter = self.filter();
        self.engine
            .store()
            .with_products(|products| filter.apply(products).into_iter().cloned().collect())
    }

    /// Stock statistics, recomputed from the store on every call.
    pub fn stats(&self) -> InventoryStats {
        self.engine.store().with_products(InventoryStats::from_products)
    }

    /// Both notification slots.
    pub fn notifications(&self) -> NotificationSnapshot {
        self.engine.notices().snapshot()
    }

    /// Edit session state.
    pub fn edit_session(&self) -> EditSession {
        self.with_view(|view| view.edit.clone())
    }

    /// Add-form draft.
    pub fn draft(&self) -> DraftForm {
        self.with_view(|view| view.draft.clone())
    }

    /// Current search text and bucket.
    pub fn filter(&self) -> FilterView {
        self.with_view(|view| view.filter.clone())
    }

    /// Everything at once.
    pub fn snapshot(&self) -> InventorySnapshot {
        let (filter, edit, draft) =
            self.with_view(|view| (view.filter.clone(), view.edit.clone(), view.draft.clone()));
        let products = self.products();
        let visible = filter.apply(&products).into_iter().cloned().collect();
        let stats = InventoryStats::from_products(&products);

        InventorySnapshot {
            products,
            visible,
            stats,
            notifications: self.notifications(),
            edit,
            draft,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_sync::testing::MockInventory;

    async fn state_with(products: Vec<Product>) -> (MockInventory, InventoryState) {
        let mock = MockInventory::start().await.unwrap();
        mock.seed(products).await;
        let state = InventoryState::from_config(&SyncConfig::with_base_url(mock.base_url())).unwrap();
        state.load().await.unwrap();
        (mock, state)
    }

    fn product(id: &str, name: &str, qty: i64) -> Product {
        Product::new(ProductId::from(id), name, format!("SKU-{}", id), qty, "")
    }

    #[tokio::test]
    async fn test_search_and_bucket_narrow_visible_products() {
        let (_mock, state) = state_with(vec![
            product("1", "Blue Widget", 5),
            product("2", "Red Widget", 30),
            product("3", "Gadget", 80),
        ])
        .await;

        state.on_search_change("  WIDGET ");
        assert_eq!(state.visible_products().len(), 2);

        state.on_bucket_change(StockFilter::MediumStock);
        let visible = state.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Red Widget");

        // Filtering never touches the collection or the stats.
        assert_eq!(state.products().len(), 3);
        assert_eq!(state.stats().total_products, 3);
    }

    #[tokio::test]
    async fn test_open_edit_requires_stored_product() {
        let (_mock, state) = state_with(vec![]).await;
        let err = state
            .on_open_edit(&ProductId::from("nope"), EditField::Sku)
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
        assert_eq!(state.edit_session(), EditSession::Closed);
    }

    #[tokio::test]
    async fn test_commit_without_session_is_rejected() {
        let (mock, state) = state_with(vec![]).await;
        let err = state.on_commit_edit().await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NoActiveEdit);
        assert_eq!(mock.count("PUT").await, 0);
    }

    #[tokio::test]
    async fn test_snapshot_keys_are_snake_case_throughout() {
        let (_mock, state) = state_with(vec![product("1", "Widget", 5)]).await;
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["products"].as_array().unwrap().len(), 1);
        assert_eq!(json["stats"]["total_products"], 1);
        assert_eq!(json["stats"]["low_stock_count"], 1);
        assert_eq!(json["edit"]["state"], "closed");
        assert!(json["notifications"]["error"].is_null());

        state.on_open_edit(&ProductId::from("1"), EditField::Quantity).unwrap();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["edit"]["state"], "open");
        assert_eq!(json["edit"]["product_id"], "1");
        assert_eq!(json["edit"]["product_name"], "Widget");

        fn assert_no_camel_keys(value: &serde_json::Value) {
            match value {
                serde_json::Value::Object(map) => {
                    for (key, nested) in map {
                        assert!(
                            !key.chars().any(|c| c.is_ascii_uppercase()),
                            "camelCase key {key}"
                        );
                        assert_no_camel_keys(nested);
                    }
                }
                serde_json::Value::Array(items) => items.iter().for_each(assert_no_camel_keys),
                _ => {}
            }
        }
        assert_no_camel_keys(&json);
    }
}
