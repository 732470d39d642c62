//! # Sync Engine
//!
//! Runs the four product operations against the backend and reconciles the
//! local store afterwards.
//!
//! ## Refetch-After-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mutation Flow                                      │
//! │                                                                         │
//! │  create(draft) ──► validate_draft ──✗──► post_error(guard message)      │
//! │       │                  │              (no request sent)               │
//! │       │                  ✓                                              │
//! │       ▼                  ▼                                              │
//! │  update(id, patch) ─► ProductsApi ──✗──► post_error(classified message) │
//! │  delete(id) ────────►    │              store left untouched            │
//! │                          ✓                                              │
//! │                          ▼                                              │
//! │                    clear_error()                                        │
//! │                    post_success(...)                                    │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                    fetch_all() ──► store.replace_all(server response)  │
//! │                                                                         │
//! │  The store is never patched locally. It only ever holds what the       │
//! │  backend last returned from GET /products.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! All operations take `&self`; several may be in flight at once. There is no
//! queue, no cancellation and no generation check, so the store reflects
//! whichever refetch lands last. Nothing is retried.

use stockroom_core::validation::validate_draft;
use stockroom_core::{DraftForm, Product, ProductId, ProductPatch};
use tracing::{info, instrument, warn};

use crate::api::ProductsApi;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::notify::NotificationCenter;
use crate::store::ProductStore;

// =============================================================================
// Operations
// =============================================================================

/// Backend operation, used to word notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    Update,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Message shown in the success slot. Loads post none.
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Operation::Load => None,
            Operation::Add => Some("Product added successfully."),
            Operation::Update => Some("Product updated successfully."),
            Operation::Delete => Some("Product deleted successfully."),
        }
    }

    /// Message shown in the error slot for `err`.
    ///
    /// Server errors carry the response body verbatim; transport errors get a
    /// generic sentence.
    pub fn failure_message(self, err: &SyncError) -> String {
        match (self, err) {
            (_, SyncError::Validation(validation)) => validation.to_string(),
            (Operation::Load, SyncError::Server { body, .. }) => {
                format!("Failed to load products: {}", body)
            }
            (Operation::Load, _) => "Failed to load products. Please check the API URL.".to_string(),
            (op, SyncError::Server { body, .. }) => {
                format!("Failed to {} product: {}", op.verb(), body)
            }
            (op, SyncError::Decode(detail)) => {
                format!("Failed to {} product: {}", op.verb(), detail)
            }
            (op, _) => format!("Failed to {} product due to a network error.", op.verb()),
        }
    }
}

// =============================================================================
// Sync Engine
// =============================================================================

/// Backend synchronization over a shared store and notification center.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    api: ProductsApi,
    store: ProductStore,
    notices: NotificationCenter,
}

impl SyncEngine {
    /// Creates an engine from its parts.
    pub fn new(api: ProductsApi, store: ProductStore, notices: NotificationCenter) -> Self {
        SyncEngine {
            api,
            store,
            notices,
        }
    }

    /// Creates an engine with an empty store from configuration.
    pub fn from_config(config: &SyncConfig) -> SyncResult<Self> {
        Ok(Self::new(
            ProductsApi::from_config(config)?,
            ProductStore::new(),
            NotificationCenter::new(config.success_ttl()),
        ))
    }

    /// The store this engine writes to.
    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// The notification center this engine posts to.
    pub fn notices(&self) -> &NotificationCenter {
        &self.notices
    }

    /// The underlying HTTP client.
    pub fn api(&self) -> &ProductsApi {
        &self.api
    }

    /// Fetches the whole collection and replaces the store with it.
    ///
    /// On failure the store is left as it was and the sticky error is set.
    /// Success does not touch the error slot.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> SyncResult<Vec<Product>> {
        match self.api.list().await {
            Ok(products) => {
                self.store.replace_all(products.clone());
                Ok(products)
            }
            Err(err) => Err(self.fail(Operation::Load, err)),
        }
    }

    /// Validates `draft` and creates the product.
    ///
    /// An incomplete or unparseable draft fails without a request. On `Ok` the
    /// caller clears its draft; on any error the draft is kept.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &DraftForm) -> SyncResult<()> {
        let new_product = match validate_draft(draft) {
            Ok(p) => p,
            Err(err) => return Err(self.fail(Operation::Add, err.into())),
        };

        let result = self.api.create(&new_product).await;
        if result.is_ok() {
            info!(sku = %new_product.sku, "Product created");
        }
        self.finish(Operation::Add, result).await
    }

    /// Sends a partial update. The patch is not validated here.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: &ProductId, patch: &ProductPatch) -> SyncResult<()> {
        let result = self.api.update(id, patch).await;
        if result.is_ok() {
            info!("Product updated");
        }
        self.finish(Operation::Update, result).await
    }

    /// Deletes one product.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &ProductId) -> SyncResult<()> {
        let result = self.api.delete(id).await;
        if result.is_ok() {
            info!("Product deleted");
        }
        self.finish(Operation::Delete, result).await
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Applies the outcome of a mutation to notifications and the store.
    ///
    /// A failed refetch after a successful write posts its own error but does
    /// not turn the write into a failure.
    async fn finish(&self, op: Operation, result: SyncResult<()>) -> SyncResult<()> {
        match result {
            Ok(()) => {
                self.notices.clear_error();
                if let Some(message) = op.success_message() {
                    self.notices.post_success(message);
                }
                if let Err(err) = self.fetch_all().await {
                    warn!(operation = op.verb(), error = %err, "Refetch after write failed");
                }
                Ok(())
            }
            Err(err) => Err(self.fail(op, err)),
        }
    }

    fn fail(&self, op: Operation, err: SyncError) -> SyncError {
        let message = op.failure_message(&err);
        warn!(operation = op.verb(), error = %err, "{}", message);
        self.notices.post_error(message);
        err
    }
}
