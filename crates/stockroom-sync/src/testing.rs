//! # Mock Inventory Backend
//!
//! In-process axum server implementing the `/products` contract over an
//! in-memory list. Used by the engine tests here and by the console crate's
//! tests through the `test-support` feature.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MockInventory (127.0.0.1:0)                        │
//! │                                                                         │
//! │  GET    /products        → 200 JSON array, insertion order             │
//! │  POST   /products        → 201, id = uuid v4                           │
//! │                            400 text on missing field / quantity < 0    │
//! │  PUT    /products/{id}   → 200 merged product                          │
//! │                            404 text if unknown, 400 if quantity < 0    │
//! │  DELETE /products/{id}   → 200, 404 text if unknown                    │
//! │                                                                         │
//! │  fail_next(status, body)  → scripted failure for the next request      │
//! │  fail_next_on(method, ..) → same, for the next request of one method   │
//! │  set_delay(d)             → every request sleeps d before answering    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use stockroom_core::{NewProduct, Product, ProductId, ProductPatch};
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};
use tracing::debug;

/// A request as seen by the mock, for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone)]
struct ScriptedFailure {
    /// `None` matches any method.
    method: Option<String>,
    status: StatusCode,
    body: String,
}

#[derive(Clone, Default)]
struct MockState {
    products: Arc<Mutex<Vec<Product>>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    failures: Arc<Mutex<VecDeque<ScriptedFailure>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockState {
    /// Records the request, applies the delay, and takes the first scripted
    /// failure aimed at this method.
    async fn intercept(&self, method: &str, path: String, body: String) -> Option<Response> {
        self.requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            path,
            body,
        });

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut failures = self.failures.lock().await;
        let index = failures
            .iter()
            .position(|f| f.method.as_deref().map_or(true, |m| m == method))?;
        failures
            .remove(index)
            .map(|f| (f.status, f.body).into_response())
    }
}

/// Running mock backend. Shuts down on drop.
pub struct MockInventory {
    addr: SocketAddr,
    state: MockState,
    shutdown: watch::Sender<bool>,
}

impl MockInventory {
    /// Binds an ephemeral local port and starts serving.
    pub async fn start() -> std::io::Result<Self> {
        let state = MockState::default();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route(
                "/products/{id}",
                axum::routing::put(update_product).delete(delete_product),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        debug!(%addr, "Mock inventory backend started");
        Ok(MockInventory {
            addr,
            state,
            shutdown: shutdown_tx,
        })
    }

    /// Base URL to point a client at.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Replaces the server-side collection.
    pub async fn seed(&self, products: Vec<Product>) {
        *self.state.products.lock().await = products;
    }

    /// Server-side collection as it stands.
    pub async fn products(&self) -> Vec<Product> {
        self.state.products.lock().await.clone()
    }

    /// Makes the next request (any route) answer `status` with a text body.
    pub async fn fail_next(&self, status: u16, body: &str) {
        self.script_failure(None, status, body).await;
    }

    /// Makes the next `method` request answer `status` with a text body.
    /// Other methods are served normally.
    pub async fn fail_next_on(&self, method: &str, status: u16, body: &str) {
        self.script_failure(Some(method.to_string()), status, body).await;
    }

    async fn script_failure(&self, method: Option<String>, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state.failures.lock().await.push_back(ScriptedFailure {
            method,
            status,
            body: body.to_string(),
        });
    }

    /// Delays every subsequent response.
    pub async fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().await = Some(delay);
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Requests received so far with the given method.
    pub async fn count(&self, method: &str) -> usize {
        self.state
            .requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

impl Drop for MockInventory {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_products(State(state): State<MockState>) -> Response {
    if let Some(failure) = state.intercept("GET", "/products".into(), String::new()).await {
        return failure;
    }
    Json(state.products.lock().await.clone()).into_response()
}

async fn create_product(State(state): State<MockState>, body: String) -> Response {
    if let Some(failure) = state.intercept("POST", "/products".into(), body.clone()).await {
        return failure;
    }

    let new_product: NewProduct = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => return (StatusCode::BAD_REQUEST, format!("Invalid product: {}", e)).into_response(),
    };
    if new_product.name.is_empty() || new_product.sku.is_empty() {
        return (StatusCode::BAD_REQUEST, "name and sku are required").into_response();
    }
    if new_product.quantity < 0 {
        return (StatusCode::BAD_REQUEST, "quantity must be a non-negative integer").into_response();
    }

    let product = new_product.into_product(ProductId::from(uuid::Uuid::new_v4().to_string()));
    state.products.lock().await.push(product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn update_product(
    State(state): State<MockState>,
    Path(id): Path<String>,
    body: String,
) -> Response {
    let path = format!("/products/{}", id);
    if let Some(failure) = state.intercept("PUT", path, body.clone()).await {
        return failure;
    }

    let patch: ProductPatch = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => return (StatusCode::BAD_REQUEST, format!("Invalid update: {}", e)).into_response(),
    };
    if patch.quantity.is_some_and(|q| q < 0) {
        return (StatusCode::BAD_REQUEST, "quantity must be a non-negative integer").into_response();
    }

    let id = ProductId::from(id);
    let mut products = state.products.lock().await;
    match products.iter_mut().find(|p| p.id == id) {
        Some(product) => {
            *product = product.merged(&patch);
            Json(product.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("Product {} not found", id)).into_response(),
    }
}

async fn delete_product(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    let path = format!("/products/{}", id);
    if let Some(failure) = state.intercept("DELETE", path, String::new()).await {
        return failure;
    }

    let id = ProductId::from(id);
    let mut products = state.products.lock().await;
    match products.iter().position(|p| p.id == id) {
        Some(index) => {
            products.remove(index);
            StatusCode::OK.into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("Product {} not found", id)).into_response(),
    }
}
