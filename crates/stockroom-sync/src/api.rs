//! # Products API Client
//!
//! Thin HTTP client over the backend's four product routes.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Backend Contract                                 │
//! │                                                                         │
//! │  list()         GET    {base}/products        → 200 [Product, ...]     │
//! │  create(body)   POST   {base}/products        → 2xx (body ignored)     │
//! │  update(id, p)  PUT    {base}/products/{id}   → 2xx (body ignored)     │
//! │  delete(id)     DELETE {base}/products/{id}   → 2xx (body ignored)     │
//! │                                                                         │
//! │  non-2xx   → SyncError::Server { status, body }  (body kept verbatim)  │
//! │  transport → SyncError::Network                                        │
//! │  bad JSON  → SyncError::Decode                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No auth headers, no retries, no timeouts beyond reqwest's defaults.
//! This layer never touches local state; see [`crate::engine::SyncEngine`].

use reqwest::{Client, Response};
use stockroom_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};

/// Body reported when a rejection's body cannot be read.
pub const UNREADABLE_BODY: &str = "<unreadable body>";

/// HTTP client for `/products`.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: Client,
    base_url: Url,
}

impl ProductsApi {
    /// Creates a client rooted at `base_url`.
    pub fn new(base_url: Url) -> Self {
        ProductsApi {
            client: Client::new(),
            base_url,
        }
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &SyncConfig) -> SyncResult<Self> {
        Ok(Self::new(config.base_url()?))
    }

    /// Base URL requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /products`
    #[instrument(skip(self))]
    pub async fn list(&self) -> SyncResult<Vec<Product>> {
        let response = self.client.get(self.collection_url()?).send().await?;
        let body = ensure_success(response).await?.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// `POST /products`
    #[instrument(skip_all, fields(sku = %product.sku))]
    pub async fn create(&self, product: &NewProduct) -> SyncResult<()> {
        let response = self
            .client
            .post(self.collection_url()?)
            .json(product)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// `PUT /products/{id}` with only the changed fields.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: &ProductId, patch: &ProductPatch) -> SyncResult<()> {
        let response = self
            .client
            .put(self.item_url(id)?)
            .json(patch)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// `DELETE /products/{id}`
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &ProductId) -> SyncResult<()> {
        let response = self.client.delete(self.item_url(id)?).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    // =========================================================================
    // URL Building
    // =========================================================================

    fn collection_url(&self) -> SyncResult<Url> {
        self.url_with(&["products"])
    }

    fn item_url(&self, id: &ProductId) -> SyncResult<Url> {
        self.url_with(&["products", id.as_str()])
    }

    /// Appends percent-encoded segments, keeping any base path prefix.
    fn url_with(&self, segments: &[&str]) -> SyncResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                SyncError::InvalidUrl(format!("Base URL cannot have path segments: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

/// Passes 2xx responses through; turns anything else into a server error.
async fn ensure_success(response: Response) -> SyncResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(status = status.as_u16(), error = %err, "Failed to read rejection body");
            UNREADABLE_BODY.to_string()
        }
    };
    debug!(status = status.as_u16(), body = %body, "Backend rejected request");
    Err(SyncError::Server {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> ProductsApi {
        ProductsApi::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_collection_url_keeps_stage_prefix() {
        let url = api("https://api.example.com/Prod").collection_url().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/Prod/products");

        let url = api("https://api.example.com/Prod/").collection_url().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/Prod/products");
    }

    #[test]
    fn test_item_url_encodes_id() {
        let url = api("http://localhost:3000")
            .item_url(&ProductId::from("a/b c"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/products/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_truncated_rejection_body_is_reported() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        // Promises 64 bytes of body, sends 5, then hangs up.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\n\r\nshort")
                .await;
            let _ = socket.shutdown().await;
        });

        let err = api(&format!("http://{addr}")).list().await.unwrap_err();
        match err {
            SyncError::Server { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, UNREADABLE_BODY);
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let err = api("http://127.0.0.1:9").list().await.unwrap_err();
        assert!(err.is_network(), "unexpected error: {err:?}");
    }
}
