//! HTTP transport and the remote collaborator seam
//!
//! [`CatalogApi`] is everything the catalog core needs from the backend.
//! [`NetworkHttpClient`] implements it over reqwest; tests substitute an
//! in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use shared::{
    BulkResult, Category, CategoryId, CategoryPayload, ErrorBody, Product, ProductId, ProductPage,
    ProductPayload, SellerProductsResponse, SellerProfile, StatusLabels, StatusPayload,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Remote catalog backend
#[async_trait]
pub trait CatalogApi: Send + Sync {
    // ========== Session ==========

    /// `GET /api/auth/me`
    async fn me(&self) -> ClientResult<SellerProfile>;

    // ========== Categories ==========

    /// `GET /api/categories`
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;
    /// `POST /api/categories`
    async fn create_category(&self, body: &CategoryPayload) -> ClientResult<()>;
    /// `PUT /api/categories/{id}`
    async fn rename_category(&self, id: &CategoryId, body: &CategoryPayload) -> ClientResult<()>;
    /// `DELETE /api/categories/{id}`
    async fn delete_category(&self, id: &CategoryId) -> ClientResult<()>;

    // ========== Products (read) ==========

    /// `GET /api/seller/products?page&size`
    async fn fetch_seller_products(
        &self,
        page: usize,
        size: usize,
    ) -> ClientResult<SellerProductsResponse>;
    /// `GET /api/products?page&size&search`
    async fn fetch_product_page(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> ClientResult<ProductPage>;
    /// `GET /api/products/search?q=`
    async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>>;

    // ========== Products (write) ==========

    /// `POST /api/seller/products`
    async fn create_product(&self, body: &ProductPayload) -> ClientResult<()>;
    /// `PUT /api/seller/products/{id}`; returns the server echo when it sent one
    async fn update_product(
        &self,
        id: &ProductId,
        body: &ProductPayload,
    ) -> ClientResult<Option<Product>>;
    /// `DELETE /api/seller/products/{id}`
    async fn delete_product(&self, id: &ProductId) -> ClientResult<()>;
    /// `PUT /api/seller/products/{id}/status`
    async fn set_product_status(&self, id: &ProductId, body: &StatusPayload) -> ClientResult<()>;
    /// `POST /api/seller/products/bulk`
    async fn bulk_create_products(&self, body: &[ProductPayload]) -> ClientResult<BulkResult>;
}

/// Network HTTP client
///
/// Session credentials are cookies; the cookie store attaches them to
/// every request. Product statuses arrive in whatever labels the backend
/// stores and are mapped through the configured [`StatusLabels`] before
/// decoding.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    labels: StatusLabels,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            labels: config.status_labels.clone(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "request");
        self.client.request(method, url)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::DELETE, path).send().await?;
        handle_response(response).await
    }

    /// GET a body holding products, statuses mapped to their canonical names
    async fn get_products<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let mut body: Value = self.get_query(path, query).await?;
        normalize_statuses(&mut body, &self.labels);
        Ok(serde_json::from_value(body)?)
    }

    /// Product echoed by a write, if the body is one
    fn decode_echo(&self, mut body: Value) -> Option<Product> {
        if body.is_null() {
            return None;
        }
        normalize_statuses(&mut body, &self.labels);
        match serde_json::from_value(body) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::debug!(error = %e, "write response is not a product, ignoring");
                None
            }
        }
    }
}

/// Rewrite product `status` strings in a response body to `ACTIVE`/`INACTIVE`.
///
/// Walks bare arrays and the `products`/`content` envelopes. Unknown
/// labels are left alone so decoding reports them.
fn normalize_statuses(body: &mut Value, labels: &StatusLabels) {
    match body {
        Value::Array(items) => {
            for item in items {
                normalize_statuses(item, labels);
            }
        }
        Value::Object(map) => {
            for key in ["products", "content"] {
                if let Some(inner) = map.get_mut(key) {
                    normalize_statuses(inner, labels);
                }
            }
            if let Some(Value::String(raw)) = map.get_mut("status")
                && let Some(status) = labels.parse(raw)
            {
                *raw = status.as_str().to_string();
            }
        }
        _ => {}
    }
}

/// Map non-2xx to [`ClientError`], decode the rest.
///
/// An empty 2xx body decodes as JSON `null`.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %text, "request failed");
        if let Some(message) = server_message(&text) {
            return Err(ClientError::Api { status, message });
        }
        return Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(status.to_string()),
            StatusCode::NOT_FOUND => ClientError::NotFound(status.to_string()),
            _ => ClientError::Status(status),
        });
    }

    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extract the server-reported message from an error body.
///
/// JSON envelopes yield their `message`/`error`; short plain text is taken
/// as-is; HTML error pages are ignored.
fn server_message(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        return None;
    }
    if trimmed.starts_with('{') {
        return serde_json::from_str::<ErrorBody>(trimmed)
            .ok()
            .and_then(ErrorBody::into_message);
    }
    Some(trimmed.to_string())
}

#[async_trait]
impl CatalogApi for NetworkHttpClient {
    async fn me(&self) -> ClientResult<SellerProfile> {
        self.get("/api/auth/me").await
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/api/categories").await
    }

    async fn create_category(&self, body: &CategoryPayload) -> ClientResult<()> {
        let _: IgnoredAny = self.post("/api/categories", body).await?;
        Ok(())
    }

    async fn rename_category(&self, id: &CategoryId, body: &CategoryPayload) -> ClientResult<()> {
        let _: IgnoredAny = self.put(&format!("/api/categories/{id}"), body).await?;
        Ok(())
    }

    async fn delete_category(&self, id: &CategoryId) -> ClientResult<()> {
        let _: IgnoredAny = self.delete(&format!("/api/categories/{id}")).await?;
        Ok(())
    }

    async fn fetch_seller_products(
        &self,
        page: usize,
        size: usize,
    ) -> ClientResult<SellerProductsResponse> {
        self.get_products("/api/seller/products", &[("page", page), ("size", size)])
            .await
    }

    async fn fetch_product_page(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> ClientResult<ProductPage> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(s) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", s.to_string()));
        }
        self.get_products("/api/products", &query).await
    }

    async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>> {
        self.get_products("/api/products/search", &[("q", query)])
            .await
    }

    async fn create_product(&self, body: &ProductPayload) -> ClientResult<()> {
        let _: IgnoredAny = self.post("/api/seller/products", body).await?;
        Ok(())
    }

    async fn update_product(
        &self,
        id: &ProductId,
        body: &ProductPayload,
    ) -> ClientResult<Option<Product>> {
        let echo: serde_json::Value = self.put(&format!("/api/seller/products/{id}"), body).await?;
        Ok(self.decode_echo(echo))
    }

    async fn delete_product(&self, id: &ProductId) -> ClientResult<()> {
        let _: IgnoredAny = self.delete(&format!("/api/seller/products/{id}")).await?;
        Ok(())
    }

    async fn set_product_status(&self, id: &ProductId, body: &StatusPayload) -> ClientResult<()> {
        let _: IgnoredAny = self
            .put(&format!("/api/seller/products/{id}/status"), body)
            .await?;
        Ok(())
    }

    async fn bulk_create_products(&self, body: &[ProductPayload]) -> ClientResult<BulkResult> {
        self.post("/api/seller/products/bulk", body).await
    }
}
