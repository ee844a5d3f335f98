// catalog-client/tests/common/mod.rs
// In-memory backend shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use catalog_client::{CatalogApi, ClientError, ClientResult};
use http::StatusCode;
use rust_decimal::Decimal;
use shared::response::PagedProducts;
use shared::{
    BulkResult, Category, CategoryId, CategoryPayload, CategoryRef, Product, ProductId,
    ProductPage, ProductPayload, ProductStatus, SellerProductsResponse, SellerProfile,
    SellerStatus, StatusPayload,
};

#[derive(Debug, Default)]
pub struct BackendState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Every request, as "METHOD path"
    pub calls: Vec<String>,
    pub next_id: i64,
    /// Answer `/api/seller/products` with a bare array
    pub bare_shape: bool,
    pub fail_fetch: bool,
    pub fail_search: bool,
    /// Reject every write with this status and body message
    pub reject_writes: Option<(StatusCode, Option<String>)>,
    /// Send the stored product back from PUT
    pub echo_updates: bool,
    /// Store this name instead of the submitted one on update
    pub server_name_override: Option<String>,
    pub last_status_body: Option<String>,
    pub profile: Option<SellerProfile>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state().next_id = 1000;
        backend
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let backend = Self::new();
        backend.state().products = products;
        backend
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    /// Requests other than reads
    pub fn write_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("GET "))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn record(&self, call: impl Into<String>) {
        self.state().calls.push(call.into());
    }

    fn check_write(&self) -> ClientResult<()> {
        match self.state().reject_writes.clone() {
            None => Ok(()),
            Some((status, Some(message))) => Err(ClientError::Api { status, message }),
            Some((status, None)) => Err(ClientError::Status(status)),
        }
    }

    fn to_product(&self, id: ProductId, payload: &ProductPayload) -> Product {
        let state = self.state();
        let category_id = match &payload.category {
            CategoryRef::Id(id) => Some(id.clone()),
            CategoryRef::Name(name) => state
                .categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
                .map(|c| c.id.clone()),
        };
        Product {
            id,
            name: payload.name.clone(),
            price: payload.price,
            stock: payload.stock,
            category_id,
            status: ProductStatus::Active,
            description: payload.description.clone(),
            image_urls: payload.image_urls.clone(),
            discount: payload.discount.clone(),
        }
    }

    fn insert(&self, payload: &ProductPayload) -> Product {
        let id = {
            let mut state = self.state();
            state.next_id += 1;
            ProductId::from(state.next_id)
        };
        let product = self.to_product(id, payload);
        self.state().products.push(product.clone());
        product
    }
}

pub fn product(id: i64, name: &str, price: i64, category: i64) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        price: Decimal::from(price),
        stock: 3,
        category_id: Some(CategoryId::from(category)),
        status: ProductStatus::Active,
        description: None,
        image_urls: vec![],
        discount: None,
    }
}

pub fn numbered_products(n: i64) -> Vec<Product> {
    (1..=n)
        .map(|i| product(i, &format!("Product {i}"), 10 + i, 1 + i % 2))
        .collect()
}

#[async_trait]
impl CatalogApi for FakeBackend {
    async fn me(&self) -> ClientResult<SellerProfile> {
        self.record("GET /api/auth/me");
        self.state().profile.clone().ok_or(ClientError::Unauthorized)
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.record("GET /api/categories");
        if self.state().fail_fetch {
            return Err(ClientError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self.state().categories.clone())
    }

    async fn create_category(&self, body: &CategoryPayload) -> ClientResult<()> {
        self.record("POST /api/categories");
        self.check_write()?;
        let mut state = self.state();
        state.next_id += 1;
        let id = CategoryId::from(state.next_id);
        state.categories.push(Category {
            id,
            name: body.name.clone(),
        });
        Ok(())
    }

    async fn rename_category(&self, id: &CategoryId, body: &CategoryPayload) -> ClientResult<()> {
        self.record(format!("PUT /api/categories/{id}"));
        self.check_write()?;
        let mut state = self.state();
        let category = state
            .categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        category.name = body.name.clone();
        Ok(())
    }

    async fn delete_category(&self, id: &CategoryId) -> ClientResult<()> {
        self.record(format!("DELETE /api/categories/{id}"));
        self.check_write()?;
        self.state().categories.retain(|c| &c.id != id);
        Ok(())
    }

    async fn fetch_seller_products(
        &self,
        page: usize,
        size: usize,
    ) -> ClientResult<SellerProductsResponse> {
        self.record(format!("GET /api/seller/products?page={page}&size={size}"));
        let state = self.state();
        if state.fail_fetch {
            return Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        if state.bare_shape {
            return Ok(SellerProductsResponse::Bare(state.products.clone()));
        }
        let products = state
            .products
            .iter()
            .skip(page * size)
            .take(size)
            .cloned()
            .collect();
        Ok(SellerProductsResponse::Paged(PagedProducts {
            products,
            total_elements: Some(state.products.len() as u64),
        }))
    }

    async fn fetch_product_page(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> ClientResult<ProductPage> {
        self.record(format!("GET /api/products?page={page}&size={size}"));
        let state = self.state();
        if state.fail_fetch {
            return Err(ClientError::Status(StatusCode::BAD_GATEWAY));
        }
        let matching: Vec<Product> = state
            .products
            .iter()
            .filter(|p| {
                search.is_none_or(|s| p.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect();
        let total_pages = matching.len().div_ceil(size as usize) as u32;
        let content = matching
            .into_iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .collect();
        Ok(ProductPage {
            content,
            total_pages,
        })
    }

    async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>> {
        self.record(format!("GET /api/products/search?q={query}"));
        let state = self.state();
        if state.fail_search {
            return Err(ClientError::Status(StatusCode::BAD_GATEWAY));
        }
        let q = query.to_lowercase();
        Ok(state
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&q))
            .cloned()
            .collect())
    }

    async fn create_product(&self, body: &ProductPayload) -> ClientResult<()> {
        self.record("POST /api/seller/products");
        self.check_write()?;
        self.insert(body);
        Ok(())
    }

    async fn update_product(
        &self,
        id: &ProductId,
        body: &ProductPayload,
    ) -> ClientResult<Option<Product>> {
        self.record(format!("PUT /api/seller/products/{id}"));
        self.check_write()?;
        let mut updated = self.to_product(id.clone(), body);
        let mut state = self.state();
        if let Some(name) = state.server_name_override.clone() {
            updated.name = name;
        }
        let slot = state
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        updated.status = slot.status;
        *slot = updated.clone();
        Ok(state.echo_updates.then_some(updated))
    }

    async fn delete_product(&self, id: &ProductId) -> ClientResult<()> {
        self.record(format!("DELETE /api/seller/products/{id}"));
        self.check_write()?;
        let mut state = self.state();
        let before = state.products.len();
        state.products.retain(|p| &p.id != id);
        if state.products.len() == before {
            return Err(ClientError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn set_product_status(&self, id: &ProductId, body: &StatusPayload) -> ClientResult<()> {
        self.record(format!("PUT /api/seller/products/{id}/status"));
        self.check_write()?;
        let status = ProductStatus::try_from(body.status.clone()).map_err(|e| {
            ClientError::Api {
                status: StatusCode::BAD_REQUEST,
                message: e.to_string(),
            }
        })?;
        let mut state = self.state();
        state.last_status_body = Some(body.status.clone());
        if let Some(p) = state.products.iter_mut().find(|p| &p.id == id) {
            p.status = status;
        }
        Ok(())
    }

    async fn bulk_create_products(&self, body: &[ProductPayload]) -> ClientResult<BulkResult> {
        self.record("POST /api/seller/products/bulk");
        self.check_write()?;
        let mut result = BulkResult::default();
        for payload in body {
            if payload.name.starts_with("dup") {
                result.failed += 1;
            } else {
                self.insert(payload);
                result.successful += 1;
            }
        }
        Ok(result)
    }
}

pub fn seller_profile() -> SellerProfile {
    SellerProfile {
        seller_status: Some(SellerStatus::Approved),
        role: Some("SELLER".into()),
    }
}
