//! Seller product catalog
//!
//! One [`ProductCatalog`] backs one product listing screen. It fetches the
//! full catalog once, filters and pages it locally (or delegates text
//! search to the server), and reconciles the cache after every write.
//!
//! ```no_run
//! use catalog_client::{ClientConfig, FilterCriteria, NetworkHttpClient, ProductCatalog, Session};
//!
//! # async fn example() -> Result<(), catalog_client::CatalogError> {
//! let config = ClientConfig::from_env();
//! let api = NetworkHttpClient::new(&config).map_err(catalog_client::CatalogError::Fetch)?;
//! let session = Session::resolve(&api).await;
//!
//! let mut catalog = ProductCatalog::new(api, session, &config);
//! catalog.load().await?;
//! catalog.search(FilterCriteria::text("shoe")).await;
//! for product in catalog.page_items() {
//!     println!("{} {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod filter;
pub mod mutation;
pub mod search;

pub use cache::CatalogCache;
pub use filter::{FilterCriteria, SearchMode, filter};
pub use mutation::MutationCoordinator;
pub use search::SearchModeController;

use serde_json::Value;
use shared::{BulkResult, Product, ProductId, ProductStatus};

use crate::config::ClientConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::http::CatalogApi;
use crate::session::Session;
use crate::validation::{ImportPreview, ProductDraft};

/// Product listing state for one screen
#[derive(Debug)]
pub struct ProductCatalog<A: CatalogApi> {
    api: A,
    session: Session,
    cache: CatalogCache,
    search: SearchModeController,
    mutations: MutationCoordinator,
}

impl<A: CatalogApi> ProductCatalog<A> {
    pub fn new(api: A, session: Session, config: &ClientConfig) -> Self {
        Self {
            api,
            session,
            cache: CatalogCache::new(config.page_size, config.fetch_page_size),
            search: SearchModeController::new(),
            mutations: MutationCoordinator::new(config.status_labels.clone()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    // ========== Load & search ==========

    /// Full fetch; on failure the previous cache stays visible
    pub async fn load(&mut self) -> CatalogResult<usize> {
        self.cache.load(&self.api).await
    }

    pub fn mode(&self) -> SearchMode {
        self.cache.mode()
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.search.set_mode(&mut self.cache, mode);
    }

    pub async fn search(&mut self, criteria: FilterCriteria) -> Vec<Product> {
        self.search
            .search(&self.api, &mut self.cache, criteria)
            .await
    }

    /// Why the last remote search came back empty, if it failed
    pub fn search_error(&self) -> Option<&str> {
        self.search.last_error()
    }

    pub fn clear_filters(&mut self) {
        self.search.clear_filters(&mut self.cache);
    }

    // ========== Pagination ==========

    pub fn page(&self) -> usize {
        self.cache.page()
    }

    pub fn total_pages(&self) -> usize {
        self.cache.total_pages()
    }

    pub fn total_products(&self) -> usize {
        self.cache.total_products()
    }

    pub fn page_items(&self) -> &[Product] {
        self.cache.page_items()
    }

    pub fn next_page(&mut self) -> usize {
        self.cache.next_page()
    }

    pub fn prev_page(&mut self) -> usize {
        self.cache.prev_page()
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.cache.go_to_page(page)
    }

    // ========== Mutations ==========

    pub async fn create(&mut self, draft: &ProductDraft) -> CatalogResult<()> {
        self.mutations
            .create(&self.api, &mut self.cache, &self.session, draft)
            .await
    }

    pub async fn update(&mut self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<()> {
        self.mutations
            .update(&self.api, &mut self.cache, &self.session, id, draft)
            .await
    }

    pub async fn remove(&mut self, id: &ProductId) -> CatalogResult<()> {
        self.mutations
            .remove(&self.api, &mut self.cache, &self.session, id)
            .await
    }

    pub async fn toggle_status(
        &mut self,
        id: &ProductId,
        current: ProductStatus,
    ) -> CatalogResult<ProductStatus> {
        self.mutations
            .toggle_status(&self.api, &mut self.cache, &self.session, id, current)
            .await
    }

    /// Toggle using the cached status of `id`
    pub async fn toggle_cached_status(&mut self, id: &ProductId) -> CatalogResult<ProductStatus> {
        let current = self
            .cache
            .get(id)
            .map(|p| p.status)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        self.toggle_status(id, current).await
    }

    pub async fn bulk_create(&mut self, payload: &Value) -> CatalogResult<BulkResult> {
        self.mutations
            .bulk_create(&self.api, &mut self.cache, &self.session, payload)
            .await
    }

    pub async fn bulk_create_text(&mut self, text: &str) -> CatalogResult<BulkResult> {
        self.mutations
            .bulk_create_text(&self.api, &mut self.cache, &self.session, text)
            .await
    }

    pub fn preview_import(&self, text: &str) -> ImportPreview {
        self.mutations.preview_import(text)
    }
}
