//! Admin product list with server-side pagination
//!
//! Unlike [`ProductCatalog`](crate::ProductCatalog), nothing is cached
//! beyond the current page.

use shared::Product;

use crate::error::{CatalogError, CatalogResult};
use crate::http::CatalogApi;

#[derive(Debug)]
pub struct ProductBrowser<A: CatalogApi> {
    api: A,
    page: u32,
    size: u32,
    search: Option<String>,
    total_pages: u32,
    items: Vec<Product>,
}

impl<A: CatalogApi> ProductBrowser<A> {
    pub fn new(api: A, size: u32) -> Self {
        Self {
            api,
            page: 0,
            size: size.max(1),
            search: None,
            total_pages: 0,
            items: Vec::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Reload the current page
    pub async fn fetch(&mut self) -> CatalogResult<&[Product]> {
        self.fetch_page(self.page).await
    }

    /// Change the search text and go back to the first page
    pub async fn set_search(&mut self, text: &str) -> CatalogResult<&[Product]> {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self.fetch_page(0).await
    }

    pub async fn next(&mut self) -> CatalogResult<&[Product]> {
        let last = self.total_pages.saturating_sub(1);
        self.fetch_page((self.page + 1).min(last)).await
    }

    pub async fn prev(&mut self) -> CatalogResult<&[Product]> {
        self.fetch_page(self.page.saturating_sub(1)).await
    }

    /// Only commits `page` once the server answered
    async fn fetch_page(&mut self, page: u32) -> CatalogResult<&[Product]> {
        let result = self
            .api
            .fetch_product_page(page, self.size, self.search.as_deref())
            .await;
        match result {
            Ok(resp) => {
                self.page = page;
                self.total_pages = resp.total_pages;
                self.items = resp.content;
                Ok(&self.items)
            }
            Err(e) => {
                tracing::warn!(error = %e, page, "product page fetch failed");
                Err(CatalogError::Fetch(e))
            }
        }
    }
}
