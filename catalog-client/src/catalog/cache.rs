//! Locally cached product catalog
//!
//! `all` is the full seller catalog as last fetched. `filtered` is the
//! view the screen pages through: the local filter of `all` in
//! [`SearchMode::Local`], or the last remote search result in
//! [`SearchMode::Remote`].

use shared::{Product, ProductId, ProductPatch};

use super::filter::{FilterCriteria, SearchMode, filter};
use crate::error::{CatalogError, CatalogResult};
use crate::http::CatalogApi;

/// Upper bound on requests during one full load
const MAX_FETCH_PAGES: usize = 1000;

#[derive(Debug)]
pub struct CatalogCache {
    all: Vec<Product>,
    filtered: Vec<Product>,
    page: usize,
    page_size: usize,
    fetch_page_size: usize,
    criteria: FilterCriteria,
    mode: SearchMode,
    loaded: bool,
}

impl CatalogCache {
    pub fn new(page_size: usize, fetch_page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            page: 0,
            page_size: page_size.max(1),
            fetch_page_size: fetch_page_size.max(1),
            criteria: FilterCriteria::default(),
            mode: SearchMode::default(),
            loaded: false,
        }
    }

    // ========== Accessors ==========

    pub fn all(&self) -> &[Product] {
        &self.all
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.all.iter().find(|p| &p.id == id)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn total_products(&self) -> usize {
        self.all.len()
    }

    // ========== Remote load ==========

    /// Replace the cache with the server's full catalog.
    ///
    /// Pages through `/api/seller/products` until the reported total is
    /// reached, a bare array arrives, or a page comes back empty. On any
    /// failure the previous contents stay in place.
    pub async fn load<A: CatalogApi + ?Sized>(&mut self, api: &A) -> CatalogResult<usize> {
        let size = self.fetch_page_size;
        let mut collected: Vec<Product> = Vec::new();

        for page in 0..MAX_FETCH_PAGES {
            let response = match api.fetch_seller_products(page, size).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, page, "catalog load failed, keeping cached products");
                    return Err(CatalogError::Fetch(e));
                }
            };
            let (products, total) = response.into_parts();
            let received = products.len();
            collected.extend(products);

            let more = match total {
                Some(total) => (collected.len() as u64) < total && received > 0,
                None => received == size,
            };
            if !more {
                break;
            }
        }

        let count = collected.len();
        self.all = collected;
        self.loaded = true;
        self.refilter();
        tracing::info!(count, "catalog loaded");
        Ok(count)
    }

    // ========== Local reconciliation ==========

    /// Patch one product in place.
    ///
    /// In remote mode the visible rows come from the last search and may
    /// hold products that are not in `all`; those rows are patched too.
    /// Returns false when neither list holds `id`; that is not an error.
    pub fn apply_local_patch(&mut self, id: &ProductId, patch: ProductPatch) -> bool {
        let in_all = match self.all.iter_mut().find(|p| &p.id == id) {
            Some(entry) => {
                patch.clone().apply_to(entry);
                true
            }
            None => false,
        };

        let in_view = match self.mode {
            SearchMode::Local => {
                if in_all {
                    self.refilter();
                }
                false
            }
            SearchMode::Remote => match self.filtered.iter_mut().find(|p| &p.id == id) {
                Some(row) => {
                    patch.apply_to(row);
                    true
                }
                None => false,
            },
        };

        if !in_all && !in_view {
            tracing::debug!(%id, "patch skipped, product not cached");
        }
        in_all || in_view
    }

    /// Remove a product from both `all` and `filtered`
    pub fn remove_local(&mut self, id: &ProductId) -> bool {
        let before = self.all.len();
        self.all.retain(|p| &p.id != id);
        self.filtered.retain(|p| &p.id != id);
        self.clamp_page();
        self.all.len() < before
    }

    // ========== Filtered view ==========

    /// Install a new active criteria set.
    ///
    /// The page resets to 0 when the criteria differ from the current ones.
    pub(crate) fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.page = 0;
        }
        self.criteria = criteria;
    }

    /// Switch mode without recomputing the view
    pub(crate) fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Reset criteria (keeping the mode) and show the whole catalog
    pub(crate) fn clear_criteria(&mut self) {
        self.criteria = FilterCriteria::default();
        self.page = 0;
        self.filtered = self.all.clone();
    }

    pub(crate) fn replace_filtered(&mut self, products: Vec<Product>) {
        self.filtered = products;
        self.clamp_page();
    }

    /// Recompute `filtered` after `all` changed.
    ///
    /// A remote result set is stale once the catalog is refetched, so
    /// remote mode falls back to the full list until the next search.
    fn refilter(&mut self) {
        self.filtered = match self.mode {
            SearchMode::Local => filter(&self.all, &self.criteria),
            SearchMode::Remote => self.all.clone(),
        };
        self.clamp_page();
    }

    // ========== Pagination ==========

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(|filtered| / page_size)`; 0 for an empty view
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size)
    }

    /// Rows on the current page
    pub fn page_items(&self) -> &[Product] {
        let start = (self.page * self.page_size).min(self.filtered.len());
        let end = (start + self.page_size).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Jump to `page`, clamped to the last page
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.page = page;
        self.clamp_page();
        self.page
    }

    /// Keep `page * page_size < max(1, |filtered|)`
    pub fn clamp_page(&mut self) {
        let last = self.total_pages().saturating_sub(1);
        if self.page > last {
            self.page = last;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::ProductStatus;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            price: Decimal::from(10),
            stock: 1,
            category_id: None,
            status: ProductStatus::Active,
            description: None,
            image_urls: vec![],
            discount: None,
        }
    }

    fn cache_with(n: i64, page_size: usize) -> CatalogCache {
        let mut cache = CatalogCache::new(page_size, 100);
        cache.all = (1..=n).map(|i| product(i, &format!("Item {i}"))).collect();
        cache.refilter();
        cache
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(cache_with(0, 10).total_pages(), 0);
        assert_eq!(cache_with(10, 10).total_pages(), 1);
        assert_eq!(cache_with(11, 10).total_pages(), 2);
    }

    #[test]
    fn test_page_items_and_navigation() {
        let mut cache = cache_with(25, 10);
        assert_eq!(cache.page_items().len(), 10);
        assert_eq!(cache.next_page(), 1);
        assert_eq!(cache.next_page(), 2);
        assert_eq!(cache.page_items().len(), 5);
        assert_eq!(cache.next_page(), 2);
        assert_eq!(cache.prev_page(), 1);
        assert_eq!(cache.go_to_page(99), 2);
    }

    #[test]
    fn test_remove_local_clamps_page() {
        let mut cache = cache_with(11, 10);
        cache.go_to_page(1);
        assert!(cache.remove_local(&ProductId::from(11i64)));
        assert_eq!(cache.page(), 0);
        assert_eq!(cache.total_products(), 10);
        assert!(cache.get(&ProductId::from(11i64)).is_none());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cache = cache_with(3, 10);
        assert!(!cache.remove_local(&ProductId::from("nope")));
        assert_eq!(cache.total_products(), 3);
    }

    #[test]
    fn test_patch_refilters_in_local_mode() {
        let mut cache = cache_with(3, 10);
        cache.set_criteria(FilterCriteria::text("item"));
        cache.refilter();
        assert_eq!(cache.filtered().len(), 3);

        let patch = ProductPatch {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(cache.apply_local_patch(&ProductId::from(2i64), patch));
        assert_eq!(cache.filtered().len(), 2);
        assert_eq!(cache.get(&ProductId::from(2i64)).unwrap().name, "Renamed");
    }

    #[test]
    fn test_patch_unknown_id_is_silent() {
        let mut cache = cache_with(2, 10);
        let before = cache.all().to_vec();
        assert!(!cache.apply_local_patch(
            &ProductId::from("missing"),
            ProductPatch::status(ProductStatus::Inactive)
        ));
        assert_eq!(cache.all(), before.as_slice());
    }

    #[test]
    fn test_patch_in_remote_mode_updates_visible_row() {
        let mut cache = cache_with(3, 10);
        cache.set_mode(SearchMode::Remote);
        cache.replace_filtered(vec![product(2, "Item 2")]);
        cache.apply_local_patch(
            &ProductId::from(2i64),
            ProductPatch::status(ProductStatus::Inactive),
        );
        assert_eq!(cache.filtered().len(), 1);
        assert_eq!(cache.filtered()[0].status, ProductStatus::Inactive);
    }

    #[test]
    fn test_patch_in_remote_mode_reaches_uncached_row() {
        let mut cache = CatalogCache::new(10, 100);
        cache.set_mode(SearchMode::Remote);
        cache.replace_filtered(vec![product(7, "Found remotely")]);

        assert!(cache.apply_local_patch(
            &ProductId::from(7i64),
            ProductPatch::status(ProductStatus::Inactive),
        ));
        assert!(cache.all().is_empty());
        assert_eq!(cache.filtered()[0].status, ProductStatus::Inactive);
    }

    #[test]
    fn test_set_criteria_keeps_mode() {
        let mut cache = cache_with(3, 10);
        cache.set_mode(SearchMode::Remote);
        cache.set_criteria(FilterCriteria::text("item"));
        assert_eq!(cache.mode(), SearchMode::Remote);
        cache.clear_criteria();
        assert_eq!(cache.mode(), SearchMode::Remote);
    }

    #[test]
    fn test_same_criteria_keeps_page() {
        let mut cache = cache_with(30, 10);
        cache.go_to_page(2);
        cache.set_criteria(FilterCriteria::default());
        assert_eq!(cache.page(), 2);
        cache.set_criteria(FilterCriteria::text("x"));
        assert_eq!(cache.page(), 0);
    }
}
