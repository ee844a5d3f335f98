//! Local vs remote search
//!
//! The mode is switched explicitly by the caller and never re-runs a
//! search by itself; the view only changes on the next `search` or
//! `clear_filters`.
//!
//! Remote mode sends `criteria.text` only. Category and price criteria
//! are ignored there, matching the backend's search endpoint.

use shared::Product;

use super::cache::CatalogCache;
use super::filter::{FilterCriteria, SearchMode, filter};
use crate::http::CatalogApi;

#[derive(Debug, Default)]
pub struct SearchModeController {
    last_error: Option<String>,
}

impl SearchModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error from the most recent remote search, for the caller to surface
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Switch mode; the current view is left as is
    pub fn set_mode(&mut self, cache: &mut CatalogCache, mode: SearchMode) {
        tracing::debug!(?mode, "search mode changed");
        cache.set_mode(mode);
    }

    /// Run a search and install the result as the filtered view.
    ///
    /// Never fails: a remote error degrades to an empty result and is kept
    /// in [`last_error`](Self::last_error).
    pub async fn search<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        criteria: FilterCriteria,
    ) -> Vec<Product> {
        self.last_error = None;
        let mode = cache.mode();
        cache.set_criteria(criteria);

        let view = match mode {
            SearchMode::Local => filter(cache.all(), cache.criteria()),
            SearchMode::Remote => {
                let query = cache.criteria().text.trim().to_string();
                match api.search_products(&query).await {
                    Ok(products) => products,
                    Err(e) => {
                        tracing::warn!(error = %e, %query, "remote search failed");
                        self.last_error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
        };

        cache.replace_filtered(view);
        tracing::debug!(
            ?mode,
            matched = cache.filtered().len(),
            pages = cache.total_pages(),
            "search applied"
        );
        cache.filtered().to_vec()
    }

    /// Drop every predicate and show the whole cached catalog
    pub fn clear_filters(&mut self, cache: &mut CatalogCache) {
        self.last_error = None;
        cache.clear_criteria();
    }
}
