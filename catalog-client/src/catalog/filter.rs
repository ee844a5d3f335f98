//! Client-side product filtering
//!
//! Criteria combine with AND. An absent criterion matches everything.
//! The result keeps the input order, so filtering is stable and
//! idempotent.

use rust_decimal::Decimal;
use shared::{CategoryId, Product};

/// Where a search runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Predicate over the cached catalog
    #[default]
    Local,
    /// Server full-text search on `text` only
    Remote,
}

/// Active filter set, owned by the screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub text: String,
    pub category_id: Option<CategoryId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl FilterCriteria {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn with_min_price(mut self, min: Decimal) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn with_max_price(mut self, max: Decimal) -> Self {
        self.max_price = Some(max);
        self
    }

    /// No predicate set
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && self.category_id.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.text.trim().to_lowercase();
        if !needle.is_empty() {
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_desc = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_name && !in_desc {
                return false;
            }
        }
        if let Some(cat) = &self.category_id
            && product.category_id.as_ref() != Some(cat)
        {
            return false;
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        true
    }
}

/// Products of `all` satisfying every predicate in `criteria`, in order
pub fn filter(all: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    all.iter().filter(|p| criteria.matches(p)).cloned().collect()
}
