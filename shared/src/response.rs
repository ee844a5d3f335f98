//! Response shapes returned by the backend

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// `GET /api/seller/products`
///
/// Older deployments answer with a bare array, newer ones wrap it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SellerProductsResponse {
    Paged(PagedProducts),
    Bare(Vec<Product>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedProducts {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

impl SellerProductsResponse {
    /// Normalize both shapes into `(products, total)`.
    ///
    /// `total` is `None` when the server did not report one; a bare array is
    /// always the complete list.
    pub fn into_parts(self) -> (Vec<Product>, Option<u64>) {
        match self {
            Self::Paged(page) => (page.products, page.total_elements),
            Self::Bare(products) => {
                let total = products.len() as u64;
                (products, Some(total))
            }
        }
    }
}

/// `GET /api/products` (server-side pagination)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub content: Vec<Product>,
    #[serde(default)]
    pub total_pages: u32,
}

/// `POST /api/seller/products/bulk`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult {
    #[serde(default)]
    pub successful: u32,
    #[serde(default)]
    pub failed: u32,
}

/// Error envelope on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Server-reported message, verbatim
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}
