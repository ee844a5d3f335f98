//! Data Transfer Objects (DTOs)
//!
//! Request bodies sent to the backend. Product payloads are only built
//! from drafts that passed client-side validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, Discount};

// =============================================================================
// Product
// =============================================================================

/// How a payload points at its category
///
/// Single-item forms pick a category by id; bulk import files name it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CategoryRef {
    #[serde(rename = "categoryId")]
    Id(CategoryId),
    #[serde(rename = "categoryName")]
    Name(String),
}

/// Create/update product body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(flatten)]
    pub category: CategoryRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

/// Status change body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

// =============================================================================
// Category
// =============================================================================

/// Create/rename category body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}
