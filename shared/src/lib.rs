//! Shared types for the seller catalog
//!
//! Wire models, request bodies and response shapes used to talk to the
//! catalog backend.

pub mod dto;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use dto::{CategoryPayload, CategoryRef, ProductPayload, StatusPayload};
pub use models::{
    Category, CategoryId, Discount, Product, ProductId, ProductPatch, ProductStatus,
    SellerProfile, SellerStatus, StatusLabels,
};
pub use response::{BulkResult, ErrorBody, ProductPage, SellerProductsResponse};
