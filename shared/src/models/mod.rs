//! Data models
//!
//! Wire types for the seller catalog backend. IDs are opaque strings;
//! the backend may emit them as JSON numbers or strings.

pub mod category;
pub mod id;
pub mod product;
pub mod seller;

// Re-exports
pub use category::*;
pub use id::*;
pub use product::*;
pub use seller::*;
