//! Catalog Client - seller catalog core
//!
//! Keeps a locally cached product catalog in step with the backend:
//! local and remote search, pagination, validated writes with cache
//! reconciliation, and bulk import.

pub mod browser;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod session;
pub mod validation;

pub use browser::ProductBrowser;
pub use catalog::{
    CatalogCache, FilterCriteria, MutationCoordinator, ProductCatalog, SearchMode,
    SearchModeController, filter,
};
pub use categories::CategoryStore;
pub use config::ClientConfig;
pub use error::{CatalogError, CatalogResult, ClientError, ClientResult};
pub use self::http::{CatalogApi, NetworkHttpClient};
pub use logger::init_logger;
pub use session::{Role, Session};
pub use validation::{
    BatchReport, DraftDiscount, DraftValue, ImportPreview, LineError, PreviewRow, ProductDraft,
    ValidationReport,
};

// Re-export shared types for convenience
pub use shared::{
    BulkResult, Category, CategoryId, CategoryRef, Product, ProductId, ProductPatch,
    ProductPayload, ProductStatus, StatusLabels,
};
