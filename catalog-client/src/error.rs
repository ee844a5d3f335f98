//! Client error types

use http::StatusCode;
use shared::ProductId;
use thiserror::Error;

use crate::validation::{BatchReport, ValidationReport};

/// Transport-level error
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-2xx carrying a server message
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Non-2xx without a usable body
    #[error("Request failed with status {0}")]
    Status(StatusCode),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message reported by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Result type for transport operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Catalog operation error
///
/// Nothing here is fatal: every variant leaves the previous valid cache
/// state in place.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Read failed; the cache keeps its stale-but-valid contents
    #[error("Failed to load: {0}")]
    Fetch(#[source] ClientError),

    /// Write rejected; local state untouched
    #[error("{message}")]
    Mutation {
        message: String,
        #[source]
        source: Option<ClientError>,
    },

    /// Draft rejected before any network call
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// Bulk import rejected before any network call
    #[error("Import rejected: {0}")]
    BatchValidation(BatchReport),

    /// The session does not allow this action
    #[error("Not permitted: {0}")]
    NotPermitted(String),

    /// Product is not in the local cache
    #[error("Product not found: {0}")]
    NotFound(ProductId),
}

impl CatalogError {
    /// Wrap a failed write, keeping the server message verbatim when present
    pub fn mutation(err: ClientError, fallback: &str) -> Self {
        let message = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        Self::Mutation {
            message,
            source: Some(err),
        }
    }

    /// Message suitable for a toast/banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Mutation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
