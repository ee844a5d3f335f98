//! Client configuration

use shared::StatusLabels;

/// Client configuration for the catalog backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_API_URL | http://localhost:8080 | Backend base URL |
/// | CATALOG_TIMEOUT_SECS | 30 | Request timeout |
/// | CATALOG_PAGE_SIZE | 10 | Rows per visible page |
/// | CATALOG_FETCH_PAGE_SIZE | 100 | Rows per request during a full load |
/// | CATALOG_STATUS_ACTIVE / CATALOG_STATUS_INACTIVE | ACTIVE / INACTIVE | Status labels sent on toggle |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Rows per visible page, at least 1
    pub page_size: usize,

    /// Rows requested per call while fetching the full catalog
    pub fetch_page_size: usize,

    /// Labels submitted when toggling product status
    pub status_labels: StatusLabels,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            page_size: 10,
            fetch_page_size: 100,
            status_labels: StatusLabels::default(),
        }
    }

    /// Load configuration from environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::new(
            std::env::var("CATALOG_API_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        if let Some(v) = env_parse("CATALOG_TIMEOUT_SECS") {
            config = config.with_timeout(v);
        }
        if let Some(v) = env_parse("CATALOG_PAGE_SIZE") {
            config = config.with_page_size(v);
        }
        if let Some(v) = env_parse("CATALOG_FETCH_PAGE_SIZE") {
            config = config.with_fetch_page_size(v);
        }
        if let (Ok(active), Ok(inactive)) = (
            std::env::var("CATALOG_STATUS_ACTIVE"),
            std::env::var("CATALOG_STATUS_INACTIVE"),
        ) {
            config = config.with_status_labels(StatusLabels::new(active, inactive));
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set the visible page size (0 is clamped to 1)
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Set the page size used while fetching the full catalog
    pub fn with_fetch_page_size(mut self, size: usize) -> Self {
        self.fetch_page_size = size.max(1);
        self
    }

    /// Set the status labels
    pub fn with_status_labels(mut self, labels: StatusLabels) -> Self {
        self.status_labels = labels;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
