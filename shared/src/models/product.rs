//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CategoryId, ProductId};

/// Maximum number of images attached to one product
pub const MAX_PRODUCT_IMAGES: usize = 3;

/// Product visibility status
///
/// Serialized as `ACTIVE` / `INACTIVE`. Decoding is case-insensitive and
/// also accepts the Spanish storefront labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Error)]
#[error("unknown product status: {0}")]
pub struct UnknownStatus(pub String);

impl ProductStatus {
    /// The other value of the two-value domain
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl TryFrom<String> for ProductStatus {
    type Error = UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "active" | "activo" => Ok(Self::Active),
            "inactive" | "inactivo" => Ok(Self::Inactive),
            _ => Err(UnknownStatus(s)),
        }
    }
}

impl From<ProductStatus> for String {
    fn from(s: ProductStatus) -> Self {
        s.as_str().to_string()
    }
}

/// Locale labels submitted to the status endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabels {
    pub active: String,
    pub inactive: String,
}

impl StatusLabels {
    pub fn new(active: impl Into<String>, inactive: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            inactive: inactive.into(),
        }
    }

    pub fn label(&self, status: ProductStatus) -> &str {
        match status {
            ProductStatus::Active => &self.active,
            ProductStatus::Inactive => &self.inactive,
        }
    }

    /// Map a status string as stored by the backend.
    ///
    /// Matches the configured labels first, then the canonical names and
    /// the built-in locale aliases. Case and surrounding spaces are ignored.
    pub fn parse(&self, raw: &str) -> Option<ProductStatus> {
        let raw = raw.trim().to_lowercase();
        if raw == self.active.trim().to_lowercase() {
            Some(ProductStatus::Active)
        } else if raw == self.inactive.trim().to_lowercase() {
            Some(ProductStatus::Inactive)
        } else {
            ProductStatus::try_from(raw).ok()
        }
    }
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self::new("ACTIVE", "INACTIVE")
    }
}

/// Percentage discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(default)]
    pub active: bool,
    /// 0-100
    pub percentage: Decimal,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    /// Category reference
    #[serde(default, alias = "categoryRef")]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub description: Option<String>,
    /// First entry is the primary image
    #[serde(default, alias = "images")]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Price after an active discount, rounded to cents
    pub fn effective_price(&self) -> Decimal {
        match &self.discount {
            Some(d) if d.active => {
                let pct = d.percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                (self.price * (Decimal::ONE_HUNDRED - pct) / Decimal::ONE_HUNDRED).round_dp(2)
            }
            _ => self.price,
        }
    }
}

/// Partial product update applied to a cached entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub category_id: Option<Option<CategoryId>>,
    pub status: Option<ProductStatus>,
    pub description: Option<Option<String>>,
    pub image_urls: Option<Vec<String>>,
    pub discount: Option<Option<Discount>>,
}

impl ProductPatch {
    /// Patch touching only the status field
    pub fn status(status: ProductStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Patch overwriting every field with a server echo
    pub fn from_echo(product: Product) -> Self {
        Self {
            name: Some(product.name),
            price: Some(product.price),
            stock: Some(product.stock),
            category_id: Some(product.category_id),
            status: Some(product.status),
            description: Some(product.description),
            image_urls: Some(product.image_urls),
            discount: Some(product.discount),
        }
    }

    pub fn apply_to(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.stock {
            product.stock = v;
        }
        if let Some(v) = self.category_id {
            product.category_id = v;
        }
        if let Some(v) = self.status {
            product.status = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.image_urls {
            product.image_urls = v;
        }
        if let Some(v) = self.discount {
            product.discount = v;
        }
    }
}
