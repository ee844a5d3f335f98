//! Seller profile as reported by `/api/auth/me`

use serde::{Deserialize, Serialize};

/// Seller account review status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SellerStatus {
    Approved,
    Pending,
    Rejected,
    /// Anything the backend adds later
    Unknown(String),
}

impl From<String> for SellerStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "APPROVED" => Self::Approved,
            "PENDING" => Self::Pending,
            "REJECTED" => Self::Rejected,
            _ => Self::Unknown(s),
        }
    }
}

impl From<SellerStatus> for String {
    fn from(s: SellerStatus) -> Self {
        match s {
            SellerStatus::Approved => "APPROVED".to_string(),
            SellerStatus::Pending => "PENDING".to_string(),
            SellerStatus::Rejected => "REJECTED".to_string(),
            SellerStatus::Unknown(other) => other,
        }
    }
}

/// Current user response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfile {
    /// Absent for accounts that never applied as sellers
    #[serde(default)]
    pub seller_status: Option<SellerStatus>,
    /// Role name, e.g. "ADMIN" or "SELLER"
    #[serde(default)]
    pub role: Option<String>,
}
