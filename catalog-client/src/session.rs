//! Session capability
//!
//! Screens receive a [`Session`] at construction instead of reading
//! authentication state from globals.

use shared::{SellerProfile, SellerStatus};

use crate::error::ClientError;
use crate::http::CatalogApi;

/// Role as far as the catalog screens care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    /// Approved seller
    Seller,
    Customer,
}

/// Authentication capability injected into the catalog core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub role: Role,
}

impl Session {
    pub fn new(is_authenticated: bool, role: Role) -> Self {
        Self {
            is_authenticated,
            role,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(false, Role::Customer)
    }

    pub fn seller() -> Self {
        Self::new(true, Role::Seller)
    }

    pub fn admin() -> Self {
        Self::new(true, Role::Admin)
    }

    /// Sellers and admins may edit products
    pub fn can_manage_products(&self) -> bool {
        self.is_authenticated && matches!(self.role, Role::Seller | Role::Admin)
    }

    /// Only admins edit the category list
    pub fn can_manage_categories(&self) -> bool {
        self.is_authenticated && self.role == Role::Admin
    }

    /// Derive the session from `/api/auth/me`.
    ///
    /// Sellers whose application is not approved act as customers.
    pub fn from_profile(profile: &SellerProfile) -> Self {
        let is_admin = profile
            .role
            .as_deref()
            .is_some_and(|r| r.trim().eq_ignore_ascii_case("admin"));
        let role = if is_admin {
            Role::Admin
        } else if profile.seller_status == Some(SellerStatus::Approved) {
            Role::Seller
        } else {
            Role::Customer
        };
        Self::new(true, role)
    }

    /// Ask the backend who we are; any failure yields an anonymous session
    pub async fn resolve<A: CatalogApi + ?Sized>(api: &A) -> Self {
        match api.me().await {
            Ok(profile) => {
                let session = Self::from_profile(&profile);
                tracing::debug!(role = ?session.role, "session resolved");
                session
            }
            Err(ClientError::Unauthorized) => Self::anonymous(),
            Err(e) => {
                tracing::warn!(error = %e, "could not resolve session");
                Self::anonymous()
            }
        }
    }
}
