//! Store ports.
//!
//! Every read and write the storefront and admin panel perform goes through
//! one of these traits. The backend crate implements them over the hosted
//! backend's REST API; [`crate::testing::MemoryBackend`] implements them in
//! memory so handlers can be tested without a network.
//!
//! Stores are bound to a request: [`StoreFactory::bind`] takes the caller's
//! access token (if any) so the backend applies that user's row-level
//! security. Nothing here caches across requests.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{
    BrandSettings, Category, NewCategory, Order, ShippingZone, WilayaCode,
};

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A single-row fetch matched no rows.
    #[error("no matching row")]
    NotFound,

    /// A single-row fetch matched more than one row.
    #[error("more than one matching row")]
    MultipleRows,

    /// The backend rejected the operation (constraint violation, RLS, ...).
    #[error("backend error {code}: {message}")]
    Backend { code: String, message: String },

    /// The caller's token was missing, expired or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend could not be reached or timed out.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a body that does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

/// A backend session access token (JWT).
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// The user behind a valid session, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens returned by a successful password sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: AccessToken,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: SessionUser,
}

/// Access to the `categories` table.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories, by name.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Insert a category and return the row the backend created.
    async fn insert_category(&self, category: &NewCategory) -> Result<Category, StoreError>;
}

/// Access to the `orders` table.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;
}

/// Access to the `shipping_zones` table.
#[async_trait]
pub trait ShippingZoneStore: Send + Sync {
    /// All zones, by wilaya code ascending.
    async fn list_shipping_zones(&self) -> Result<Vec<ShippingZone>, StoreError>;

    /// The single zone for a wilaya.
    ///
    /// Fails with [`StoreError::NotFound`] or [`StoreError::MultipleRows`]
    /// unless exactly one row matches.
    async fn shipping_zone(&self, wilaya: WilayaCode) -> Result<ShippingZone, StoreError>;

    /// Insert or replace the zone for `zone.wilaya_code`.
    async fn upsert_shipping_zone(&self, zone: &ShippingZone) -> Result<ShippingZone, StoreError>;
}

/// Access to the `brand_settings` singleton.
#[async_trait]
pub trait BrandSettingsStore: Send + Sync {
    /// The single settings row; fails unless exactly one row exists.
    async fn brand_settings(&self) -> Result<BrandSettings, StoreError>;
}

/// Resolves a session token to the user it belongs to.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` when the token is not (or no longer) a valid session.
    async fn resolve(&self, token: &AccessToken) -> Result<Option<SessionUser>, StoreError>;
}

/// Email/password sign-in, delegated to the backend's auth service.
#[async_trait]
pub trait PasswordAuthenticator: Send + Sync {
    /// `Ok(None)` when the backend rejects the credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthSession>, StoreError>;

    /// Revoke a session. Revoking an already invalid token succeeds.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), StoreError>;
}

/// All entity stores behind one request-bound handle.
pub trait Stores: CategoryStore + OrderStore + ShippingZoneStore + BrandSettingsStore {}

impl<T> Stores for T where T: CategoryStore + OrderStore + ShippingZoneStore + BrandSettingsStore {}

/// Binds stores to the request context.
pub trait StoreFactory: Send + Sync {
    /// Stores acting as the given session, or anonymously when `None`.
    fn bind(&self, token: Option<&AccessToken>) -> Arc<dyn Stores>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.secret".to_string());
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
