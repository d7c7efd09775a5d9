//! Session middleware configuration for admin.
//!
//! Sessions live in `PostgreSQL` (`admin.session`) and only ever hold the
//! backend access token of the signed-in admin. The token is re-validated
//! against the backend on every gated request, so a revoked token stops
//! working immediately even though the cookie survives.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use souk_core::{AccessToken, Stores};
use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;
use crate::state::AppState;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "souk_admin_session";

/// Session keys.
pub mod keys {
    /// Backend access token of the signed-in admin.
    pub const ACCESS_TOKEN: &str = "access_token";
}

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Session layer over any store; `secure` marks the cookie HTTPS-only.
#[must_use]
pub fn session_layer<S>(store: S, secure: bool) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Create the session layer with the `PostgreSQL` store.
///
/// # Errors
///
/// Returns an error if the schema or table name is rejected by the store.
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<SessionManagerLayer<PostgresStore>, sqlx::Error> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("admin")
        .map_err(|e| sqlx::Error::Configuration(e.into()))?
        .with_table_name("session")
        .map_err(|e| sqlx::Error::Configuration(e.into()))?;

    Ok(session_layer(store, config.is_secure()))
}

/// Read the stored access token; an unreadable session counts as signed out.
pub async fn session_token(session: &Session) -> Option<AccessToken> {
    match session.get::<AccessToken>(keys::ACCESS_TOKEN).await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read admin session");
            None
        }
    }
}

/// Stores bound to the caller's session token, or anonymous without one.
///
/// Writes through these stores run under the signed-in admin's row-level
/// security policies.
pub struct RequestStores(pub Arc<dyn Stores>);

impl FromRequestParts<AppState> for RequestStores {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.extensions.get::<Session>() {
            Some(session) => session_token(session).await,
            None => None,
        };
        Ok(Self(state.stores(token.as_ref())))
    }
}
