//! Application state shared across handlers.

use std::sync::Arc;

use souk_core::{AccessToken, PasswordAuthenticator, SessionResolver, StoreFactory, Stores};
use sqlx::PgPool;

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// Holds the configuration, the backend behind its three ports and the
/// optional session database pool. Nothing mutable lives here: sessions
/// are resolved through the backend on every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    stores: Arc<dyn StoreFactory>,
    sessions: Arc<dyn SessionResolver>,
    auth: Arc<dyn PasswordAuthenticator>,
    session_db: Option<PgPool>,
}

impl AppState {
    /// Create a new application state over a single backend.
    ///
    /// `session_db` is the pool behind the session store, if sessions are
    /// kept in `PostgreSQL`; readiness checks cover it.
    #[must_use]
    pub fn new<B>(config: AdminConfig, backend: Arc<B>, session_db: Option<PgPool>) -> Self
    where
        B: StoreFactory + SessionResolver + PasswordAuthenticator + 'static,
    {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                stores: backend.clone(),
                sessions: backend.clone(),
                auth: backend,
                session_db,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Stores acting as the given session, or anonymously.
    #[must_use]
    pub fn stores(&self, token: Option<&AccessToken>) -> Arc<dyn Stores> {
        self.inner.stores.bind(token)
    }

    /// Session resolver used by the auth gate.
    #[must_use]
    pub fn sessions(&self) -> &dyn SessionResolver {
        self.inner.sessions.as_ref()
    }

    /// Password sign-in and sign-out.
    #[must_use]
    pub fn auth(&self) -> &dyn PasswordAuthenticator {
        self.inner.auth.as_ref()
    }

    /// Session database pool, when sessions are stored in `PostgreSQL`.
    #[must_use]
    pub fn session_db(&self) -> Option<&PgPool> {
        self.inner.session_db.as_ref()
    }
}
