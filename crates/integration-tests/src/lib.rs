//! Integration tests for Souk.
//!
//! [`TestServers`] runs the storefront and the admin panel in-process on
//! ephemeral ports, both over one [`MemoryBackend`], so tests can drive
//! them with a real HTTP client and see each other's writes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p souk-integration-tests
//!
//! # Against a deployed stack (STOREFRONT_URL, ADMIN_URL, ADMIN_EMAIL, ADMIN_PASSWORD)
//! cargo test -p souk-integration-tests -- --ignored
//! ```

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::Client;
use secrecy::SecretString;
use souk_admin::config::AdminConfig;
use souk_backend::BackendConfig;
use souk_backend::config::parse_base_url;
use souk_core::SessionUser;
use souk_core::testing::MemoryBackend;
use souk_storefront::config::{AnalyticsConfig, StorefrontConfig};
use tokio::net::TcpListener;
use uuid::Uuid;

/// Credentials accepted by [`TestServers::start`]'s backend.
pub const ADMIN_EMAIL: &str = "admin@souk.dz";
pub const ADMIN_PASSWORD: &str = "correct horse";
pub const ADMIN_TOKEN: &str = "integration-admin-token";

/// Storefront and admin panel listening on loopback.
pub struct TestServers {
    pub backend: MemoryBackend,
    pub storefront_url: String,
    pub admin_url: String,
}

impl TestServers {
    /// Start both apps over a backend that knows one admin login.
    pub async fn start() -> Self {
        Self::start_with(MemoryBackend::new()).await
    }

    /// Start both apps over `backend`, adding the admin login to it.
    pub async fn start_with(backend: MemoryBackend) -> Self {
        let backend = backend
            .with_session(ADMIN_TOKEN, admin_user())
            .with_login(ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_TOKEN);

        let storefront = souk_storefront::app(souk_storefront::state::AppState::new(
            storefront_config(),
            Arc::new(backend.clone()),
        ));
        let admin = souk_admin::app(
            souk_admin::state::AppState::new(admin_config(), Arc::new(backend.clone()), None),
            souk_admin::middleware::session_layer(tower_sessions::MemoryStore::default(), false),
        );

        Self {
            storefront_url: serve(storefront).await,
            admin_url: serve(admin).await,
            backend,
        }
    }
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

/// HTTP client that keeps cookies and does not follow redirects.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// The admin behind [`ADMIN_TOKEN`].
#[must_use]
pub fn admin_user() -> SessionUser {
    SessionUser {
        id: Uuid::nil(),
        email: Some(ADMIN_EMAIL.to_string()),
    }
}

fn backend_config() -> BackendConfig {
    BackendConfig {
        url: parse_base_url("http://127.0.0.1:54321").expect("valid url"),
        anon_key: "anon".to_string().into(),
        service_role_key: None,
    }
}

fn storefront_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        backend: backend_config(),
        analytics: AnalyticsConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn admin_config() -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        database_url: SecretString::from("postgres://localhost/souk"),
        backend: backend_config(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}
