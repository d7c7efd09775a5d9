//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - Readiness (backend + session database)
//!
//! # Auth (not gated)
//! GET  /admin/login                 - Login page
//! POST /admin/login                 - Password sign-in
//! POST /admin/logout                - Sign out
//!
//! # Pages (gated)
//! GET  /admin                       - Dashboard
//! GET  /admin/categories            - Category list + add button
//! GET  /admin/orders                - Orders shell (table skeleton)
//! GET  /admin/orders/table          - Orders table fragment
//! GET  /admin/shipping-zones        - Shipping zones shell
//! GET  /admin/shipping-zones/table  - Shipping zones table fragment
//! GET  /admin/settings/brand        - Brand settings
//!
//! # API (not gated; backend row-level security applies)
//! GET  /api/categories              - List categories
//! POST /api/categories              - Create a category
//! ```

pub mod api;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod settings;
pub mod shipping_zones;

use axum::{Router, routing::get};
use souk_core::SessionUser;

use crate::state::AppState;

/// Signed-in admin, as shown in the page header.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub email: String,
}

impl From<&SessionUser> for AdminUserView {
    fn from(user: &SessionUser) -> Self {
        Self {
            email: user.email.clone().unwrap_or_else(|| user.id.to_string()),
        }
    }
}

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth::router())
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/categories", get(categories::index))
        .route("/admin/orders", get(orders::index))
        .route("/admin/orders/table", get(orders::table))
        .route("/admin/shipping-zones", get(shipping_zones::index))
        .route("/admin/shipping-zones/table", get(shipping_zones::table))
        .route("/admin/settings/brand", get(settings::brand))
        .merge(api::router())
        .fallback(crate::error::not_found)
}
