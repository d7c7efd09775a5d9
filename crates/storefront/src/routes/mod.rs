//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page (categories)
//! GET  /health                   - Liveness
//! GET  /health/ready             - Readiness (backend reachable)
//!
//! # Checkout
//! GET  /checkout                 - Delivery estimate page (wilaya select)
//! GET  /checkout/shipping-rates  - Shipping rates fragment (HTMX)
//!
//! # API
//! GET  /api/shipping-rates       - Shipping rates JSON
//! ```

pub mod api;
pub mod checkout;
pub mod health;
pub mod home;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/checkout", get(checkout::page))
        .route("/checkout/shipping-rates", get(checkout::shipping_rates))
        .route("/api/shipping-rates", get(api::shipping_rates))
        .fallback(crate::error::not_found)
}
