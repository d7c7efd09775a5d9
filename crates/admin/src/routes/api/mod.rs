//! JSON API endpoints for admin.
//!
//! These routes live outside `/admin` and are not behind the auth gate;
//! writes run with the caller's session token so the backend's row-level
//! security decides who may write.

pub mod categories;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/categories", get(categories::list).post(categories::create))
}
