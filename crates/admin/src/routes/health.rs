//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::db;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Reads the categories table and, when sessions are stored in
/// `PostgreSQL`, pings the session database. 503 if either fails.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if let Err(e) = state.stores(None).list_categories().await {
        tracing::warn!(error = %e, "Readiness check failed: backend");
        return StatusCode::SERVICE_UNAVAILABLE;
    }

    if let Some(pool) = state.session_db()
        && let Err(e) = db::ping(pool).await
    {
        tracing::warn!(error = %e, "Readiness check failed: session database");
        return StatusCode::SERVICE_UNAVAILABLE;
    }

    StatusCode::OK
}
