//! Unified error handling for admin.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use souk_core::StoreError;
use thiserror::Error;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// No route matched the path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !matches!(self, Self::NotFound(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Store(StoreError::Transport(_)) => StatusCode::BAD_GATEWAY,
            Self::Store(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let message = match &self {
            Self::NotFound(_) => "الصفحة غير موجودة",
            _ => "حدث خطأ غير متوقع",
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}

/// Set the Sentry user context for the signed-in admin.
pub fn set_sentry_user(user: &souk_core::SessionUser) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user.id.to_string()),
            email: user.email.clone(),
            ..Default::default()
        }));
    });
}
