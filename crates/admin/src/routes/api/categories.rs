//! Categories API.
//!
//! `POST /api/categories` takes `{name, slug}` as JSON. Both fields must be
//! non-empty strings; nothing else is validated here. The created row is
//! echoed back as the backend returned it.

use axum::{
    Json,
    body::Bytes,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use souk_core::{Category, CategoryError, NewCategory, StoreError};
use thiserror::Error;
use tracing::instrument;

use crate::middleware::RequestStores;

/// Message for a missing or empty `name`/`slug`.
pub const MISSING_FIELDS: &str = "الاسم والرابط مطلوبان";
/// Message for a failed insert.
pub const INSERT_FAILED: &str = "حدث خطأ أثناء إضافة الصنف";
/// Message for anything else.
pub const UNEXPECTED: &str = "حدث خطأ غير متوقع";

/// Request body. Absent and `null` fields both read as `None`.
#[derive(Debug, Deserialize)]
struct CategoryPayload {
    name: Option<String>,
    slug: Option<String>,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Categories API failures.
#[derive(Debug, Error)]
pub enum CategoryApiError {
    /// `name` or `slug` missing, `null` or empty.
    #[error("name and slug are required")]
    MissingFields,

    /// The backend refused or failed the insert.
    #[error("category insert failed: {0}")]
    Insert(StoreError),

    /// Unreadable body, malformed JSON, wrong field types, failed list.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<CategoryError> for CategoryApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::MissingField => Self::MissingFields,
        }
    }
}

impl IntoResponse for CategoryApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            Self::MissingFields => (StatusCode::BAD_REQUEST, MISSING_FIELDS),
            Self::Insert(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Error adding category"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, INSERT_FAILED)
            }
            Self::Unexpected(_) => {
                tracing::error!(error = %self, "Categories API error");
                (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED)
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// GET /api/categories
#[instrument(skip_all)]
pub async fn list(
    RequestStores(stores): RequestStores,
) -> Result<Json<Vec<Category>>, CategoryApiError> {
    let categories = stores
        .list_categories()
        .await
        .map_err(|e| CategoryApiError::Unexpected(e.to_string()))?;
    Ok(Json(categories))
}

/// POST /api/categories
#[instrument(skip_all)]
pub async fn create(
    RequestStores(stores): RequestStores,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Category>), CategoryApiError> {
    let body = body.map_err(|e| CategoryApiError::Unexpected(e.body_text()))?;
    let payload: CategoryPayload = serde_json::from_slice(&body)
        .map_err(|e| CategoryApiError::Unexpected(e.to_string()))?;

    let category = NewCategory::new(payload.name, payload.slug)?;
    let created = stores
        .insert_category(&category)
        .await
        .map_err(CategoryApiError::Insert)?;

    tracing::info!(id = %created.id, slug = %created.slug, "Category created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use serde_json::{Value, json};
    use souk_core::testing::{Failures, MemoryBackend};

    use super::*;

    async fn post(backend: &MemoryBackend, body: &str) -> (StatusCode, Value) {
        let stores = RequestStores(Arc::new(backend.clone()));
        let response = create(stores, Ok(Bytes::from(body.to_owned())))
            .await
            .into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_creates_category() {
        let backend = MemoryBackend::new();

        let (status, body) = post(&backend, r#"{"name":"إلكترونيات","slug":"electronics"}"#).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "إلكترونيات");
        assert_eq!(body["slug"], "electronics");
        assert!(body["id"].is_number());
        assert_eq!(backend.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_store() {
        let backend = MemoryBackend::new();

        for body in [
            r#"{"slug":"electronics"}"#,
            r#"{"name":"إلكترونيات"}"#,
            r#"{"name":null,"slug":"electronics"}"#,
            r#"{"name":"","slug":"electronics"}"#,
            r#"{"name":"إلكترونيات","slug":""}"#,
            "{}",
        ] {
            let (status, json) = post(&backend, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json, json!({"error": MISSING_FIELDS}));
        }
        assert_eq!(MemoryBackend::count(&backend.calls().category_inserts), 0);
    }

    #[tokio::test]
    async fn test_insert_failure() {
        let backend = MemoryBackend::new().failing(Failures {
            categories: Some(StoreError::Backend {
                code: "23505".to_string(),
                message: "duplicate key value violates unique constraint".to_string(),
            }),
            ..Failures::default()
        });

        let (status, body) = post(&backend, r#"{"name":"ملابس","slug":"clothes"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": INSERT_FAILED}));
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_unexpected() {
        let backend = MemoryBackend::new();

        for body in ["not json", "null", r#"{"name":5,"slug":"five"}"#, "[]"] {
            let (status, json) = post(&backend, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{body}");
            assert_eq!(json, json!({"error": UNEXPECTED}));
        }
        assert_eq!(MemoryBackend::count(&backend.calls().category_inserts), 0);
    }
}
