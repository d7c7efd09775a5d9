//! PostgREST request helpers.
//!
//! Tables live under `{url}/rest/v1/{table}`. Filters are query parameters
//! (`wilaya_code=eq.16`), ordering is `order=column.asc|desc`, and single
//! rows are requested with the `vnd.pgrst.object+json` media type, which
//! makes the server answer 406 unless exactly one row matches.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::BackendClient;
use crate::error::BackendError;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body returned by the REST API.
#[derive(Debug, Default, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Query parameters for a table request.
#[derive(Debug, Default, Clone)]
pub(crate) struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub(crate) fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub(crate) fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    pub(crate) fn on_conflict(mut self, columns: &str) -> Self {
        self.params
            .push(("on_conflict".to_string(), columns.to_string()));
        self
    }
}

impl BackendClient {
    fn table_request(
        &self,
        method: Method,
        table: &str,
        query: &Query,
    ) -> Result<reqwest::RequestBuilder, BackendError> {
        let url = self.inner.rest_url.join(table)?;
        let request = self.inner.http.request(method, url).query(&query.params);
        Ok(self.authorize(request))
    }

    /// Fetch all rows matching the query.
    pub(crate) async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let request = self.table_request(Method::GET, table, query)?;
        read_json(table, request.send().await?).await
    }

    /// Fetch exactly one row.
    pub(crate) async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<T, BackendError> {
        let request = self
            .table_request(Method::GET, table, query)?
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT);
        read_json(table, request.send().await?).await
    }

    /// Insert one row and return the row as created.
    pub(crate) async fn insert_single<B, T>(&self, table: &str, row: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .table_request(Method::POST, table, &Query::new())?
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(row);
        read_json(table, request.send().await?).await
    }

    /// Insert one row, merging into the existing row on conflict.
    pub(crate) async fn upsert_single<B, T>(
        &self,
        table: &str,
        row: &B,
        conflict_columns: &str,
    ) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let query = Query::new().on_conflict(conflict_columns);
        let request = self
            .table_request(Method::POST, table, &query)?
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row);
        read_json(table, request.send().await?).await
    }
}

/// Check the status and decode the body, mapping API errors.
pub(crate) async fn read_json<T: DeserializeOwned>(
    context: &str,
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(api_error(context, status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            context = %context,
            error = %e,
            body_preview = %truncate(&body, 500),
            "Failed to parse backend response"
        );
        BackendError::Parse(e)
    })
}

fn api_error(context: &str, status: StatusCode, body: &str) -> BackendError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = parsed.code.unwrap_or_default();

    if status == StatusCode::NOT_ACCEPTABLE && code == "PGRST116" {
        // details reads "The result contains N rows"
        let no_rows = parsed
            .details
            .as_deref()
            .is_some_and(|d| d.contains(" 0 rows"));
        return if no_rows {
            BackendError::NoRows
        } else {
            BackendError::MultipleRows
        };
    }

    if status == StatusCode::UNAUTHORIZED {
        return BackendError::Unauthorized;
    }

    tracing::error!(
        context = %context,
        status = %status,
        code = %code,
        body = %truncate(body, 500),
        "Backend request failed"
    );

    BackendError::Api {
        status: status.as_u16(),
        code,
        message: parsed.message.unwrap_or_else(|| status.to_string()),
    }
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => body.get(..idx).unwrap_or(body),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let query = Query::new()
            .select("*")
            .eq("wilaya_code", 16)
            .order("created_at", false);
        assert_eq!(
            query.params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("wilaya_code".to_string(), "eq.16".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_row_errors() {
        let none = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert!(matches!(
            api_error("t", StatusCode::NOT_ACCEPTABLE, none),
            BackendError::NoRows
        ));

        let many = r#"{"code":"PGRST116","details":"The result contains 2 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert!(matches!(
            api_error("t", StatusCode::NOT_ACCEPTABLE, many),
            BackendError::MultipleRows
        ));
    }

    #[test]
    fn test_api_error_keeps_code_and_message() {
        let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value"}"#;
        match api_error("categories", StatusCode::CONFLICT, body) {
            BackendError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 409);
                assert_eq!(code, "23505");
                assert_eq!(message, "duplicate key value");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body() {
        match api_error("categories", StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") {
            BackendError::Api { status, code, .. } => {
                assert_eq!(status, 502);
                assert!(code.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("حدث خطأ", 3), "حدث");
        assert_eq!(truncate("short", 500), "short");
    }
}
