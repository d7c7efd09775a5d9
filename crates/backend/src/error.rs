//! Error types for backend operations.

use souk_core::StoreError;
use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The REST API returned an error body.
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Single-row fetch matched no rows.
    #[error("No rows returned")]
    NoRows,

    /// Single-row fetch matched more than one row.
    #[error("Multiple rows returned")]
    MultipleRows,

    /// Token missing, expired or rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Email/password sign-in was rejected.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// JSON parsing error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A service-role client was requested without a service-role key.
    #[error("SUPABASE_SERVICE_ROLE_KEY is not configured")]
    MissingServiceKey,
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NoRows => Self::NotFound,
            BackendError::MultipleRows => Self::MultipleRows,
            BackendError::Unauthorized | BackendError::InvalidCredentials => Self::Unauthorized,
            BackendError::Api { code, message, .. } => Self::Backend { code, message },
            BackendError::Http(e) => Self::Transport(e.to_string()),
            BackendError::Parse(e) => Self::Decode(e.to_string()),
            BackendError::Url(e) => Self::Transport(e.to_string()),
            BackendError::MissingServiceKey => Self::Unauthorized,
        }
    }
}
