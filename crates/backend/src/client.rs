//! Backend client and its request contexts.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use souk_core::{AccessToken, StoreFactory, Stores};
use url::Url;

use crate::config::BackendConfig;
use crate::error::BackendError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the hosted backend's REST and auth APIs.
///
/// Cheap to clone; the HTTP connection pool is shared. A clone made with
/// [`BackendClient::with_session`] sends the user's token instead of the
/// API key as bearer credential.
#[derive(Clone)]
pub struct BackendClient {
    pub(crate) inner: Arc<BackendClientInner>,
    pub(crate) session: Option<AccessToken>,
}

pub(crate) struct BackendClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) rest_url: Url,
    pub(crate) auth_url: Url,
    pub(crate) api_key: SecretString,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("rest_url", &self.inner.rest_url.as_str())
            .field("session", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    /// Create an anonymous (server context) client using the anon key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::with_key(&config.url, config.anon_key.clone())
    }

    /// Create a service-role client. Bypasses row-level security.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::MissingServiceKey` if no service key is set.
    pub fn service(config: &BackendConfig) -> Result<Self, BackendError> {
        let key = config
            .service_role_key
            .clone()
            .ok_or(BackendError::MissingServiceKey)?;
        Self::with_key(&config.url, key)
    }

    fn with_key(base: &Url, api_key: SecretString) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                http,
                rest_url: join_dir(base, "rest/v1/")?,
                auth_url: join_dir(base, "auth/v1/")?,
                api_key,
            }),
            session: None,
        })
    }

    /// A clone of this client acting as the given session.
    #[must_use]
    pub fn with_session(&self, token: &AccessToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            session: Some(token.clone()),
        }
    }

    /// Whether this client carries a user session.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Attach the API key and bearer credential to a request.
    ///
    /// The bearer is the session token when bound, else the API key itself.
    pub(crate) fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let api_key = self.inner.api_key.expose_secret();
        let bearer = self
            .session
            .as_ref()
            .map_or(api_key, AccessToken::expose);

        request.header("apikey", api_key).bearer_auth(bearer)
    }
}

impl StoreFactory for BackendClient {
    fn bind(&self, token: Option<&AccessToken>) -> Arc<dyn Stores> {
        match token {
            Some(token) => Arc::new(self.with_session(token)),
            None => Arc::new(Self {
                inner: Arc::clone(&self.inner),
                session: None,
            }),
        }
    }
}

/// Join a directory path onto the base URL, keeping any base path prefix.
fn join_dir(base: &Url, dir: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(dir)
}
