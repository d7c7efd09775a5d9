//! Auth API: password sign-in, sign-out and session lookup.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use souk_core::{
    AccessToken, AuthSession, PasswordAuthenticator, SessionResolver, SessionUser, StoreError,
};

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::rest::read_json;

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl BackendClient {
    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidCredentials` when the backend rejects
    /// the credentials, or a transport/API error otherwise.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let url = self.inner.auth_url.join("token")?;
        let request = self
            .inner
            .http
            .post(url)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });

        let response = self.authorize(request).send().await?;

        // Wrong email or password comes back as 400 invalid_grant.
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(BackendError::InvalidCredentials);
        }

        read_json("auth/token", response).await
    }

    /// Revoke the session behind `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; an already invalid token is
    /// not an error.
    pub async fn revoke_session(&self, token: &AccessToken) -> Result<(), BackendError> {
        let url = self.inner.auth_url.join("logout")?;
        let request = self.with_session(token).authorize(self.inner.http.post(url));
        let response = request.send().await?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(()),
            s => Err(BackendError::Api {
                status: s.as_u16(),
                code: String::new(),
                message: "sign-out failed".to_string(),
            }),
        }
    }

    /// Look up the user behind a session token.
    async fn fetch_user(&self, token: &AccessToken) -> Result<Option<SessionUser>, BackendError> {
        let url = self.inner.auth_url.join("user")?;
        let request = self.with_session(token).authorize(self.inner.http.get(url));
        let response = request.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => read_json("auth/user", response).await.map(Some),
        }
    }
}

#[async_trait]
impl SessionResolver for BackendClient {
    async fn resolve(&self, token: &AccessToken) -> Result<Option<SessionUser>, StoreError> {
        self.fetch_user(token).await.map_err(StoreError::from)
    }
}

#[async_trait]
impl PasswordAuthenticator for BackendClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthSession>, StoreError> {
        match self.sign_in_with_password(email, password).await {
            Ok(session) => Ok(Some(session)),
            Err(BackendError::InvalidCredentials) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), StoreError> {
        self.revoke_session(token).await.map_err(StoreError::from)
    }
}
