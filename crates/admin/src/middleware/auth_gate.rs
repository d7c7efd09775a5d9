//! Admin auth gate.
//!
//! Every request under `/admin` except the login pages needs a session the
//! backend still accepts. The decision itself is [`check`], a plain async
//! function over the path, the stored token and a [`SessionResolver`]; the
//! middleware only reads the token from the session and applies the
//! decision.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use souk_core::{AccessToken, SessionResolver, SessionUser};
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::middleware::session::session_token;
use crate::state::AppState;

/// Where unauthenticated admin requests are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not a protected path.
    PassThrough,
    /// Protected path with a valid session.
    Authenticated(SessionUser),
    /// Protected path without a valid session.
    RedirectToLogin,
}

/// Whether `path` is protected: `/admin` and everything below it, except
/// paths starting with `/admin/login`.
#[must_use]
pub fn is_gated(path: &str) -> bool {
    let admin = path == "/admin" || path.starts_with("/admin/");
    admin && !path.starts_with(LOGIN_PATH)
}

/// Decide whether a request may proceed.
///
/// The resolver is only consulted for protected paths that carry a token.
/// A resolver error is treated as "not signed in".
pub async fn check(
    path: &str,
    token: Option<&AccessToken>,
    resolver: &dyn SessionResolver,
) -> GateDecision {
    if !is_gated(path) {
        return GateDecision::PassThrough;
    }
    let Some(token) = token else {
        return GateDecision::RedirectToLogin;
    };

    match resolver.resolve(token).await {
        Ok(Some(user)) => GateDecision::Authenticated(user),
        Ok(None) => GateDecision::RedirectToLogin,
        Err(e) => {
            tracing::warn!(path, error = %e, "Session lookup failed, treating as signed out");
            GateDecision::RedirectToLogin
        }
    }
}

/// Apply the gate to every request.
///
/// Authenticated requests carry the resolved [`SessionUser`] in their
/// extensions, available to handlers through [`CurrentUser`].
pub async fn auth_gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    let token = if is_gated(&path) {
        match request.extensions().get::<Session>() {
            Some(session) => session_token(session).await,
            None => None,
        }
    } else {
        None
    };

    match check(&path, token.as_ref(), state.sessions()).await {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::Authenticated(user) => {
            set_sentry_user(&user);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        GateDecision::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
    }
}

/// The signed-in admin, as resolved by the gate.
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(Self)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}
