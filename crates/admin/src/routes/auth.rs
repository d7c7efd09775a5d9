//! Authentication route handlers for admin.
//!
//! Sign-in is delegated to the backend's password grant; the session only
//! keeps the resulting access token.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::LOGIN_PATH;
use crate::middleware::session::{keys, session_token};
use crate::state::AppState;

/// Shown when the backend rejects the email/password pair.
pub const INVALID_CREDENTIALS: &str = "البريد الإلكتروني أو كلمة المرور غير صحيحة";

/// Shown when the backend cannot be reached.
pub const SIGN_IN_UNAVAILABLE: &str = "تعذر الاتصال بخدمة تسجيل الدخول، حاول مرة أخرى";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<&'static str>,
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/admin/logout", post(logout))
}

/// GET /admin/login
async fn login_page() -> LoginTemplate {
    LoginTemplate {
        email: String::new(),
        error: None,
    }
}

/// POST /admin/login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.auth().sign_in(&form.email, &form.password).await {
        Ok(Some(auth)) => {
            // Fresh session id on privilege change
            session.cycle_id().await?;
            session.insert(keys::ACCESS_TOKEN, &auth.access_token).await?;
            tracing::info!(user_id = %auth.user.id, "Admin signed in");
            Ok(Redirect::to("/admin").into_response())
        }
        Ok(None) => {
            tracing::warn!("Admin sign-in rejected");
            let page = LoginTemplate {
                email: form.email,
                error: Some(INVALID_CREDENTIALS),
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Admin sign-in failed");
            let page = LoginTemplate {
                email: form.email,
                error: Some(SIGN_IN_UNAVAILABLE),
            };
            Ok((StatusCode::BAD_GATEWAY, page).into_response())
        }
    }
}

/// POST /admin/logout
///
/// Revokes the backend session when possible, then clears the cookie
/// session regardless.
#[instrument(skip_all)]
async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    if let Some(token) = session_token(&session).await
        && let Err(e) = state.auth().sign_out(&token).await
    {
        tracing::warn!(error = %e, "Backend sign-out failed");
    }

    session.flush().await?;
    Ok(Redirect::to(LOGIN_PATH))
}
