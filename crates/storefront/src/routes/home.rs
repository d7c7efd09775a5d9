//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use souk_core::Category;
use tracing::instrument;

use crate::components::PixelLoader;
use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<Category>,
    pub pixel: PixelLoader,
}

/// Display the home page with the category list.
#[instrument(skip(state, nonce))]
pub async fn home(State(state): State<AppState>, nonce: CspNonce) -> Result<HomeTemplate> {
    let categories = state.stores().list_categories().await?;

    Ok(HomeTemplate {
        categories,
        pixel: PixelLoader::new(&state.config().analytics, &nonce),
    })
}
