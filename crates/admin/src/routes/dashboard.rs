//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::filters;
use crate::middleware::{CurrentUser, RequestStores};
use crate::routes::AdminUserView;
use crate::services::load_brand_settings;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin: AdminUserView,
    pub current_path: &'static str,
    pub site_name: Option<String>,
}

/// GET /admin
#[instrument(skip_all)]
pub async fn dashboard(
    CurrentUser(user): CurrentUser,
    RequestStores(stores): RequestStores,
) -> DashboardTemplate {
    let settings = load_brand_settings(stores.as_ref()).await;

    DashboardTemplate {
        admin: AdminUserView::from(&user),
        current_path: "/admin",
        site_name: settings.map(|s| s.site_name),
    }
}
