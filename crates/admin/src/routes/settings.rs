//! Brand settings page.

use askama::Template;
use askama_web::WebTemplate;
use souk_core::BrandSettings;
use tracing::instrument;

use crate::filters;
use crate::middleware::{CurrentUser, RequestStores};
use crate::routes::AdminUserView;
use crate::services::load_brand_settings;

/// Brand settings formatted for display.
#[derive(Debug, Clone)]
pub struct BrandSettingsView {
    pub site_name: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub updated_at: String,
}

impl From<BrandSettings> for BrandSettingsView {
    fn from(settings: BrandSettings) -> Self {
        Self {
            site_name: settings.site_name,
            logo_url: settings.logo_url.unwrap_or_default(),
            favicon_url: settings.favicon_url.unwrap_or_default(),
            updated_at: settings.updated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Brand settings template.
#[derive(Template, WebTemplate)]
#[template(path = "settings/brand.html")]
pub struct BrandSettingsTemplate {
    pub admin: AdminUserView,
    pub current_path: &'static str,
    /// `None` when the settings row is missing or unreadable.
    pub settings: Option<BrandSettingsView>,
}

/// GET /admin/settings/brand
#[instrument(skip_all)]
pub async fn brand(
    CurrentUser(user): CurrentUser,
    RequestStores(stores): RequestStores,
) -> BrandSettingsTemplate {
    let settings = load_brand_settings(stores.as_ref()).await;

    BrandSettingsTemplate {
        admin: AdminUserView::from(&user),
        current_path: "/admin/settings/brand",
        settings: settings.map(BrandSettingsView::from),
    }
}
