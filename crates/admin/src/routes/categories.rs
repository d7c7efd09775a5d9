//! Categories page.

use askama::Template;
use askama_web::WebTemplate;
use souk_core::Category;
use tracing::instrument;

use crate::components::AddCategoryButton;
use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentUser, RequestStores};
use crate::routes::AdminUserView;

/// Categories page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub admin: AdminUserView,
    pub current_path: &'static str,
    pub categories: Vec<Category>,
    pub add_button: AddCategoryButton,
}

/// GET /admin/categories
#[instrument(skip_all)]
pub async fn index(
    CurrentUser(user): CurrentUser,
    RequestStores(stores): RequestStores,
) -> Result<CategoriesTemplate> {
    let categories = stores.list_categories().await?;

    Ok(CategoriesTemplate {
        admin: AdminUserView::from(&user),
        current_path: "/admin/categories",
        categories,
        add_button: AddCategoryButton::default(),
    })
}
