//! Add-category button.
//!
//! A disclosure holding a small form that posts `{name, slug}` as JSON to
//! the categories API. The page reloads on success; otherwise the API's
//! error message is shown under the form.

use askama::Template;

#[derive(Debug, Clone, Template)]
#[template(path = "components/add_category.html")]
pub struct AddCategoryButton {
    endpoint: &'static str,
}

impl Default for AddCategoryButton {
    fn default() -> Self {
        Self {
            endpoint: "/api/categories",
        }
    }
}
