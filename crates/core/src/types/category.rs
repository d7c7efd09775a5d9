//! Product categories.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::CategoryId;

/// Errors that can occur when building a [`NewCategory`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// Name or slug is missing or empty.
    #[error("category name and slug are both required")]
    MissingField,
}

/// A category row as returned by the backend.
///
/// Every column besides `id`, `name` and `slug` (timestamps included) is
/// kept verbatim in `extra` so a created record can be echoed back exactly
/// as the backend returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Insert payload for the `categories` table.
///
/// Only presence is checked here. Slug format and uniqueness belong to the
/// backend; a duplicate slug surfaces as an insert error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    name: String,
    slug: String,
}

impl NewCategory {
    /// Build an insert payload from optional form/JSON fields.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::MissingField`] if either field is absent or
    /// an empty string.
    pub fn new(name: Option<String>, slug: Option<String>) -> Result<Self, CategoryError> {
        match (name, slug) {
            (Some(name), Some(slug)) if !name.is_empty() && !slug.is_empty() => {
                Ok(Self { name, slug })
            }
            _ => Err(CategoryError::MissingField),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }
}
