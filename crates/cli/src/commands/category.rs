//! Category management command.
//!
//! # Usage
//!
//! ```bash
//! souk-cli category create -n "إلكترونيات" -s electronics
//! ```
//!
//! Applies the same validation as `POST /api/categories` and inserts with
//! the service-role key.

use souk_core::{Category, CategoryError, CategoryStore, NewCategory, StoreError};
use thiserror::Error;

/// Errors from `category create`.
#[derive(Debug, Error)]
pub enum CategoryCommandError {
    #[error(transparent)]
    Invalid(#[from] CategoryError),

    #[error("Insert failed: {0}")]
    Store(#[from] StoreError),
}

/// Validate and insert one category.
///
/// Blank values count as missing; nothing is sent to the store then.
///
/// # Errors
///
/// Returns `Invalid` for a missing name or slug, `Store` if the insert fails.
pub async fn insert(
    store: &dyn CategoryStore,
    name: &str,
    slug: &str,
) -> Result<Category, CategoryCommandError> {
    let category = NewCategory::new(non_blank(name), non_blank(slug))?;
    Ok(store.insert_category(&category).await?)
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// `souk-cli category create -n <name> -s <slug>`.
///
/// # Errors
///
/// Returns an error if the backend is not configured or the insert fails.
pub async fn create(name: &str, slug: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::service_client()?;
    let category = insert(&client, name, slug).await?;

    tracing::info!(
        id = %category.id,
        name = %category.name,
        slug = %category.slug,
        "Category created"
    );
    Ok(())
}
