//! Brand settings singleton.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single row of the `brand_settings` table.
///
/// Exactly one row is expected. Zero or several rows make the single-row
/// fetch fail, and callers treat that as "not configured yet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSettings {
    pub site_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub favicon_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}
