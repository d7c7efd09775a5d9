//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders blank cells as a dash so empty columns stay visible in tables.
///
/// Usage in templates: `{{ cell|or_dash }}`
#[askama::filter_fn]
pub fn or_dash(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(dash_if_blank(value.to_string()))
}

fn dash_if_blank(text: String) -> String {
    if text.trim().is_empty() {
        "-".to_string()
    } else {
        text
    }
}
