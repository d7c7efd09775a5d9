//! Meta pixel loader.
//!
//! Renders the pixel bootstrap when `META_PIXEL_ID` is configured and
//! nothing otherwise. The script fires `PageView` once on load, again
//! whenever htmx pushes a new URL into history, and again when back or
//! forward restores a page from the history cache. The wrapper is
//! `hx-preserve`d so boosted swaps keep the original script element
//! instead of inserting a copy carrying a stale nonce.

use askama::Template;

use crate::config::AnalyticsConfig;
use crate::middleware::CspNonce;

#[derive(Debug, Clone, Template)]
#[template(path = "components/pixel.html")]
pub struct PixelLoader {
    pixel_id: Option<String>,
    nonce: String,
}

impl PixelLoader {
    #[must_use]
    pub fn new(analytics: &AnalyticsConfig, nonce: &CspNonce) -> Self {
        Self {
            pixel_id: analytics.meta_pixel_id.clone(),
            nonce: nonce.value().to_string(),
        }
    }
}
