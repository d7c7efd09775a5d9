//! Checkout delivery estimate.
//!
//! The page renders a wilaya `<select>`; changing it swaps in the rates
//! fragment via htmx.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use souk_core::{ShippingRates, WilayaCode};
use tracing::instrument;

use super::api::ShippingRatesQuery;
use crate::components::PixelLoader;
use crate::filters;
use crate::middleware::CspNonce;
use crate::services::lookup_shipping_rates;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub wilayas: Vec<WilayaOption>,
    pub pixel: PixelLoader,
}

/// One entry of the wilaya select.
pub struct WilayaOption {
    pub code: WilayaCode,
    pub name: &'static str,
}

/// Shipping rates fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/shipping_rates.html")]
pub struct ShippingRatesFragment {
    pub rates: Option<ShippingRates>,
}

/// Display the checkout delivery estimate page.
#[instrument(skip(state, nonce))]
pub async fn page(State(state): State<AppState>, nonce: CspNonce) -> CheckoutTemplate {
    let wilayas = WilayaCode::all()
        .filter_map(|code| code.name().map(|name| WilayaOption { code, name }))
        .collect();

    CheckoutTemplate {
        wilayas,
        pixel: PixelLoader::new(&state.config().analytics, &nonce),
    }
}

/// `GET /checkout/shipping-rates?wilaya=16` (HTMX fragment)
#[instrument(skip(state))]
pub async fn shipping_rates(
    State(state): State<AppState>,
    Query(query): Query<ShippingRatesQuery>,
) -> ShippingRatesFragment {
    let stores = state.stores();
    ShippingRatesFragment {
        rates: lookup_shipping_rates(stores.as_ref(), query.wilaya.as_deref()).await,
    }
}
