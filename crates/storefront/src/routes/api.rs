//! JSON API for the checkout page scripts.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use souk_core::ShippingRates;
use tracing::instrument;

use crate::services::lookup_shipping_rates;
use crate::state::AppState;

/// Query parameters for shipping rate lookups.
///
/// Read as raw pairs so unknown or repeated keys never reject the request;
/// the first `wilaya` wins.
#[derive(Debug, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct ShippingRatesQuery {
    pub wilaya: Option<String>,
}

impl From<Vec<(String, String)>> for ShippingRatesQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self {
            wilaya: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "wilaya").then_some(value)),
        }
    }
}

/// `GET /api/shipping-rates?wilaya=16`
///
/// Responds `null` when no wilaya is given and zero rates when the lookup
/// fails; never an error status.
#[instrument(skip(state))]
pub async fn shipping_rates(
    State(state): State<AppState>,
    Query(query): Query<ShippingRatesQuery>,
) -> Json<Option<ShippingRates>> {
    let stores = state.stores();
    Json(lookup_shipping_rates(stores.as_ref(), query.wilaya.as_deref()).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(query: &str) -> ShippingRatesQuery {
        axum::extract::Query::<ShippingRatesQuery>::try_from_uri(
            &format!("/api/shipping-rates?{query}").parse().unwrap(),
        )
        .unwrap()
        .0
    }

    #[test]
    fn test_query_takes_first_wilaya() {
        assert_eq!(parse("wilaya=16&wilaya=31").wilaya.as_deref(), Some("16"));
        assert_eq!(parse("page=2&wilaya=31").wilaya.as_deref(), Some("31"));
        assert_eq!(parse("").wilaya, None);
    }
}
