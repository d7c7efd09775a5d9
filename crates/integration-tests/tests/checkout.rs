//! Shipping rate lookups as the checkout page sees them.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use souk_core::testing::MemoryBackend;
use souk_core::{Dzd, ShippingRates, ShippingZone, ShippingZoneStore, StoreError, WilayaCode};
use souk_integration_tests::{TestServers, client};
use souk_storefront::services::{ShippingRateTracker, ShippingRatesState};

async fn rates_json(servers: &TestServers, query: &str) -> Value {
    let resp = client()
        .get(format!("{}/api/shipping-rates{query}", servers.storefront_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_wilaya_without_zone_costs_nothing() {
    let servers = TestServers::start().await;

    let body = rates_json(&servers, "?wilaya=16").await;

    assert_eq!(body["home_delivery_price"].as_f64(), Some(0.0));
    assert_eq!(body["desk_delivery_price"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_absent_wilaya_is_null() {
    let servers = TestServers::start().await;

    assert_eq!(rates_json(&servers, "").await, Value::Null);
    assert_eq!(rates_json(&servers, "?wilaya=").await, Value::Null);
    assert_eq!(MemoryBackend::count(&servers.backend.calls().zone_lookups), 0);
}

#[tokio::test]
async fn test_configured_zone_reaches_checkout_and_admin() {
    let servers = TestServers::start_with(MemoryBackend::new().with_zone(ShippingZone {
        wilaya_code: WilayaCode::new(31),
        home_delivery_price: Dzd::from_dinar(700),
        desk_delivery_price: Dzd::from_dinar(450),
    }))
    .await;

    let body = rates_json(&servers, "?wilaya=31%20-%20Oran").await;
    assert_eq!(body["home_delivery_price"].as_f64(), Some(700.0));
    assert_eq!(body["desk_delivery_price"].as_f64(), Some(450.0));

    let fragment = client()
        .get(format!("{}/checkout/shipping-rates?wilaya=31", servers.storefront_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(fragment.contains(&Dzd::from_dinar(700).to_string()));
}

/// Zone store that answers after a short delay, so the loading state is
/// observable.
struct SlowStore(MemoryBackend);

#[async_trait]
impl ShippingZoneStore for SlowStore {
    async fn list_shipping_zones(&self) -> Result<Vec<ShippingZone>, StoreError> {
        self.0.list_shipping_zones().await
    }

    async fn shipping_zone(&self, wilaya: WilayaCode) -> Result<ShippingZone, StoreError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.0.shipping_zone(wilaya).await
    }

    async fn upsert_shipping_zone(&self, zone: &ShippingZone) -> Result<ShippingZone, StoreError> {
        self.0.upsert_shipping_zone(zone).await
    }
}

#[tokio::test]
async fn test_tracker_settles_on_zero_rates() {
    let tracker = Arc::new(ShippingRateTracker::new(Arc::new(SlowStore(
        MemoryBackend::new(),
    ))));

    let select = {
        let tracker = Arc::clone(&tracker);
        tokio::spawn(async move { tracker.set_wilaya(Some("16".to_string())).await })
    };
    while !tracker.state().loading {
        tokio::task::yield_now().await;
    }
    assert_eq!(tracker.state().rates, None);

    select.await.unwrap();

    assert_eq!(
        tracker.state(),
        ShippingRatesState {
            loading: false,
            rates: Some(ShippingRates::ZERO),
        }
    );
}
