//! Admin page data loaders.
//!
//! Each loader fetches everything at render time. A failing list loader
//! renders the same empty state as an empty table; the failure is logged
//! with a `loader` field so the two cases can be told apart.

use souk_core::{
    BrandSettings, BrandSettingsStore, Order, OrderStore, ShippingZone, ShippingZoneStore,
};
use tracing::instrument;

/// All orders, newest first.
#[instrument(skip(store))]
pub async fn load_orders<S>(store: &S) -> Vec<Order>
where
    S: OrderStore + ?Sized,
{
    match store.list_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            tracing::warn!(loader = "orders", error = %e, "Loader failed, rendering empty state");
            Vec::new()
        }
    }
}

/// All shipping zones, by wilaya code.
#[instrument(skip(store))]
pub async fn load_shipping_zones<S>(store: &S) -> Vec<ShippingZone>
where
    S: ShippingZoneStore + ?Sized,
{
    match store.list_shipping_zones().await {
        Ok(zones) => zones,
        Err(e) => {
            tracing::warn!(
                loader = "shipping_zones",
                error = %e,
                "Loader failed, rendering empty state"
            );
            Vec::new()
        }
    }
}

/// The brand settings row; `None` means "not configured".
#[instrument(skip(store))]
pub async fn load_brand_settings<S>(store: &S) -> Option<BrandSettings>
where
    S: BrandSettingsStore + ?Sized,
{
    match store.brand_settings().await {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::error!(loader = "brand_settings", error = %e, "Failed to load brand settings");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use souk_core::testing::{Failures, MemoryBackend};
    use souk_core::{Dzd, StoreError, WilayaCode};

    use super::*;

    fn order(id: i64, created_at: &str) -> Order {
        serde_json::from_value(json!({"id": id, "created_at": created_at})).unwrap_or_default()
    }

    fn zone(code: i32) -> ShippingZone {
        ShippingZone {
            wilaya_code: WilayaCode::new(code),
            home_delivery_price: Dzd::from_dinar(500),
            desk_delivery_price: Dzd::from_dinar(300),
        }
    }

    #[tokio::test]
    async fn test_orders_newest_first() {
        let backend = MemoryBackend::new()
            .with_order(order(1, "2026-03-01T00:00:00+00:00"))
            .with_order(order(2, "2026-03-02T00:00:00+00:00"));

        let ids: Vec<_> = load_orders(&backend)
            .await
            .iter()
            .filter_map(Order::id)
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_zones_by_code() {
        let backend = MemoryBackend::new().with_zone(zone(31)).with_zone(zone(16));

        let codes: Vec<_> = load_shipping_zones(&backend)
            .await
            .iter()
            .map(|z| z.wilaya_code.as_i32())
            .collect();
        assert_eq!(codes, vec![16, 31]);
    }

    #[tokio::test]
    async fn test_list_failures_render_empty() {
        let backend = MemoryBackend::new()
            .with_order(order(1, "2026-03-01T00:00:00+00:00"))
            .with_zone(zone(16))
            .failing(Failures {
                orders: Some(StoreError::Transport("timeout".to_string())),
                shipping_zones: Some(StoreError::Unauthorized),
                ..Failures::default()
            });

        assert!(load_orders(&backend).await.is_empty());
        assert!(load_shipping_zones(&backend).await.is_empty());
    }

    #[tokio::test]
    async fn test_brand_settings() {
        assert!(load_brand_settings(&MemoryBackend::new()).await.is_none());

        let settings = BrandSettings {
            site_name: "سوق".to_string(),
            logo_url: None,
            favicon_url: None,
            updated_at: Utc::now(),
        };
        let backend = MemoryBackend::new().with_brand_settings(settings.clone());
        assert_eq!(load_brand_settings(&backend).await, Some(settings));
    }

    #[tokio::test]
    async fn test_two_brand_rows_are_not_configured() {
        let settings = |name: &str| BrandSettings {
            site_name: name.to_string(),
            logo_url: None,
            favicon_url: None,
            updated_at: Utc::now(),
        };
        let backend = MemoryBackend::new()
            .with_brand_settings(settings("سوق"))
            .with_brand_settings(settings("متجر"));

        assert_eq!(backend.brand_settings().await, Err(StoreError::MultipleRows));
        assert!(load_brand_settings(&backend).await.is_none());
    }
}
