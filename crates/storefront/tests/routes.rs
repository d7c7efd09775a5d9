//! Router tests against the in-memory backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use souk_backend::BackendConfig;
use souk_backend::config::parse_base_url;
use souk_core::testing::{Failures, MemoryBackend};
use souk_core::{Category, CategoryId, Dzd, ShippingZone, StoreError, WilayaCode};
use souk_storefront::config::{AnalyticsConfig, StorefrontConfig};
use souk_storefront::state::AppState;
use tower::ServiceExt;

fn config(pixel: Option<&str>) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        backend: BackendConfig {
            url: parse_base_url("http://127.0.0.1:54321").unwrap(),
            anon_key: "anon".to_string().into(),
            service_role_key: None,
        },
        analytics: AnalyticsConfig {
            meta_pixel_id: pixel.map(String::from),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn app(backend: &MemoryBackend, pixel: Option<&str>) -> axum::Router {
    souk_storefront::app(AppState::new(config(pixel), Arc::new(backend.clone())))
}

async fn get(app: axum::Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn zone(code: i32, home: i64, desk: i64) -> ShippingZone {
    ShippingZone {
        wilaya_code: WilayaCode::new(code),
        home_delivery_price: Dzd::from_dinar(home),
        desk_delivery_price: Dzd::from_dinar(desk),
    }
}

#[tokio::test]
async fn test_shipping_rates_api_known_zone() {
    let backend = MemoryBackend::new().with_zone(zone(16, 600, 400));

    let response = get(app(&backend, None), "/api/shipping-rates?wilaya=16").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["home_delivery_price"].as_f64(), Some(600.0));
    assert_eq!(body["desk_delivery_price"].as_f64(), Some(400.0));
}

#[tokio::test]
async fn test_shipping_rates_api_unknown_zone_is_zero() {
    let backend = MemoryBackend::new();

    let response = get(app(&backend, None), "/api/shipping-rates?wilaya=16").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["home_delivery_price"].as_f64(), Some(0.0));
    assert_eq!(body["desk_delivery_price"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_shipping_rates_api_without_wilaya_is_null() {
    let backend = MemoryBackend::new();

    let response = get(app(&backend, None), "/api/shipping-rates").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body_text(response).await).unwrap(),
        json!(null)
    );
    assert_eq!(MemoryBackend::count(&backend.calls().zone_lookups), 0);
}

#[tokio::test]
async fn test_shipping_rates_fragment() {
    let backend = MemoryBackend::new().with_zone(zone(31, 700, 450));

    let html = body_text(get(app(&backend, None), "/checkout/shipping-rates?wilaya=31").await).await;
    assert!(html.contains("700 د.ج"));
    assert!(html.contains("450 د.ج"));

    let prompt = body_text(get(app(&backend, None), "/checkout/shipping-rates?wilaya=").await).await;
    assert!(prompt.contains("اختر الولاية"));
}

#[tokio::test]
async fn test_checkout_page_lists_wilayas() {
    let backend = MemoryBackend::new();

    let html = body_text(get(app(&backend, None), "/checkout").await).await;
    assert!(html.contains("16 - الجزائر"));
    assert!(html.contains("hx-get=\"/checkout/shipping-rates\""));
}

#[tokio::test]
async fn test_home_lists_categories_with_pixel() {
    let backend = MemoryBackend::new().with_category(Category {
        id: CategoryId::new(1),
        name: "إلكترونيات".to_string(),
        slug: "electronics".to_string(),
        extra: serde_json::Map::new(),
    });

    let response = get(app(&backend, Some("998877")), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let csp = response
        .headers()
        .get("content-security-policy")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(response.headers().contains_key("x-request-id"));

    let html = body_text(response).await;
    assert!(html.contains("إلكترونيات"));
    assert!(html.contains("fbq('init', '998877')"));

    // the script nonce in the page matches the header
    let nonce_start = html.find("nonce=\"").unwrap() + "nonce=\"".len();
    let nonce = html
        .get(nonce_start..)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    assert!(csp.contains(&format!("'nonce-{nonce}'")));
}

#[tokio::test]
async fn test_home_without_pixel_has_no_script() {
    let backend = MemoryBackend::new();

    let html = body_text(get(app(&backend, None), "/").await).await;
    assert!(!html.contains("fbq("));
}

#[tokio::test]
async fn test_home_store_failure_is_500() {
    let backend = MemoryBackend::new().failing(Failures {
        categories: Some(StoreError::Decode("bad row".to_string())),
        ..Failures::default()
    });

    let response = get(app(&backend, None), "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_endpoints() {
    let backend = MemoryBackend::new();
    assert_eq!(get(app(&backend, None), "/health").await.status(), StatusCode::OK);
    assert_eq!(
        get(app(&backend, None), "/health/ready").await.status(),
        StatusCode::OK
    );

    let down = MemoryBackend::new().failing(Failures {
        categories: Some(StoreError::Transport("connection refused".to_string())),
        ..Failures::default()
    });
    assert_eq!(
        get(app(&down, None), "/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let backend = MemoryBackend::new();
    let response = app(&backend, None)
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn test_repeated_wilaya_uses_first_value() {
    let backend = MemoryBackend::new()
        .with_zone(zone(16, 600, 400))
        .with_zone(zone(31, 700, 450));

    let response = get(
        app(&backend, None),
        "/api/shipping-rates?wilaya=16&wilaya=31",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["home_delivery_price"].as_f64(), Some(600.0));

    let response = get(
        app(&backend, None),
        "/checkout/shipping-rates?wilaya=31&wilaya=16",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("700 د.ج"));
}

#[tokio::test]
async fn test_unknown_path_is_localized_404() {
    let response = get(app(&MemoryBackend::new(), None), "/products/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("الصفحة غير موجودة"));
}
