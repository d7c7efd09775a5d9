//! Backend client tests against an in-process fake of the REST and auth APIs.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use souk_backend::{BackendClient, BackendConfig, BackendError};
use souk_core::{
    AccessToken, BrandSettingsStore, CategoryStore, NewCategory, OrderStore, PasswordAuthenticator,
    SessionResolver, ShippingZoneStore, StoreError, StoreFactory, WilayaCode,
};

#[derive(Debug, Clone)]
struct Seen {
    query: HashMap<String, String>,
    headers: HeaderMap,
}

#[derive(Clone, Default)]
struct Fake {
    seen: Arc<Mutex<Vec<Seen>>>,
    brand_rows: Arc<AtomicUsize>,
}

impl Fake {
    fn record(&self, query: HashMap<String, String>, headers: &HeaderMap) {
        self.seen.lock().unwrap().push(Seen {
            query,
            headers: headers.clone(),
        });
    }

    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

fn not_single(rows: usize) -> Response {
    (
        StatusCode::NOT_ACCEPTABLE,
        Json(json!({
            "code": "PGRST116",
            "details": format!("The result contains {rows} rows"),
            "hint": null,
            "message": "JSON object requested, multiple (or no) rows returned"
        })),
    )
        .into_response()
}

async fn shipping_zones(
    State(fake): State<Fake>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    fake.record(query.clone(), &headers);
    match query.get("wilaya_code").map(String::as_str) {
        Some("eq.16") => Json(json!({
            "wilaya_code": 16,
            "home_delivery_price": 600,
            "desk_delivery_price": 400
        }))
        .into_response(),
        Some("eq.31") => not_single(2),
        _ => not_single(0),
    }
}

async fn brand_settings(
    State(fake): State<Fake>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    fake.record(query, &headers);
    match fake.brand_rows.load(Ordering::SeqCst) {
        1 => Json(json!({
            "id": 1,
            "site_name": "سوق",
            "logo_url": "https://cdn.souk.dz/logo.png",
            "favicon_url": null,
            "updated_at": "2026-03-01T10:00:00+00:00"
        }))
        .into_response(),
        rows => not_single(rows),
    }
}

async fn insert_category(
    State(fake): State<Fake>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    fake.record(query, &headers);
    if body["slug"] == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "details": "Key (slug)=(taken) already exists.",
                "hint": null,
                "message": "duplicate key value violates unique constraint \"categories_slug_key\""
            })),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 7,
            "name": body["name"],
            "slug": body["slug"],
            "created_at": "2026-03-01T10:00:00.123456+00:00"
        })),
    )
        .into_response()
}

async fn list_orders(
    State(fake): State<Fake>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    fake.record(query, &headers);
    Json(json!([
        {"id": "b", "created_at": "2026-03-02T00:00:00+00:00", "total": 2500},
        {"id": "a", "created_at": "2026-03-01T00:00:00+00:00", "total": 1800}
    ]))
    .into_response()
}

async fn auth_user(headers: HeaderMap) -> Response {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if bearer == "Bearer good-token" {
        Json(json!({
            "id": "5f0c3c5e-8f1e-4a8e-9a57-0f5f1a2b3c4d",
            "email": "admin@souk.dz",
            "role": "authenticated"
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": 401, "msg": "invalid JWT"})),
        )
            .into_response()
    }
}

async fn auth_token(Json(body): Json<Value>) -> Response {
    if body["password"] == "correct horse" {
        Json(json!({
            "access_token": "good-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {"id": "5f0c3c5e-8f1e-4a8e-9a57-0f5f1a2b3c4d", "email": body["email"]}
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
        )
            .into_response()
    }
}

async fn spawn_fake() -> (BackendClient, Fake) {
    let fake = Fake::default();
    let app = Router::new()
        .route("/rest/v1/shipping_zones", get(shipping_zones))
        .route("/rest/v1/brand_settings", get(brand_settings))
        .route("/rest/v1/categories", post(insert_category))
        .route("/rest/v1/orders", get(list_orders))
        .route("/auth/v1/user", get(auth_user))
        .route("/auth/v1/token", post(auth_token))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = BackendConfig {
        url: format!("http://{addr}").parse().unwrap(),
        anon_key: SecretString::from("anon-key"),
        service_role_key: None,
    };
    (BackendClient::new(&config).unwrap(), fake)
}

#[tokio::test]
async fn test_shipping_zone_single_row() {
    let (client, fake) = spawn_fake().await;

    let zone = client.shipping_zone(WilayaCode::new(16)).await.unwrap();
    assert_eq!(zone.wilaya_code, WilayaCode::new(16));
    assert_eq!(zone.home_delivery_price.to_string(), "600 د.ج");

    let seen = fake.last();
    assert_eq!(
        seen.headers.get("accept").unwrap(),
        "application/vnd.pgrst.object+json"
    );
    assert_eq!(seen.headers.get("apikey").unwrap(), "anon-key");
    assert_eq!(seen.headers.get("authorization").unwrap(), "Bearer anon-key");
}

#[tokio::test]
async fn test_shipping_zone_row_count_errors() {
    let (client, _fake) = spawn_fake().await;

    assert_eq!(
        client.shipping_zone(WilayaCode::new(5)).await,
        Err(StoreError::NotFound)
    );
    assert_eq!(
        client.shipping_zone(WilayaCode::new(31)).await,
        Err(StoreError::MultipleRows)
    );
}

#[tokio::test]
async fn test_brand_settings_single_row() {
    let (client, fake) = spawn_fake().await;
    fake.brand_rows.store(1, Ordering::SeqCst);

    let settings = client.brand_settings().await.unwrap();
    assert_eq!(settings.site_name, "سوق");
    assert_eq!(settings.logo_url.as_deref(), Some("https://cdn.souk.dz/logo.png"));
    assert_eq!(settings.favicon_url, None);

    let seen = fake.last();
    assert_eq!(
        seen.headers.get("accept").unwrap(),
        "application/vnd.pgrst.object+json"
    );
    assert_eq!(seen.query.get("select").unwrap(), "*");
}

#[tokio::test]
async fn test_brand_settings_row_count_errors() {
    let (client, fake) = spawn_fake().await;

    assert_eq!(client.brand_settings().await, Err(StoreError::NotFound));
    assert_eq!(
        fake.last().headers.get("accept").unwrap(),
        "application/vnd.pgrst.object+json"
    );

    fake.brand_rows.store(2, Ordering::SeqCst);
    assert_eq!(client.brand_settings().await, Err(StoreError::MultipleRows));
}

#[tokio::test]
async fn test_insert_category_as_session() {
    let (client, fake) = spawn_fake().await;
    let token = AccessToken::new("good-token".to_string());
    let stores = client.bind(Some(&token));

    let new = NewCategory::new(Some("إلكترونيات".into()), Some("electronics".into())).unwrap();
    let created = stores.insert_category(&new).await.unwrap();

    assert_eq!(created.name, "إلكترونيات");
    assert_eq!(created.slug, "electronics");
    assert_eq!(
        serde_json::to_value(&created).unwrap()["created_at"],
        "2026-03-01T10:00:00.123456+00:00"
    );

    let seen = fake.last();
    assert_eq!(seen.headers.get("authorization").unwrap(), "Bearer good-token");
    assert_eq!(seen.headers.get("apikey").unwrap(), "anon-key");
    assert_eq!(seen.headers.get("prefer").unwrap(), "return=representation");
}

#[tokio::test]
async fn test_insert_category_constraint_violation() {
    let (client, _fake) = spawn_fake().await;
    let new = NewCategory::new(Some("مكرر".into()), Some("taken".into())).unwrap();

    match client.insert_category(&new).await {
        Err(StoreError::Backend { code, .. }) => assert_eq!(code, "23505"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_orders_newest_first_query() {
    let (client, fake) = spawn_fake().await;

    let orders = client.list_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id().as_deref(), Some("b"));

    let seen = fake.last();
    assert_eq!(seen.query.get("order").unwrap(), "created_at.desc");
}

#[tokio::test]
async fn test_session_resolution() {
    let (client, _fake) = spawn_fake().await;

    let user = client
        .resolve(&AccessToken::new("good-token".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email.as_deref(), Some("admin@souk.dz"));

    let expired = client
        .resolve(&AccessToken::new("expired".to_string()))
        .await
        .unwrap();
    assert!(expired.is_none());
}

#[tokio::test]
async fn test_password_sign_in() {
    let (client, _fake) = spawn_fake().await;

    let session = client
        .sign_in_with_password("admin@souk.dz", "correct horse")
        .await
        .unwrap();
    assert_eq!(session.access_token.expose(), "good-token");
    assert_eq!(session.user.email.as_deref(), Some("admin@souk.dz"));

    let rejected = client
        .sign_in_with_password("admin@souk.dz", "wrong")
        .await;
    assert!(matches!(rejected, Err(BackendError::InvalidCredentials)));
}

#[tokio::test]
async fn test_authenticator_treats_bad_password_as_no_session() {
    let (client, _fake) = spawn_fake().await;

    let none = PasswordAuthenticator::sign_in(&client, "admin@souk.dz", "wrong")
        .await
        .unwrap();
    assert!(none.is_none());

    let some = PasswordAuthenticator::sign_in(&client, "admin@souk.dz", "correct horse")
        .await
        .unwrap();
    assert_eq!(some.unwrap().access_token.expose(), "good-token");
}
