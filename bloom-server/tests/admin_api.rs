//! Back-office API tests — auth guard, order management, notification
//! settings

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bloom_server::auth::{JwtConfig, JwtService};
use bloom_server::db::DbService;
use bloom_server::db::models::{CategoryCreate, ProductCreate};
use bloom_server::db::repository::{AdminRepository, CategoryRepository, ProductRepository};
use bloom_server::orders::OrderService;
use bloom_server::{Config, ServerState, api};
use http_body_util::BodyExt;
use shared::{CheckoutItem, CheckoutRequest};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tower::ServiceExt;

fn test_jwt() -> JwtService {
    JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-0123456789ab".into(),
        expiration_minutes: 60,
        issuer: "bloom-server".into(),
        audience: "bloom-admin".into(),
    })
}

async fn test_app() -> (Router, Surreal<Db>, tempfile::TempDir) {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let db = DbService::memory().await.expect("memory db").db;
    let config = Config::with_overrides(work_dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::new(config, db.clone(), Arc::new(test_jwt()));
    (api::app(state), db, work_dir)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn authed(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router, db: &Surreal<Db>) -> String {
    AdminRepository::new(db.clone())
        .ensure_seed_admin("admin@bloom.example", "admin123")
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            serde_json::json!({"email": "admin@bloom.example", "password": "admin123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn seed_order(db: &Surreal<Db>, customer: &str, phone: &str) -> shared::Order {
    let category = CategoryRepository::new(db.clone())
        .create(CategoryCreate {
            name: "Tulips".into(),
            slug: format!("tulips-{}", phone.trim_start_matches('+')),
            description: None,
            sort_order: None,
        })
        .await
        .unwrap();
    let product = ProductRepository::new(db.clone())
        .create(ProductCreate {
            name: "Tulip".into(),
            slug: format!("tulip-{}", phone.trim_start_matches('+')),
            description: None,
            color: Some("Red".into()),
            price: 4500,
            old_price: None,
            quantity: None,
            min_quantity: None,
            images: vec![],
            category: category.id.unwrap().to_string(),
            sort_order: None,
            is_hit: None,
            is_new: None,
        })
        .await
        .unwrap();

    let full = OrderService::new(db.clone())
        .place_order(CheckoutRequest {
            customer_name: customer.into(),
            phone: phone.into(),
            email: None,
            address: None,
            comment: None,
            items: vec![CheckoutItem {
                product_id: product.id.unwrap().to_string(),
                quantity: 1,
                price: 4500,
            }],
        })
        .await
        .unwrap();
    full.into()
}

#[tokio::test]
async fn admin_surface_requires_token() {
    let (app, _db, _work_dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(authed("GET", "/api/admin/orders", "garbage-token", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected_uniformly() {
    let (app, db, _work_dir) = test_app().await;
    AdminRepository::new(db.clone())
        .ensure_seed_admin("admin@bloom.example", "admin123")
        .await
        .unwrap();

    let bad_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            serde_json::json!({"email": "admin@bloom.example", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(bad_password.status(), StatusCode::BAD_REQUEST);
    let bad_body = json_body(bad_password).await;

    let bad_email = app
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            serde_json::json!({"email": "nobody@bloom.example", "password": "admin123"}),
        ))
        .await
        .unwrap();
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);
    // Same message either way, no account enumeration
    assert_eq!(bad_body["error"], json_body(bad_email).await["error"]);
}

#[tokio::test]
async fn orders_filter_by_status_and_search() {
    let (app, db, _work_dir) = test_app().await;
    let token = login(&app, &db).await;

    let order_a = seed_order(&db, "Иван Петров", "+79991234567").await;
    let _order_b = seed_order(&db, "Анна Сидорова", "+79997654321").await;

    // Everything
    let response = app
        .clone()
        .oneshot(authed("GET", "/api/admin/orders", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["orders"].as_array().unwrap().len(), 2);

    // Move one order out of "new", then filter
    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/api/admin/orders/{}", order_a.id),
            &token,
            Some(serde_json::json!({"status": "completed"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/admin/orders?status=new", &token, None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["orders"][0]["customerName"], "Анна Сидорова");

    // Phone substring search
    let response = app
        .oneshot(authed(
            "GET",
            "/api/admin/orders?search=7654321",
            &token,
            None,
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["orders"][0]["customerName"], "Анна Сидорова");
}

#[tokio::test]
async fn order_delete_removes_items() {
    let (app, db, _work_dir) = test_app().await;
    let token = login(&app, &db).await;
    let order = seed_order(&db, "Иван Петров", "+79991234567").await;

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/admin/orders/{}", order.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut result = db
        .query("SELECT count() FROM order_item GROUP ALL")
        .await
        .unwrap();
    let items: Option<i64> = result.take((0, "count")).unwrap();
    assert_eq!(items.unwrap_or(0), 0, "no orphaned item rows");

    // Second delete is a 404
    let response = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/admin/orders/{}", order.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notification_settings_round_trip() {
    let (app, db, _work_dir) = test_app().await;
    let token = login(&app, &db).await;

    // Defaults before anything is saved
    let response = app
        .clone()
        .oneshot(authed("GET", "/api/admin/notifications", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["email"]["smtpPort"], "587");
    assert_eq!(body["email"]["enabled"], false);

    // Save the telegram channel
    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/admin/notifications",
            &token,
            Some(serde_json::json!({
                "type": "telegram",
                "settings": {"enabled": true, "botToken": "123:abc", "chatId": "-100500"},
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/admin/notifications", &token, None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["telegram"]["botToken"], "123:abc");
    assert_eq!(body["telegram"]["enabled"], true);

    // Test-email without stored email settings is a descriptive 400
    let response = app
        .oneshot(authed(
            "POST",
            "/api/admin/notifications/test-email",
            &token,
            Some(serde_json::json!({"email": "owner@bloom.example"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(
        body["error"].as_str().unwrap().contains("settings"),
        "error should point at missing settings: {body}"
    );
}

#[tokio::test]
async fn password_change_requires_current_password() {
    let (app, db, _work_dir) = test_app().await;
    let token = login(&app, &db).await;

    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            "/api/admin/auth/password",
            &token,
            Some(serde_json::json!({
                "currentPassword": "wrong",
                "newPassword": "brand-new-password",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            "/api/admin/auth/password",
            &token,
            Some(serde_json::json!({
                "currentPassword": "admin123",
                "newPassword": "brand-new-password",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // New password works, old one does not
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            serde_json::json!({"email": "admin@bloom.example", "password": "brand-new-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/auth/login",
            serde_json::json!({"email": "admin@bloom.example", "password": "admin123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
