//! End-to-end checkout through a real in-process server

use std::path::PathBuf;
use std::sync::Arc;

use bloom_client::{Cart, CartItem, CheckoutForm, ClientConfig, HttpClient, submit_checkout};
use bloom_server::auth::{JwtConfig, JwtService};
use bloom_server::db::DbService;
use bloom_server::db::models::{CategoryCreate, ProductCreate};
use bloom_server::db::repository::{CategoryRepository, ProductRepository};
use bloom_server::{Config, ServerState, api};

struct TestServer {
    base_url: String,
    product_id: String,
    _work_dir: tempfile::TempDir,
}

/// Boot a server on an OS-assigned port with one seeded product
async fn start_server() -> TestServer {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let db = DbService::memory().await.expect("memory db").db;

    let category = CategoryRepository::new(db.clone())
        .create(CategoryCreate {
            name: "Тюльпаны".into(),
            slug: "tulips".into(),
            description: None,
            sort_order: None,
        })
        .await
        .expect("seed category");
    let product = ProductRepository::new(db.clone())
        .create(ProductCreate {
            name: "Тюльпан Red Princess".into(),
            slug: "tulip-red-princess".into(),
            description: None,
            color: Some("Красный".into()),
            price: 4500,
            old_price: None,
            quantity: Some(100),
            min_quantity: None,
            images: vec![],
            category: category.id.unwrap().to_string(),
            sort_order: None,
            is_hit: None,
            is_new: None,
        })
        .await
        .expect("seed product");
    let product_id = product.id.unwrap().to_string();

    let jwt = JwtService::with_config(JwtConfig {
        secret: "client-integration-secret-0123456789".into(),
        expiration_minutes: 60,
        issuer: "bloom-server".into(),
        audience: "bloom-admin".into(),
    });
    let config = Config::with_overrides(work_dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::new(config, db, Arc::new(jwt));
    let app = api::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        product_id,
        _work_dir: work_dir,
    }
}

fn state_paths(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    (
        dir.path().join("cart.json"),
        dir.path().join("last-order.json"),
    )
}

fn valid_form() -> CheckoutForm {
    CheckoutForm {
        customer_name: "Иван Петров".into(),
        phone: "+79991234567".into(),
        comment: Some("домофон 42".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn successful_checkout_clears_cart_and_stores_summary() {
    let server = start_server().await;
    let client = HttpClient::new(&ClientConfig::new(&server.base_url));
    let state_dir = tempfile::tempdir().unwrap();
    let (cart_path, summary_path) = state_paths(&state_dir);

    // Catalog is reachable through the same client
    let products: Vec<serde_json::Value> = client.get("api/products").await.expect("catalog");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["slug"], "tulip-red-princess");

    let mut cart = Cart::default();
    cart.add(
        CartItem {
            product_id: server.product_id.clone(),
            slug: "tulip-red-princess".into(),
            name: "Тюльпан Red Princess".into(),
            quantity: 2,
            price: 4500,
        },
        1,
    );
    cart.save(&cart_path).unwrap();

    let summary = submit_checkout(&client, &valid_form(), &cart_path, &summary_path)
        .await
        .expect("checkout");

    assert!(summary.order_number.starts_with("FL-"));
    assert_eq!(summary.total, 9000);
    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.comment, "домофон 42");

    // Cart cleared on disk, summary persisted
    assert!(Cart::load(&cart_path).unwrap().is_empty());
    let stored = bloom_client::LastOrderSummary::load(&summary_path).expect("summary stored");
    assert_eq!(stored, summary);

    // Confirmation deep link builds from the stored summary
    let link = bloom_client::telegram_deep_link("@bloom_shop", &summary_path).unwrap();
    assert!(link.contains("t.me/bloom_shop"));
    assert!(link.contains(&summary.order_number));
}

#[tokio::test]
async fn failed_checkout_leaves_cart_untouched() {
    let server = start_server().await;
    let client = HttpClient::new(&ClientConfig::new(&server.base_url));
    let state_dir = tempfile::tempdir().unwrap();
    let (cart_path, summary_path) = state_paths(&state_dir);

    // Cart references a product the server does not know — server-side 400
    let mut cart = Cart::default();
    cart.add(
        CartItem {
            product_id: "product:gone".into(),
            slug: "gone".into(),
            name: "Deleted product".into(),
            quantity: 1,
            price: 100,
        },
        1,
    );
    cart.save(&cart_path).unwrap();

    let err = submit_checkout(&client, &valid_form(), &cart_path, &summary_path)
        .await
        .unwrap_err();
    assert!(matches!(err, bloom_client::ClientError::Validation(_)));
    assert!(!err.is_retryable(), "input problems are not retryable");

    // Cart still holds the line, no summary was written
    assert_eq!(Cart::load(&cart_path).unwrap().items.len(), 1);
    assert!(bloom_client::LastOrderSummary::load(&summary_path).is_none());
}

#[tokio::test]
async fn empty_cart_fails_before_the_network() {
    // No server needed — the submit refuses locally
    let client = HttpClient::new(&ClientConfig::new("http://127.0.0.1:9"));
    let state_dir = tempfile::tempdir().unwrap();
    let (cart_path, summary_path) = state_paths(&state_dir);

    let err = submit_checkout(&client, &valid_form(), &cart_path, &summary_path)
        .await
        .unwrap_err();
    assert!(matches!(err, bloom_client::ClientError::Validation(_)));
}
