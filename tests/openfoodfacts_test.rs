//! Open Food Facts client tests against a local stand-in server

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use erecycle_scanner::api::{create_router, AppState};
use erecycle_scanner::{
    BarcodeResolver, ErrorCode, ExternalLookup, OpenFoodFactsClient, ProductLookup,
    ResolutionSource,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

const FOUND: &str = "8990000000011";
const SERVER_ERROR: &str = "8990000000028";
const MALFORMED: &str = "8990000000035";
const SLOW: &str = "8990000000042";
const NO_BRAND: &str = "8990000000059";
const EMPTY_PRODUCT: &str = "8990000000066";

async fn product_handler(
    State(hits): State<Arc<AtomicUsize>>,
    Path(file): Path<String>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let barcode = file.trim_end_matches(".json");
    match barcode {
        FOUND => Json(json!({
            "status": 1,
            "product": {
                "product_name": "Air Mineral",
                "brands": "Le Minerale",
                "quantity": "600 ml"
            }
        }))
        .into_response(),
        NO_BRAND => Json(json!({
            "status": 1,
            "product": { "product_name": "Teh Botol", "quantity": "1.5 L" }
        }))
        .into_response(),
        EMPTY_PRODUCT => Json(json!({ "status": 1, "product": {} })).into_response(),
        SERVER_ERROR => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        MALFORMED => "<html>not json</html>".into_response(),
        SLOW => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "status": 1, "product": { "product_name": "Too Late" } })).into_response()
        }
        _ => Json(json!({ "status": 0, "status_verbose": "product not found" })).into_response(),
    }
}

/// Spawn a fake product database; returns its base URL and hit counter
async fn spawn_fake_off() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/v2/product/:file", get(product_handler))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

async fn client() -> (OpenFoodFactsClient, Arc<AtomicUsize>) {
    let (base_url, hits) = spawn_fake_off().await;
    let client = OpenFoodFactsClient::with_base_url(&base_url, Duration::from_secs(1)).unwrap();
    (client, hits)
}

#[tokio::test]
async fn test_lookup_found() {
    let (client, hits) = client().await;

    match client.lookup(FOUND).await {
        ExternalLookup::Found(product) => {
            assert_eq!(product.name, "Le Minerale Air Mineral (600 ml)");
            assert_eq!(product.brand, "Le Minerale");
            assert_eq!(product.quantity_text, "600 ml");
            assert_eq!(product.weight_kg, 0.022);
        }
        ExternalLookup::NotFound => panic!("expected product"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_lookup_without_brand() {
    let (client, _) = client().await;

    match client.lookup(NO_BRAND).await {
        ExternalLookup::Found(product) => {
            assert_eq!(product.name, "Teh Botol (1.5 L)");
            assert_eq!(product.brand, "");
            assert_eq!(product.weight_kg, 0.040);
        }
        ExternalLookup::NotFound => panic!("expected product"),
    }
}

#[tokio::test]
async fn test_lookup_misses() {
    let (client, _) = client().await;

    for barcode in ["0000000000000", EMPTY_PRODUCT, SERVER_ERROR, MALFORMED, SLOW] {
        assert_eq!(client.lookup(barcode).await, ExternalLookup::NotFound, "{}", barcode);
    }
}

#[tokio::test]
async fn test_fetch_product_error_codes() {
    let (client, _) = client().await;

    let err = client.fetch_product(SERVER_ERROR).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UpstreamUnavailable);

    let err = client.fetch_product(MALFORMED).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UpstreamInvalidResponse);

    let err = client.fetch_product(SLOW).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UpstreamTimeout);

    assert!(client.fetch_product("0000000000000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_a_miss() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        OpenFoodFactsClient::with_base_url(&format!("http://{}", addr), Duration::from_secs(1)).unwrap();
    assert_eq!(client.lookup(FOUND).await, ExternalLookup::NotFound);
}

#[tokio::test]
async fn test_resolver_tiers_over_http() {
    let (client, hits) = client().await;
    let resolver = BarcodeResolver::new(Arc::new(client));

    // Catalog hit never reaches the network
    let result = resolver.resolve("8996001600399").await.unwrap();
    assert_eq!(result.source, ResolutionSource::Catalog);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let result = resolver.resolve(FOUND).await.unwrap();
    assert_eq!(result.source, ResolutionSource::External);
    assert_eq!(result.product_name, "Le Minerale Air Mineral (600 ml)");
    assert_eq!(result.points_earned, 22);

    // Upstream failures degrade to the fallback estimate
    let result = resolver.resolve(SERVER_ERROR).await.unwrap();
    assert_eq!(result.source, ResolutionSource::Fallback);
    assert_eq!(result.weight_kg, 0.018);

    let result = resolver.resolve(MALFORMED).await.unwrap();
    assert_eq!(result.source, ResolutionSource::Fallback);
    assert_eq!(result.weight_kg, 0.025);

    let err = resolver.resolve("12345").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidBarcode);
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_scan_endpoint_with_external_lookup() {
    let (client, _) = client().await;
    let app = create_router(Arc::new(AppState::new(BarcodeResolver::new(Arc::new(client)))));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/scan-barcode")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "code": FOUND }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["productName"], "Le Minerale Air Mineral (600 ml)");
    assert_eq!(body["weight"], 0.022);
    assert_eq!(body["pointsEarned"], 22);
    assert_eq!(body["message"], "Verified: Le Minerale Air Mineral (600 ml)");
}
