//! Integration tests for the scanner HTTP API (offline resolver)

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::get,
    Router,
};
use erecycle_scanner::api::middleware::handle_panic;
use erecycle_scanner::api::{create_router, AppState};
use erecycle_scanner::BarcodeResolver;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

fn app() -> Router {
    create_router(Arc::new(AppState::new(BarcodeResolver::offline())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn scan_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/scan-barcode")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_status() {
    let (status, body) = send(
        app(),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "E-Recycle AI Service Running" }));
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(
        app(),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_scan_catalog_barcode() {
    let (status, body) = send(app(), scan_request(json!({ "code": "8996001600399" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "barcode": "8996001600399",
            "trashType": "Botol Plastik (PET)",
            "productName": "Le Minerale 1500ml",
            "weight": 0.039,
            "pointsEarned": 39,
            "message": "Verified: Le Minerale 1500ml"
        })
    );
}

#[tokio::test]
async fn test_scan_accepts_barcode_field() {
    let (status, body) = send(app(), scan_request(json!({ "barcode": "8996129803504" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productName"], "Cleo 550ml");
    assert_eq!(body["weight"], 0.019);
    assert_eq!(body["pointsEarned"], 19);
}

#[tokio::test]
async fn test_scan_with_both_fields_prefers_code() {
    let (status, body) = send(
        app(),
        scan_request(json!({ "code": "8996001600399", "barcode": "8996129803504" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["barcode"], "8996001600399");
    assert_eq!(body["productName"], "Le Minerale 1500ml");
}

#[tokio::test]
async fn test_scan_fallback_barcode() {
    let (status, body) = send(app(), scan_request(json!({ "code": "99999123" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["productName"], "Botol Plastik (Unknown)");
    assert_eq!(body["weight"], 0.038);
    assert_eq!(body["pointsEarned"], 38);
}

#[tokio::test]
async fn test_scan_invalid_barcode() {
    let (status, body) = send(app(), scan_request(json!({ "code": "12345" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Format barcode tidak valid. Harus 8+ digit angka.");
    assert_eq!(body["code"], "SCAN_INVALID_BARCODE");
}

#[tokio::test]
async fn test_scan_missing_barcode() {
    for payload in [json!({}), json!({ "code": "" })] {
        let (status, body) = send(app(), scan_request(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No barcode provided");
    }
}

#[tokio::test]
async fn test_scan_malformed_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/scan-barcode")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "API_BAD_REQUEST");
}

#[tokio::test]
async fn test_stats_count_scans() {
    let state = Arc::new(AppState::new(BarcodeResolver::offline()));
    let app = create_router(state.clone());

    send(app.clone(), scan_request(json!({ "code": "8996001600399" }))).await;
    send(app.clone(), scan_request(json!({ "code": "99999123" }))).await;
    send(app.clone(), scan_request(json!({ "code": "12345" }))).await;

    let (status, body) = send(
        app,
        Request::builder().uri("/stats").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalScans"], 3);
    assert_eq!(body["catalogHits"], 1);
    assert_eq!(body["fallbackEstimates"], 1);
    assert_eq!(body["rejected"], 1);
    assert_eq!(body["pointsAwarded"], 77);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_cors() {
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

async fn boom() -> &'static str {
    panic!("boom")
}

#[tokio::test]
async fn test_handler_panic_becomes_json_500() {
    let app = Router::new()
        .route("/boom", get(boom))
        .layer(CatchPanicLayer::custom(handle_panic));

    let (status, body) = send(
        app,
        Request::builder().uri("/boom").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["code"], "INTERNAL_ERROR");
}
