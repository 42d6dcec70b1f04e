use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use yatra_api::{build_app, build_router, ApiState, AppConfig};
use yatra_chat::GuideAgent;
use yatra_index::{MonumentIndex, SafetyAdvisor};
use yatra_observability::AppMetrics;

fn data_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn test_config() -> AppConfig {
    let data = data_root();
    AppConfig {
        monuments_path: data.join("monuments_data.json"),
        safety_path: data.join("safety_data.json"),
        allowed_origins: Vec::new(),
    }
}

/// Router with the completion adapter explicitly absent, so chat replies are
/// deterministic regardless of environment.
fn offline_app() -> Router {
    let data = data_root();
    let metrics = AppMetrics::shared();

    build_router(ApiState {
        index: Arc::new(
            MonumentIndex::from_json_file(data.join("monuments_data.json"))
                .expect("monuments dataset should load"),
        ),
        advisor: Arc::new(
            SafetyAdvisor::from_json_file(data.join("safety_data.json"))
                .expect("safety dataset should load"),
        ),
        agent: Arc::new(GuideAgent::new(None, metrics.clone())),
        metrics,
        allowed_origins: Arc::new(Vec::new()),
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_loaded_monuments() {
    let app = build_app(&test_config()).expect("app should build");

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "healthy");
    assert!(parsed["monuments_loaded"].as_u64().unwrap() > 0);
    assert!(parsed["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_monument_returns_404() {
    let app = build_app(&test_config()).expect("app should build");

    let response = app
        .oneshot(get("/api/monument/taj-mahal"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let parsed = body_json(response).await;
    assert_eq!(parsed["detail"], "Monument not found");
}

#[tokio::test]
async fn monument_lookup_by_id() {
    let app = build_app(&test_config()).expect("app should build");

    let response = app.oneshot(get("/api/monument/red-fort")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["monument"]["name"], "Red Fort");
}

#[tokio::test]
async fn monuments_all_returns_catalog() {
    let app = build_app(&test_config()).expect("app should build");

    let response = app.oneshot(get("/api/monuments/all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);
    assert_eq!(
        parsed["total_monuments"].as_u64().unwrap() as usize,
        parsed["monuments"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn far_location_finds_no_monuments() {
    let app = build_app(&test_config()).expect("app should build");

    let response = app
        .oneshot(post_json(
            "/api/check-location",
            json!({ "latitude": 19.0760, "longitude": 72.8777, "radius_km": 0.1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["monuments_found"], 0);
    assert_eq!(parsed["monuments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn check_location_orders_monuments_by_distance() {
    let app = build_app(&test_config()).expect("app should build");

    let response = app
        .oneshot(post_json(
            "/api/check-location",
            json!({ "latitude": 28.6129, "longitude": 77.2295, "radius_km": 5.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    let monuments = parsed["monuments"].as_array().unwrap();
    assert!(monuments.len() >= 2);
    assert_eq!(monuments[0]["id"], "india-gate");

    let distances = monuments
        .iter()
        .map(|m| m["distance_km"].as_f64().unwrap())
        .collect::<Vec<_>>();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn safety_tips_merge_monument_and_area_tips() {
    let app = build_app(&test_config()).expect("app should build");

    let response = app
        .oneshot(post_json(
            "/api/safety-tips",
            json!({ "latitude": 28.6507, "longitude": 77.2334 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);
    assert!(parsed["nearby_monuments"].as_u64().unwrap() >= 1);

    let tips = parsed["safety_tips"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tip| tip.as_str().unwrap().to_string())
        .collect::<Vec<_>>();

    // Monument warnings come first, prefixed with the monument name, then
    // the general and area tips.
    assert!(tips[0].starts_with("Jama Masjid: "));
    assert!(tips
        .iter()
        .any(|tip| tip == "Watch for pickpockets in the bazaar crowds"));
    assert!(tips
        .iter()
        .any(|tip| tip == "Use official guides and prepaid counters wherever available"));

    assert_eq!(parsed["emergency_contacts"]["police"], "100");
    assert!(!parsed["transportation_scams"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn chat_without_credential_uses_rule_engine() {
    let app = offline_app();

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({
                "user_message": "hello",
                "user_latitude": 28.6129,
                "user_longitude": 77.2295
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["ai_powered"], false);
    assert!(parsed["response"]
        .as_str()
        .unwrap()
        .starts_with("Namaste! Welcome to India Gate"));
    assert_eq!(parsed["context"]["current_location"], "India Gate");
    assert_eq!(parsed["context"]["distance_km"], 0.0);
}

#[tokio::test]
async fn chat_far_from_monuments_reports_unknown_context() {
    let app = offline_app();

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({
                "user_message": "what's around",
                "user_latitude": 19.0760,
                "user_longitude": 72.8777
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["ai_powered"], false);
    assert_eq!(parsed["context"]["current_location"], "Unknown");
    assert!(parsed["context"]["distance_km"].is_null());
    assert_eq!(parsed["nearby_monuments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_chat_body_is_rejected() {
    let app = offline_app();

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({ "user_latitude": 28.6129, "user_longitude": 77.2295 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
