use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use yatra_chat::GuideAgent;
use yatra_index::{MonumentIndex, SafetyAdvisor};
use yatra_observability::{AppMetrics, MetricsSnapshot};

/// Monument radius for chat context, matching the default check-location
/// radius.
const CHAT_MONUMENT_RADIUS_KM: f64 = 0.5;
/// Wider radius used when collecting monument-specific safety warnings.
const SAFETY_MONUMENT_RADIUS_KM: f64 = 1.0;
/// At most this many monuments contribute safety warnings.
const SAFETY_WARNING_MONUMENTS: usize = 2;
/// At most this many monuments are echoed back as chat context.
const CHAT_CONTEXT_MONUMENTS: usize = 3;

#[derive(Clone)]
pub struct ApiState {
    pub index: Arc<MonumentIndex>,
    pub advisor: Arc<SafetyAdvisor>,
    pub agent: Arc<GuideAgent>,
    pub metrics: Arc<AppMetrics>,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub monuments_path: PathBuf,
    pub safety_path: PathBuf,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            monuments_path: env::var("YATRA_MONUMENTS_PATH")
                .unwrap_or_else(|_| "data/monuments_data.json".to_string())
                .into(),
            safety_path: env::var("YATRA_SAFETY_PATH")
                .unwrap_or_else(|_| "data/safety_data.json".to_string())
                .into(),
            allowed_origins: parse_allowed_origins(),
        }
    }
}

fn parse_allowed_origins() -> Vec<String> {
    env::var("YATRA_ALLOWED_ORIGINS")
        .map(|raw| {
            raw.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    monuments_loaded: usize,
    timestamp: String,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationRequest {
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_radius_km")]
    radius_km: f64,
}

fn default_radius_km() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
struct ChatRequest {
    user_message: String,
    user_latitude: f64,
    user_longitude: f64,
}

/// Loads both reference datasets and wires the router. Dataset failures are
/// startup-fatal for the binary.
pub fn build_app(config: &AppConfig) -> Result<Router> {
    let index = Arc::new(
        MonumentIndex::from_json_file(&config.monuments_path).with_context(|| {
            format!(
                "failed loading monuments dataset from {}",
                config.monuments_path.display()
            )
        })?,
    );
    let advisor = Arc::new(
        SafetyAdvisor::from_json_file(&config.safety_path).with_context(|| {
            format!(
                "failed loading safety dataset from {}",
                config.safety_path.display()
            )
        })?,
    );

    let metrics = AppMetrics::shared();
    let agent = Arc::new(GuideAgent::from_env(metrics.clone()));

    info!(
        monuments = index.len(),
        ai_enabled = agent.ai_enabled(),
        "reference datasets loaded"
    );

    Ok(build_router(ApiState {
        index,
        advisor,
        agent,
        metrics,
        allowed_origins: Arc::new(config.allowed_origins.clone()),
    }))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/check-location", post(check_location))
        .route("/api/monument/:id", get(monument_by_id))
        .route("/api/monuments/all", get(monuments_all))
        .route("/api/safety-tips", post(safety_tips))
        .route("/api/chat", post(chat))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .with_state(state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    }
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Yatra Guide API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "REST API for Delhi tourism with AI-powered chat and monument information",
        "endpoints": [
            "GET / - API information",
            "GET /health - Health check",
            "POST /api/check-location - Find nearby monuments",
            "GET /api/monument/{id} - Get monument details",
            "GET /api/monuments/all - Get all monuments",
            "POST /api/safety-tips - Get location-based safety tips",
            "POST /api/chat - AI-powered chat with tour guide"
        ]
    }))
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        monuments_loaded: state.index.len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    })
}

async fn check_location(
    State(state): State<ApiState>,
    Json(request): Json<LocationRequest>,
) -> impl IntoResponse {
    state.metrics.inc_request();

    let monuments = state
        .index
        .nearby(request.latitude, request.longitude, request.radius_km);

    Json(json!({
        "success": true,
        "location": {
            "latitude": request.latitude,
            "longitude": request.longitude,
            "radius_km": request.radius_km
        },
        "monuments_found": monuments.len(),
        "monuments": monuments
    }))
}

async fn monument_by_id(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    state.metrics.inc_request();

    match state.index.find_by_id(&id) {
        Some(monument) => Json(json!({
            "success": true,
            "monument": monument
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Monument not found" })),
        )
            .into_response(),
    }
}

async fn monuments_all(State(state): State<ApiState>) -> impl IntoResponse {
    state.metrics.inc_request();

    Json(json!({
        "success": true,
        "total_monuments": state.index.len(),
        "monuments": state.index.all()
    }))
}

async fn safety_tips(
    State(state): State<ApiState>,
    Json(request): Json<LocationRequest>,
) -> impl IntoResponse {
    state.metrics.inc_request();

    let nearby = state
        .index
        .nearby(request.latitude, request.longitude, SAFETY_MONUMENT_RADIUS_KM);
    let location_tips = state.advisor.resolve(request.latitude, request.longitude);

    // Monument warnings and location tips are each deduplicated within their
    // own subset, never across the merged list.
    let mut monument_warnings: Vec<String> = Vec::new();
    for ranked in nearby.iter().take(SAFETY_WARNING_MONUMENTS) {
        for warning in &ranked.monument.safety_warnings {
            let labeled = format!("{}: {}", ranked.monument.name, warning);
            if !monument_warnings.contains(&labeled) {
                monument_warnings.push(labeled);
            }
        }
    }

    let safety_tips = monument_warnings
        .into_iter()
        .chain(location_tips)
        .collect::<Vec<_>>();

    Json(json!({
        "success": true,
        "location": {
            "latitude": request.latitude,
            "longitude": request.longitude
        },
        "nearby_monuments": nearby.len(),
        "safety_tips": safety_tips,
        "emergency_contacts": state.advisor.emergency_contacts(),
        "transportation_scams": state.advisor.transportation_scams(),
        "shopping_scams": state.advisor.shopping_scams()
    }))
}

async fn chat(State(state): State<ApiState>, Json(request): Json<ChatRequest>) -> impl IntoResponse {
    state.metrics.inc_request();

    let nearby = state.index.nearby(
        request.user_latitude,
        request.user_longitude,
        CHAT_MONUMENT_RADIUS_KM,
    );

    let reply = state.agent.respond(&request.user_message, &nearby).await;

    let (current_location, distance_km) = match nearby.first() {
        Some(nearest) => (nearest.monument.name.clone(), Some(nearest.distance_km)),
        None => ("Unknown".to_string(), None),
    };

    let context_monuments = nearby
        .into_iter()
        .take(CHAT_CONTEXT_MONUMENTS)
        .collect::<Vec<_>>();

    Json(json!({
        "success": true,
        "response": reply.text,
        "ai_powered": reply.ai_powered,
        "nearby_monuments": context_monuments,
        "context": {
            "current_location": current_location,
            "distance_km": distance_km
        }
    }))
}
