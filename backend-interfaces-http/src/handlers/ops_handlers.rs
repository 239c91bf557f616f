use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use backend_application::AppState;

pub async fn root_status() -> impl IntoResponse {
    Json(json!({
        "status": "API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_live() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.meter_repo.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        ),
    }
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> String {
    state.metrics.render_prometheus()
}
