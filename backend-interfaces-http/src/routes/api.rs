use axum::Router;

use backend_application::AppState;

use crate::handlers::{auth_handlers, dex_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", axum::routing::get(ops_handlers::root_status))
        .route("/health", axum::routing::get(ops_handlers::health_live))
        .route(
            "/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/metrics",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .route(
            "/api/authenticate",
            axum::routing::post(auth_handlers::authenticate),
        )
        .route("/api/dex", axum::routing::post(dex_handlers::upload_dex))
        .with_state(state)
}
