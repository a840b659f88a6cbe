//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /health/detailed — probes both stores.
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let index = match state.index.health_check().await {
        Ok(true) => "connected",
        _ => "unreachable",
    };
    let remote = match state.remote.health_check().await {
        Ok(true) => "reachable",
        _ => "unreachable",
    };
    let status = if index == "connected" && remote == "reachable" {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        index: index.to_string(),
        remote: remote.to_string(),
    }))
}
