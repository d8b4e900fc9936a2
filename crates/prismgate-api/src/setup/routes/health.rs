//! Health check handler and response type.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub upstream: String,
    pub strategy: &'static str,
}

/// Liveness probe. The upstream session was validated at startup; a running
/// process with a cached identity is considered healthy.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "ok".to_string(),
            upstream: state.client.base_url().to_string(),
            strategy: state.strategy.name(),
        }),
    )
}
