//! Health check handler

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `error`
    pub status: String,
    /// Whether the planner answered the probe
    pub otp_connected: bool,
    /// Probed router, when connected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router: Option<String>,
    /// Probe failure, when not connected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report whether the upstream planner is reachable
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = state.routing_service.check_health().await;

    if health.connected {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                otp_connected: true,
                router: Some(health.router),
                error: None,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "error".to_string(),
                otp_connected: false,
                router: None,
                error: health.error,
            }),
        )
    }
}
