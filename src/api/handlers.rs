//! Liveness and readiness endpoints

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::observability::HealthStatus;

use super::routes::ApiState;

/// Liveness endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    /// Always "alive" when responding
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Per-component entry in the readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub component: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// Readiness endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub instance_id: String,
    pub started_at: DateTime<Utc>,
    pub components: Vec<ComponentHealth>,
}

/// Returns 200 whenever the HTTP server is accepting requests.
pub async fn liveness_handler(State(state): State<ApiState>) -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
        service: state.context.config().observability.service_name.clone(),
        version: crate::VERSION.to_string(),
    })
}

/// Returns 200 only when every registered component is healthy, 503 otherwise.
pub async fn readiness_handler(
    State(state): State<ApiState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let health = state.context.health();
    let checks = health.checks().await;
    let overall = HealthStatus::aggregate(&checks);

    let components = checks
        .into_iter()
        .map(|check| ComponentHealth {
            status: check.status.label().to_string(),
            message: check.status.message().map(str::to_string),
            component: check.component,
            last_check: check.last_check,
            metadata: check.metadata,
        })
        .collect();

    let status_code =
        if overall.is_healthy() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status_code,
        Json(ReadinessResponse {
            status: overall.label().to_string(),
            instance_id: health.instance_id().to_string(),
            started_at: state.context.started_at(),
            components,
        }),
    )
}
