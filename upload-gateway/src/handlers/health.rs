use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Service status enum
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    pub status: ServiceStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub storage: ServiceStatus,
    pub bucket: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness check endpoint
///
/// GET /health
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "upload-gateway".to_string(),
        status: ServiceStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Readiness check endpoint, probes the configured bucket
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let storage_ready = state.store.health_check().await;

    let response = ReadinessResponse {
        ready: storage_ready,
        storage: if storage_ready {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        },
        bucket: state.config.storage.bucket.clone(),
        timestamp: Utc::now(),
    };

    let status_code = if storage_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
