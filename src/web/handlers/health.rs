//! # Health Check Handlers
//!
//! Liveness endpoint for monitoring and load balancing. Not enveloped;
//! infrastructure consumers expect the bare shape.

use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

/// Basic health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
}

/// Handle `GET /health`
pub async fn check() -> Json<HealthResponse> {
    debug!("Health check requested");

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
