//! Liveness probe

use axum::Json;
use serde::Serialize;

use crate::SERVICE_NAME;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

/// GET /health - Report that the service is up
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: chrono::Local::now().to_rfc3339(),
    })
}
