//! Liveness and readiness probes.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests.
    pub status: &'static str,
}

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Readiness probe. All state is in-memory, so a live process is a ready
/// process.
pub async fn readiness_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
