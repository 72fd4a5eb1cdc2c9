use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status, always "OK" while the process is serving
    pub status: String,
    /// Current server time, RFC 3339
    pub timestamp: String,
    /// API version
    pub version: String,
}

/// Health check endpoint.
///
/// The service holds no connections or state to probe, so this only
/// confirms the process is up and answering.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
