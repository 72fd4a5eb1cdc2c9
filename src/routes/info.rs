//! Root route — static service description.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::locations;

/// Service description returned from `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    /// Service name
    pub service: String,
    /// API version
    pub version: String,
    /// Short description of what the service does
    pub description: String,
    /// Available endpoints
    pub endpoints: Vec<EndpointInfo>,
    /// Location codes accepted by the weather endpoint
    pub supported_locations: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        }
    }
}

/// Describe the service and its endpoints.
#[utoipa::path(
    get,
    path = "/",
    tag = "Info",
    responses(
        (status = 200, description = "Service description", body = ServiceInfo),
    )
)]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Taiwan Weather API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Flattened 36-hour forecasts from the CWA open-data platform".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/", "This service description"),
            EndpointInfo::new("GET", "/api/health", "Health check"),
            EndpointInfo::new(
                "GET",
                "/api/weather/:location",
                "36-hour forecast for a supported location code",
            ),
        ],
        supported_locations: locations::supported_codes(),
    })
}
