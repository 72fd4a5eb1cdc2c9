//! Forecast HTTP endpoint.
//!
//! GET /api/weather/:location — resolves the location code, fetches the
//! 36-hour forecast from the CWA API, and returns the flattened result.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::{AppError, ErrorResponse};
use crate::locations;
use crate::services::cwa::CwaClient;
use crate::services::forecast::{normalize, ForecastResult};

/// Shared application state for the weather endpoint.
#[derive(Clone)]
pub struct AppState {
    pub cwa: CwaClient,
}

/// Successful forecast response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherResponse {
    /// Always true on the success path
    pub success: bool,
    /// Flattened forecast
    pub data: ForecastResult,
}

/// Get the 36-hour forecast for a location code.
///
/// Runs the full resolve → fetch → normalize pipeline; each stage's failure
/// maps to its own status code via `AppError`.
#[utoipa::path(
    get,
    path = "/api/weather/{location}",
    tag = "Weather",
    params(
        ("location" = String, Path, description = "Supported location code, e.g. \"taipei\""),
    ),
    responses(
        (status = 200, description = "Flattened 36-hour forecast", body = WeatherResponse),
        (status = 400, description = "Unknown location code", body = ErrorResponse),
        (status = 404, description = "Upstream has no data for the region", body = ErrorResponse),
        (status = 500, description = "Configuration or transport failure", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<WeatherResponse>, AppError> {
    let region = locations::resolve(&location).ok_or_else(|| AppError::UnknownLocation {
        code: location.clone(),
        supported: locations::supported_codes(),
    })?;

    tracing::debug!("Fetching CWA forecast for {} ({})", region, location);

    let payload = state.cwa.fetch_forecast(region).await?;
    let data = normalize(&payload).ok_or_else(|| AppError::NoData(region.to_string()))?;

    Ok(Json(WeatherResponse { success: true, data }))
}
