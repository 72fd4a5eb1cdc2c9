use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
///
/// Every failure produces exactly one of these; `details` and
/// `supported_locations` are only present where the variant carries them.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error label
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Upstream response body, present when the CWA API reported the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Supported location codes, present on unknown-location errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_locations: Option<Vec<String>>,
}

impl ErrorResponse {
    fn new(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            supported_locations: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported location code: {code}")]
    UnknownLocation { code: String, supported: Vec<String> },

    #[error("CWA_API_KEY is not configured")]
    MissingApiKey,

    #[error("CWA API returned HTTP {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    #[error("No forecast data for {0}")]
    NoData(String),

    #[error("CWA API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::UnknownLocation { code, supported } => {
                tracing::warn!("Rejected unknown location code '{}'", code);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        supported_locations: Some(supported),
                        ..ErrorResponse::new(
                            "Location not found",
                            format!("'{}' is not a supported location code", code),
                        )
                    },
                )
            }
            AppError::MissingApiKey => {
                tracing::error!("CWA_API_KEY is not configured; cannot call the CWA API");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Server configuration error",
                        "CWA_API_KEY is not configured".to_string(),
                    ),
                )
            }
            AppError::Upstream { status, body } => {
                tracing::error!("CWA API returned HTTP {}: {}", status, body);
                (
                    // The upstream status is propagated 1:1 to the caller.
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    ErrorResponse {
                        details: Some(body),
                        ..ErrorResponse::new(
                            "Upstream API error",
                            format!("CWA API returned HTTP {}", status),
                        )
                    },
                )
            }
            AppError::NoData(region) => {
                tracing::warn!("CWA API returned no forecast data for {}", region);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(
                        "No forecast data",
                        format!("CWA API returned no forecast data for {}", region),
                    ),
                )
            }
            AppError::Transport(err) => {
                // Network-level failure — log the cause, keep the body generic.
                tracing::error!("CWA API request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Upstream request failed",
                        "Failed to reach the CWA API".to_string(),
                    ),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error", msg),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
