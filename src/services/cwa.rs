//! CWA open-data API client.
//!
//! Fetches the 36-hour city/county forecast dataset (F-C0032-001) from the
//! Central Weather Administration open-data platform.
//! See: https://opendata.cwa.gov.tw/dist/opendata-swagger.html

use serde::Deserialize;

use crate::errors::AppError;

const CWA_API_URL: &str = "https://opendata.cwa.gov.tw/api/v1/rest/datastore/F-C0032-001";

/// Client for the CWA open-data forecast API.
#[derive(Debug, Clone)]
pub struct CwaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

// --- CWA JSON response types ---

/// Raw forecast payload as returned by the CWA API.
///
/// Transient — owned within one request's handling and discarded after
/// normalization.
#[derive(Debug, Deserialize)]
pub struct CwaForecastResponse {
    pub records: CwaRecords,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaRecords {
    /// Dataset-level description string, e.g. "三十六小時天氣預報"
    #[serde(default)]
    pub dataset_description: String,
    /// One entry per requested region; empty when the upstream has no data
    #[serde(default)]
    pub location: Vec<CwaLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaLocation {
    pub location_name: String,
    #[serde(default)]
    pub weather_element: Vec<CwaWeatherElement>,
}

/// One per-metric time series, identified by its element tag
/// (Wx, PoP, MinT, MaxT, CI, WS, ...).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaWeatherElement {
    pub element_name: String,
    #[serde(default)]
    pub time: Vec<CwaTimeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaTimeEntry {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub parameter: Option<CwaParameter>,
}

/// The `parameter` object also carries `parameterValue`/`parameterUnit`
/// fields; only the display name is surfaced, the rest is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwaParameter {
    #[serde(default)]
    pub parameter_name: Option<String>,
}

impl CwaClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, CWA_API_URL)
    }

    /// Client pointed at a non-default endpoint. Used by tests against a
    /// mock server.
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Fetch the 36-hour forecast for a resolved CWA region name.
    ///
    /// The credential is checked before any network attempt — a missing key
    /// is a configuration error, not an upstream one. Upstream HTTP errors
    /// keep their status and body; network failures have no response to
    /// surface.
    pub async fn fetch_forecast(&self, region: &str) -> Result<CwaForecastResponse, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(AppError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("Authorization", api_key), ("locationName", region)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Surface the upstream body as-is; fall back to a JSON string
            // when it isn't valid JSON.
            let body = serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::Value::String(text));
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            AppError::InternalError(format!("Failed to decode CWA API response: {}", e))
        })
    }
}
