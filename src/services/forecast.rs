//! Forecast normalization.
//!
//! Flattens the CWA per-element time series (one array per metric) into one
//! record per time slot, which is what callers actually want to render.

use serde::Serialize;
use utoipa::ToSchema;

use crate::services::cwa::{CwaForecastResponse, CwaTimeEntry};

/// One time-bounded forecast window with its metrics.
///
/// All fields are strings straight from the upstream parameter display
/// names; a metric whose element never appears stays an empty string.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSlot {
    /// Slot start in CWA local-time format, e.g. "2026-08-07 12:00:00"
    pub start_time: String,
    /// Slot end in CWA local-time format
    pub end_time: String,
    /// Weather description (Wx), e.g. "多雲時晴"
    pub weather: String,
    /// Precipitation chance with literal `%` suffix; "0%" when the
    /// parameter is absent
    pub rain: String,
    /// Minimum temperature with literal `°C` suffix; "-°C" when absent
    pub min_temp: String,
    /// Maximum temperature with literal `°C` suffix; "-°C" when absent
    pub max_temp: String,
    /// Comfort index description (CI)
    pub comfort: String,
    /// Wind-speed description (WS)
    pub wind_speed: String,
}

/// Flattened forecast for one region.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Region name as reported by the upstream, verbatim
    pub city: String,
    /// Upstream dataset description string, verbatim
    pub update_time: String,
    /// One entry per time slot, in upstream order
    pub forecasts: Vec<ForecastSlot>,
}

fn parameter_name(entry: &CwaTimeEntry) -> Option<&str> {
    entry
        .parameter
        .as_ref()
        .and_then(|p| p.parameter_name.as_deref())
}

/// Flatten the upstream payload into one `ForecastSlot` per time window.
///
/// Returns `None` when the payload carries no location entry (the upstream
/// has no data for the requested region).
///
/// The slot count follows weather element 0's time series; the remaining
/// elements are trusted to align with it. An element that is shorter than
/// the timeline (or missing entirely) leaves its fields blank for the
/// affected slots rather than failing the whole response.
pub fn normalize(payload: &CwaForecastResponse) -> Option<ForecastResult> {
    let location = payload.records.location.first()?;

    let timeline = location
        .weather_element
        .first()
        .map(|e| e.time.as_slice())
        .unwrap_or(&[]);

    let mut forecasts = Vec::with_capacity(timeline.len());
    for (i, window) in timeline.iter().enumerate() {
        let mut slot = ForecastSlot {
            start_time: window.start_time.clone(),
            end_time: window.end_time.clone(),
            ..ForecastSlot::default()
        };

        for element in &location.weather_element {
            let Some(entry) = element.time.get(i) else {
                continue;
            };
            match element.element_name.as_str() {
                "Wx" => slot.weather = parameter_name(entry).unwrap_or_default().to_string(),
                "PoP" => slot.rain = format!("{}%", parameter_name(entry).unwrap_or("0")),
                "MinT" => slot.min_temp = format!("{}°C", parameter_name(entry).unwrap_or("-")),
                "MaxT" => slot.max_temp = format!("{}°C", parameter_name(entry).unwrap_or("-")),
                "CI" => slot.comfort = parameter_name(entry).unwrap_or_default().to_string(),
                "WS" => slot.wind_speed = parameter_name(entry).unwrap_or_default().to_string(),
                // Unrecognized element tags are skipped so upstream additions
                // don't break normalization.
                _ => {}
            }
        }

        forecasts.push(slot);
    }

    Some(ForecastResult {
        city: location.location_name.clone(),
        update_time: payload.records.dataset_description.clone(),
        forecasts,
    })
}
