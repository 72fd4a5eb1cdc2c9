//! Router assembly.
//!
//! Builds the full axum application (routes, fallback, CORS, tracing,
//! Swagger UI) from the shared state, so tests can drive the exact router
//! the binary serves.

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::routes;
use crate::routes::weather::AppState;

/// Taiwan Weather API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taiwan Weather API",
        version = "0.1.0",
        description = "HTTP gateway for Taiwan CWA 36-hour weather forecasts. \
            Translates short location codes into CWA region names, fetches the \
            F-C0032-001 dataset, and flattens the per-element time series into \
            one record per time slot.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Info", description = "Service description"),
        (name = "Health", description = "Service health check"),
        (name = "Weather", description = "Forecast retrieval"),
    ),
    paths(
        routes::info::service_info,
        routes::health::health_check,
        routes::weather::get_weather,
    ),
    components(
        schemas(
            routes::info::ServiceInfo,
            routes::info::EndpointInfo,
            routes::health::HealthResponse,
            routes::weather::WeatherResponse,
            crate::services::forecast::ForecastResult,
            crate::services::forecast::ForecastSlot,
            ErrorResponse,
        )
    )
)]
struct ApiDoc;

/// Fallback for unmatched paths.
async fn route_not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Route not found".to_string(),
            message: format!("No route for {}", uri.path()),
            details: None,
            supported_locations: None,
        }),
    )
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    // CORS — read-only API, any origin, GET only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let weather_routes = Router::new()
        .route("/api/weather/:location", get(routes::weather::get_weather))
        .with_state(state);

    Router::new()
        .route("/", get(routes::info::service_info))
        .route("/api/health", get(routes::health::health_check))
        .merge(weather_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cwa::CwaClient;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Serve the router on an ephemeral port and return its base URL.
    async fn spawn_app(cwa: CwaClient) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();
        let app = build_router(AppState { cwa });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn cwa_payload() -> serde_json::Value {
        let window = |name: &str| {
            serde_json::json!([{
                "startTime": "2026-08-07 12:00:00",
                "endTime": "2026-08-07 18:00:00",
                "parameter": { "parameterName": name }
            }])
        };
        serde_json::json!({
            "success": "true",
            "records": {
                "datasetDescription": "三十六小時天氣預報",
                "location": [{
                    "locationName": "臺北市",
                    "weatherElement": [
                        { "elementName": "Wx", "time": window("多雲時晴") },
                        { "elementName": "PoP", "time": window("30") },
                        { "elementName": "MinT", "time": window("26") },
                        { "elementName": "MaxT", "time": window("33") },
                        { "elementName": "CI", "time": window("悶熱") },
                        { "elementName": "WS", "time": window("風速<= 3級(每秒6公尺)") }
                    ]
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let base = spawn_app(CwaClient::new(Some("key".to_string()))).await;

        let resp = reqwest::get(format!("{}/api/health", base)).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "OK");
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let base = spawn_app(CwaClient::new(Some("key".to_string()))).await;

        let resp = reqwest::get(format!("{}/", base)).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["service"], "Taiwan Weather API");
        assert!(body["endpoints"].as_array().unwrap().len() >= 3);
    }

    #[tokio::test]
    async fn test_unmatched_route_returns_404() {
        let base = spawn_app(CwaClient::new(Some("key".to_string()))).await;

        let resp = reqwest::get(format!("{}/does/not/exist", base)).await.unwrap();
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Route not found");
        assert!(body.get("data").is_none());
        assert!(body.get("success").is_none());
    }

    #[tokio::test]
    async fn test_unknown_location_returns_400_with_supported_codes() {
        let base = spawn_app(CwaClient::new(Some("key".to_string()))).await;

        let resp = reqwest::get(format!("{}/api/weather/gotham", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body.get("error").is_some());
        let supported: Vec<String> = body["supported_locations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(supported, crate::locations::supported_codes());
    }

    #[tokio::test]
    async fn test_missing_api_key_returns_500_without_calling_upstream() {
        let server = MockServer::start().await;
        let base = spawn_app(CwaClient::with_base_url(None, server.uri())).await;

        let resp = reqwest::get(format!("{}/api/weather/taipei", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body.get("error").is_some());
        assert!(
            server.received_requests().await.unwrap().is_empty(),
            "No outbound call may be attempted without a credential"
        );
    }

    #[tokio::test]
    async fn test_forecast_success_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Authorization", "test-key"))
            .and(query_param("locationName", "臺北市"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cwa_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let base =
            spawn_app(CwaClient::with_base_url(Some("test-key".to_string()), server.uri())).await;

        let resp = reqwest::get(format!("{}/api/weather/taipei", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["city"], "臺北市");
        assert_eq!(body["data"]["updateTime"], "三十六小時天氣預報");

        let slot = &body["data"]["forecasts"][0];
        assert_eq!(slot["weather"], "多雲時晴");
        assert_eq!(slot["rain"], "30%");
        assert_eq!(slot["minTemp"], "26°C");
        assert_eq!(slot["maxTemp"], "33°C");
        assert_eq!(slot["comfort"], "悶熱");
        assert_eq!(slot["windSpeed"], "風速<= 3級(每秒6公尺)");
    }

    #[tokio::test]
    async fn test_empty_upstream_location_returns_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": "true",
                "records": { "datasetDescription": "三十六小時天氣預報", "location": [] }
            })))
            .mount(&server)
            .await;

        let base =
            spawn_app(CwaClient::with_base_url(Some("key".to_string()), server.uri())).await;

        let resp = reqwest::get(format!("{}/api/weather/kaohsiung", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body.get("error").is_some());
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_propagated_with_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"success": "false", "result": {}})),
            )
            .mount(&server)
            .await;

        let base =
            spawn_app(CwaClient::with_base_url(Some("bad-key".to_string()), server.uri())).await;

        let resp = reqwest::get(format!("{}/api/weather/taichung", base))
            .await
            .unwrap();
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body.get("error").is_some());
        assert_eq!(body["details"]["success"], "false");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let base = spawn_app(CwaClient::new(Some("key".to_string()))).await;

        let client = reqwest::Client::new();
        let resp = client
            .get(format!("{}/api/health", base))
            .header("Origin", "https://example.com")
            .send()
            .await
            .unwrap();

        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
