// Taiwan Weather API v0.1
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod errors;
mod locations;
mod routes;
mod services;

use config::AppConfig;
use routes::weather::AppState;
use services::cwa::CwaClient;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taiwan_weather_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    if config.cwa_api_key.is_none() {
        tracing::warn!(
            "CWA_API_KEY is not set — forecast requests will fail until it is configured"
        );
    }

    // Create CWA client and shared application state
    let cwa = CwaClient::new(config.cwa_api_key.clone());
    let state = AppState { cwa };

    let app = app::build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        "API server listening on {} ({} environment)",
        addr,
        config.environment
    );
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
