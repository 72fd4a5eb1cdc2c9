/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// CWA open-data API key. Optional at startup — a missing key surfaces
    /// as a 500 on forecast requests rather than a boot failure.
    pub cwa_api_key: Option<String>,
    pub port: u16,
    /// Deployment environment name, used only for startup logging.
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            cwa_api_key: std::env::var("CWA_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }
}
