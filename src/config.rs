use crate::constants::*;
use crate::models::TravelMode;
use crate::services::directions::AuthMode;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub directions_api_key: String,
    pub directions_base_url: String,
    pub directions_auth_mode: AuthMode,
    pub geocoder_base_url: String,
    pub http_timeout_secs: u64,
    /// Mode the route selector starts in before the user picks another
    pub default_mode: TravelMode,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let http_timeout_secs: u64 = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid HTTP_TIMEOUT_SECS")?;

        if http_timeout_secs == 0 || http_timeout_secs > MAX_HTTP_TIMEOUT_SECS {
            return Err(format!(
                "HTTP_TIMEOUT_SECS must be between 1 and {} seconds",
                MAX_HTTP_TIMEOUT_SECS
            ));
        }

        Ok(Config {
            directions_api_key: env::var("ORS_API_KEY").map_err(|_| "ORS_API_KEY must be set")?,
            directions_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DIRECTIONS_BASE_URL.to_string()),
            directions_auth_mode: env::var("ORS_AUTH_MODE")
                .unwrap_or_else(|_| "header".to_string())
                .parse()?,
            geocoder_base_url: env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_BASE_URL.to_string()),
            http_timeout_secs,
            default_mode: env::var("DEFAULT_TRAVEL_MODE")
                .unwrap_or_else(|_| TravelMode::default().to_string())
                .parse()?,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
