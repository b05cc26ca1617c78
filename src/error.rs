use crate::constants::{
    MSG_INVALID_COORDINATES, MSG_NO_ROUTE_FOUND, MSG_PLACE_NOT_FOUND, MSG_ROUTE_FETCH_FAILED,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),

    #[error("Directions API error: {0}")]
    DirectionsApi(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text shown to the end user when this error ends a navigation attempt.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => MSG_INVALID_COORDINATES,
            AppError::NoRouteFound(_) => MSG_NO_ROUTE_FOUND,
            AppError::Geocoding(_) => MSG_PLACE_NOT_FOUND,
            AppError::DirectionsApi(_) | AppError::Network(_) | AppError::Config(_) => {
                MSG_ROUTE_FETCH_FAILED
            }
        }
    }

    /// Whether this error came from a single upstream request rather than
    /// from the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::DirectionsApi(_) | AppError::Network(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::DirectionsApi(format!("Failed to parse response: {}", e))
        } else {
            AppError::Network(format!("Request failed: {}", e))
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
