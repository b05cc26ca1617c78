use crate::config::Config;
use crate::constants::{DEFAULT_DIRECTIONS_BASE_URL, USER_AGENT};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, RoutePreference, RouteSegment};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Default: the raw API key in the `Authorization` header.
    RawHeader,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header" | "raw" => Ok(AuthMode::RawHeader),
            "bearer" => Ok(AuthMode::BearerHeader),
            _ => Err(format!(
                "Invalid auth mode: {}. Use 'header' or 'bearer'",
                s
            )),
        }
    }
}

/// A source of single-preference directions between two points.
///
/// The route provider fans out one call per [`RoutePreference`]; each call
/// either yields the first route of the response or an error that only
/// affects that preference.
#[async_trait]
pub trait DirectionsSource: Send + Sync {
    async fn directions(
        &self,
        profile: &str,
        preference: RoutePreference,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<DirectionsResponse>;
}

#[derive(Clone)]
pub struct DirectionsClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl DirectionsClient {
    pub fn new(api_key: String) -> Self {
        DirectionsClient {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_DIRECTIONS_BASE_URL.to_string(),
            auth_mode: AuthMode::RawHeader,
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        DirectionsClient {
            client: Client::new(),
            api_key,
            base_url,
            auth_mode,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(DirectionsClient {
            client,
            api_key: config.directions_api_key.clone(),
            base_url: config.directions_base_url.trim_end_matches('/').to_string(),
            auth_mode: config.directions_auth_mode.clone(),
        })
    }

    fn endpoint(&self, profile: &str) -> String {
        format!("{}/{}/geojson", self.base_url, profile)
    }
}

#[async_trait]
impl DirectionsSource for DirectionsClient {
    /// Get directions between two points for one routing preference.
    /// Returns the first route with full geometry, distance, duration and steps.
    async fn directions(
        &self,
        profile: &str,
        preference: RoutePreference,
        start: Coordinates,
        end: Coordinates,
    ) -> Result<DirectionsResponse> {
        let body = DirectionsRequestBody {
            coordinates: [start.to_lng_lat(), end.to_lng_lat()],
            preference,
        };

        tracing::debug!(
            profile = %profile,
            preference = %preference,
            "Directions request: profile {}, preference {}",
            profile, preference
        );

        let mut request = self.client.post(self.endpoint(profile)).json(&body);

        match self.auth_mode {
            AuthMode::RawHeader => {
                request = request.header(reqwest::header::AUTHORIZATION, &self.api_key);
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.api_key);
            }
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                preference = %preference,
                "Directions API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::DirectionsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let collection: GeoJsonDirectionsResponse = response.json().await?;
        let directions = collection.into_first_route()?;

        tracing::debug!(
            preference = %preference,
            distance_km = %format!("{:.2}", directions.distance_meters / 1000.0),
            duration_min = %format!("{:.0}", directions.duration_seconds / 60.0),
            path_points = directions.geometry.len(),
            "Directions response ({}): {:.2}km, {:.0}min, {} path points",
            preference,
            directions.distance_meters / 1000.0,
            directions.duration_seconds / 60.0,
            directions.geometry.len()
        );

        Ok(directions)
    }
}

#[derive(Debug, Serialize)]
struct DirectionsRequestBody {
    coordinates: [[f64; 2]; 2],
    preference: RoutePreference,
}

// Directions API response types (GeoJSON FeatureCollection)

#[derive(Debug, Deserialize)]
struct GeoJsonDirectionsResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    geometry: LineStringGeometry,
    properties: RouteProperties,
}

#[derive(Debug, Deserialize)]
struct LineStringGeometry {
    #[serde(rename = "type")]
    geometry_type: String,
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
}

#[derive(Debug, Deserialize)]
struct RouteProperties {
    // Omitted by the service for zero-length routes
    #[serde(default)]
    summary: RouteSummary,
    #[serde(default)]
    segments: Vec<RouteSegment>,
}

#[derive(Debug, Default, Deserialize)]
struct RouteSummary {
    #[serde(default)]
    distance: f64, // meters
    #[serde(default)]
    duration: f64, // seconds
}

impl GeoJsonDirectionsResponse {
    fn into_first_route(self) -> Result<DirectionsResponse> {
        let feature = self
            .features
            .into_iter()
            .next()
            .ok_or_else(|| AppError::DirectionsApi("No routes found".to_string()))?;

        if feature.geometry.geometry_type != "LineString" {
            return Err(AppError::DirectionsApi(format!(
                "Unexpected geometry type: {}",
                feature.geometry.geometry_type
            )));
        }
        if feature.geometry.coordinates.is_empty() {
            return Err(AppError::DirectionsApi("Route geometry is empty".to_string()));
        }

        Ok(DirectionsResponse {
            distance_meters: feature.properties.summary.distance,
            duration_seconds: feature.properties.summary.duration,
            geometry: feature.geometry.coordinates,
            segments: feature.properties.segments,
        })
    }
}

// Our simplified response type

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DirectionsResponse {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// GeoJSON coordinates as [lng, lat] pairs
    pub geometry: Vec<[f64; 2]>,
    pub segments: Vec<RouteSegment>,
}

impl DirectionsResponse {
    /// Parse a raw directions response body and keep its first route
    pub fn from_geojson(body: &str) -> Result<Self> {
        let collection: GeoJsonDirectionsResponse = serde_json::from_str(body)
            .map_err(|e| AppError::DirectionsApi(format!("Failed to parse response: {}", e)))?;
        collection.into_first_route()
    }
}
