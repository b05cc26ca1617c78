//! Forward and reverse geocoding used by hosts to build [`Location`]s.
//!
//! The navigation engine itself never geocodes; it only needs each start
//! and end point to carry some display address, possibly a fallback label.

use crate::config::Config;
use crate::constants::{
    CURRENT_LOCATION_LABEL, DEFAULT_GEOCODER_BASE_URL, MSG_PLACE_NOT_FOUND, RAW_COORDINATES_LABEL,
    UNKNOWN_LOCATION_LABEL, USER_AGENT,
};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Location};
use reqwest::Client;
use serde::Deserialize;

#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new() -> Self {
        GeocodingClient::with_base_url(DEFAULT_GEOCODER_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());
        GeocodingClient { client, base_url }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(GeocodingClient {
            client,
            base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// First match for a free-text query, if any
    pub async fn search(&self, query: &str) -> Result<Option<SearchHit>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Geocoding(format!(
                "Search HTTP {}",
                response.status()
            )));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Failed to parse search response: {}", e)))?;

        tracing::debug!(query = %query, hits = hits.len(), "Geocoder search: {} hits", hits.len());
        Ok(hits.into_iter().next())
    }

    /// Display address for a position, if the geocoder knows one
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Reverse request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Geocoding(format!(
                "Reverse HTTP {}",
                response.status()
            )));
        }

        let place: ReversePlace = response
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Failed to parse reverse response: {}", e)))?;

        Ok(place.best_label())
    }

    /// Turn a search box query into a [`Location`].
    ///
    /// A `lat,lng` query is used as-is and only reverse-geocoded for its
    /// label; anything else goes through a forward search.
    pub async fn resolve(&self, query: &str) -> Result<Location> {
        let query = query.trim();

        if let Some(parsed) = parse_lat_lng(query) {
            let coords = parsed?;
            let address = self
                .reverse_or_warn(coords.lat, coords.lng)
                .await
                .unwrap_or_else(|| RAW_COORDINATES_LABEL.to_string());
            return Ok(Location::new(coords.lat, coords.lng, address));
        }

        let hit = self
            .search(query)
            .await?
            .ok_or_else(|| AppError::Geocoding(format!("{}: {}", MSG_PLACE_NOT_FOUND, query)))?;
        let coords = hit.coordinates()?;

        let label = match self.reverse_or_warn(coords.lat, coords.lng).await {
            Some(reverse) => reverse,
            None if !hit.display_name.trim().is_empty() => hit.display_name.clone(),
            None => UNKNOWN_LOCATION_LABEL.to_string(),
        };

        Ok(Location::new(
            coords.lat,
            coords.lng,
            format!("{} - {}", query, label),
        ))
    }

    /// Label a device position fix, falling back to a generic label
    pub async fn current_location(&self, lat: f64, lng: f64) -> Location {
        let address = self
            .reverse_or_warn(lat, lng)
            .await
            .unwrap_or_else(|| CURRENT_LOCATION_LABEL.to_string());
        Location::new(lat, lng, address)
    }

    async fn reverse_or_warn(&self, lat: f64, lng: f64) -> Option<String> {
        match self.reverse(lat, lng).await {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(error = %e, "Reverse geocoding failed, using fallback label");
                None
            }
        }
    }
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret `"lat, lng"` input.
///
/// Returns `None` when the query does not look like a coordinate pair, and
/// an error when it does but the numbers are unusable.
pub fn parse_lat_lng(query: &str) -> Option<Result<Coordinates>> {
    let (lat_raw, lng_raw) = query.split_once(',')?;
    let lat_raw = lat_raw.trim();
    let lng_raw = lng_raw.trim();

    // "Hoàn Kiếm, Hà Nội" is a place name, not a coordinate pair
    let lat: f64 = lat_raw.parse().ok()?;

    let parsed = lng_raw
        .parse::<f64>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid longitude: {}", lng_raw)))
        .and_then(|lng| {
            if !lat.is_finite() || !lng.is_finite() {
                return Err(AppError::InvalidInput(format!(
                    "Non-numeric coordinate ({}, {})",
                    lat, lng
                )));
            }
            Coordinates::new(lat, lng).map_err(AppError::InvalidInput)
        });
    Some(parsed)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl SearchHit {
    pub fn coordinates(&self) -> Result<Coordinates> {
        let lat: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| AppError::Geocoding(format!("Invalid latitude in result: {}", self.lat)))?;
        let lng: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| AppError::Geocoding(format!("Invalid longitude in result: {}", self.lon)))?;
        Coordinates::new(lat, lng).map_err(AppError::Geocoding)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReversePlace {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<ReverseAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    suburb: Option<String>,
    city: Option<String>,
    county: Option<String>,
    state: Option<String>,
}

impl ReversePlace {
    /// Full display name, else the most specific administrative area
    fn best_label(self) -> Option<String> {
        let address = self.address.unwrap_or_default();
        [
            self.display_name,
            address.suburb,
            address.city,
            address.county,
            address.state,
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
    }
}
