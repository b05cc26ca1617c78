use crate::error::{AppError, Result};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A start or end point as supplied by the host: a position plus the
/// human-readable address resolved for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, rename = "fullAddress")]
    pub full_address: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, full_address: impl Into<String>) -> Self {
        Location {
            lat,
            lng,
            full_address: full_address.into(),
        }
    }

    /// Check the position is a finite lat/lng pair in range
    pub fn coordinates(&self) -> Result<Coordinates> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "Non-numeric coordinate ({}, {})",
                self.lat, self.lng
            )));
        }
        Coordinates::new(self.lat, self.lng).map_err(AppError::InvalidInput)
    }

    /// The address, or `placeholder` when none was resolved
    pub fn address_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        let trimmed = self.full_address.trim();
        if trimmed.is_empty() {
            placeholder
        } else {
            trimmed
        }
    }
}

impl From<Coordinates> for Location {
    fn from(c: Coordinates) -> Self {
        Location::new(c.lat, c.lng, String::new())
    }
}
