use crate::constants::{BIKE_SPEED_KMH, CAR_SPEED_KMH, MOTORBIKE_SPEED_KMH, WALKING_SPEED_KMH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Bike,
    Motorbike,
    #[default]
    Car,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Walking,
        TravelMode::Bike,
        TravelMode::Motorbike,
        TravelMode::Car,
    ];

    /// Routing profile requested from the directions service.
    ///
    /// The service has no motorbike profile, so motorbike routes are
    /// computed on the car network.
    pub fn directions_profile(&self) -> &'static str {
        match self {
            TravelMode::Walking => "foot-walking",
            TravelMode::Bike => "cycling-regular",
            TravelMode::Motorbike | TravelMode::Car => "driving-car",
        }
    }

    /// Average speed in km/h used for the mode comparison panel
    pub fn average_speed_kmh(&self) -> f64 {
        match self {
            TravelMode::Walking => WALKING_SPEED_KMH,
            TravelMode::Bike => BIKE_SPEED_KMH,
            TravelMode::Motorbike => MOTORBIKE_SPEED_KMH,
            TravelMode::Car => CAR_SPEED_KMH,
        }
    }

    /// Average speed in meters per second
    pub fn average_speed_mps(&self) -> f64 {
        self.average_speed_kmh() / 3.6
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Walking => write!(f, "walking"),
            TravelMode::Bike => write!(f, "bike"),
            TravelMode::Motorbike => write!(f, "motorbike"),
            TravelMode::Car => write!(f, "car"),
        }
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" | "foot" => Ok(TravelMode::Walking),
            "bike" | "bicycle" | "cycling" => Ok(TravelMode::Bike),
            "motorbike" | "motorcycle" | "scooter" => Ok(TravelMode::Motorbike),
            "car" | "driving" => Ok(TravelMode::Car),
            _ => Err(format!("Invalid travel mode: '{}'", s)),
        }
    }
}

/// Routing preference sent with each directions request. One request is
/// issued per preference to obtain diverse candidates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoutePreference {
    Fastest,
    Shortest,
    Recommended,
}

impl RoutePreference {
    /// Order in which candidates are requested and returned
    pub const ALL: [RoutePreference; 3] = [
        RoutePreference::Fastest,
        RoutePreference::Shortest,
        RoutePreference::Recommended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePreference::Fastest => "fastest",
            RoutePreference::Shortest => "shortest",
            RoutePreference::Recommended => "recommended",
        }
    }
}

impl fmt::Display for RoutePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
