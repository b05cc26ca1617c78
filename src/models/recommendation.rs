use crate::models::Coordinates;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A place suggested by the recommendation assistant, shown as its own
/// marker layer next to the route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendedPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub lng: Option<f64>,
}

// Assistant payloads carry coordinates either as JSON numbers or as strings
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl RecommendedPlace {
    /// Marker position, or `None` when the place has no usable coordinates
    pub fn coordinates(&self) -> Option<Coordinates> {
        let (lat, lng) = (self.lat?, self.lng?);
        Coordinates::new(lat, lng).ok()
    }
}
