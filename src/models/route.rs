use crate::models::coordinates::path_length_km;
use crate::models::RoutePreference;
use geo::{BoundingRect, Coord, LineString};
use serde::{Deserialize, Serialize};

/// One possible path between start and end, as returned by the directions
/// service for a single routing preference. Built fresh on every fetch and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateRoute {
    pub preference: RoutePreference,
    /// GeoJSON LineString positions as `[lng, lat]` pairs, never empty
    pub geometry: Vec<[f64; 2]>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub segments: Vec<RouteSegment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteSegment {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteStep {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteStep {
    /// Road travelled on this step. The service marks unnamed ways with `-`.
    pub fn road_name(&self) -> Option<&str> {
        [self.road.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty() && *n != "-")
    }
}

/// Geographic bounding box of a route, for fitting the map viewport
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RouteBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl CandidateRoute {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Haversine length of the drawn geometry, which can differ slightly
    /// from the distance reported by the service
    pub fn geometry_length_km(&self) -> f64 {
        path_length_km(&self.geometry)
    }

    /// First named road along the route, in step order
    pub fn first_road(&self) -> Option<&str> {
        self.segments
            .iter()
            .flat_map(|s| s.steps.iter())
            .find_map(RouteStep::road_name)
    }

    /// Display label: `Qua {road}` when a step names its road, otherwise
    /// `Tuyến {n}` with the 1-based position among the candidates
    pub fn label(&self, index: usize) -> String {
        match self.first_road() {
            Some(road) => format!("Qua {}", road),
            None => format!("Tuyến {}", index + 1),
        }
    }

    pub fn bounds(&self) -> Option<RouteBounds> {
        let line: LineString<f64> = self
            .geometry
            .iter()
            .map(|p| Coord { x: p[0], y: p[1] })
            .collect();

        line.bounding_rect().map(|rect| RouteBounds {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        })
    }

    /// Geometry as `[lat, lng]` pairs, the order map overlays draw in
    pub fn lat_lng_path(&self) -> Vec<[f64; 2]> {
        self.geometry.iter().map(|p| [p[1], p[0]]).collect()
    }
}
