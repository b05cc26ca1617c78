use crate::constants::{END_ADDRESS_PLACEHOLDER, START_ADDRESS_PLACEHOLDER};
use crate::models::duration::{estimate_seconds, format_duration, ModeDurations};
use crate::models::{CandidateRoute, Location, TravelMode};
use serde::Serialize;

/// Summary shown next to the selected route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub start_address: String,
    pub end_address: String,
    pub route_label: String,
    /// Kilometers with one decimal, e.g. `"12.4"`
    pub distance_km: String,
    pub mode: TravelMode,
    /// Estimated time for the active mode
    pub duration: String,
    /// Duration reported by the directions service for the active mode
    pub route_duration: String,
    pub durations: ModeDurations,
}

impl InfoPanel {
    pub fn build(
        start: &Location,
        end: &Location,
        route: &CandidateRoute,
        route_index: usize,
        mode: TravelMode,
        durations: &ModeDurations,
    ) -> Self {
        let duration = durations
            .get(&mode)
            .cloned()
            .unwrap_or_else(|| format_duration(estimate_seconds(route.distance_meters, mode)));

        InfoPanel {
            start_address: start.address_or(START_ADDRESS_PLACEHOLDER).to_string(),
            end_address: end.address_or(END_ADDRESS_PLACEHOLDER).to_string(),
            route_label: route.label(route_index),
            distance_km: format!("{:.1}", route.distance_km()),
            mode,
            duration,
            route_duration: format_duration(route.duration_seconds),
            durations: durations.clone(),
        }
    }
}
