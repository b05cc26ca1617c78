//! Per-mode travel time estimates for the comparison panel.
//!
//! The estimate divides the selected route's distance by each mode's fixed
//! average speed. It is independent of the duration the directions service
//! returns for the active mode and never triggers a fetch.

use crate::models::TravelMode;
use std::collections::BTreeMap;

/// Formatted duration per travel mode, ordered walking, bike, motorbike, car
pub type ModeDurations = BTreeMap<TravelMode, String>;

/// Seconds needed to cover `distance_meters` at the mode's average speed
pub fn estimate_seconds(distance_meters: f64, mode: TravelMode) -> f64 {
    distance_meters / mode.average_speed_mps()
}

/// Estimate and format the travel time for every mode
pub fn estimate_all_modes(distance_meters: f64) -> ModeDurations {
    TravelMode::ALL
        .iter()
        .map(|mode| (*mode, format_duration(estimate_seconds(distance_meters, *mode))))
        .collect()
}

/// Format a duration rounded to the nearest minute.
///
/// Under a minute renders as `<1p`, under an hour as `{n}p`, otherwise
/// `{h} giờ` with a `{m}p` suffix when minutes remain.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round();
    if !(minutes >= 1.0) {
        return "<1p".to_string();
    }

    let minutes = minutes as u64;
    if minutes < 60 {
        return format!("{}p", minutes);
    }

    let hrs = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("{} giờ", hrs)
    } else {
        format!("{} giờ {}p", hrs, mins)
    }
}
