//! Declarative map overlays.
//!
//! The desired overlay set is computed as a pure function of the current
//! state, then diffed against what is already on the map so the host only
//! applies the delta. Each [`OverlayLayer`] owns its overlays exclusively:
//! reconciling or clearing one layer never touches another.

use crate::constants::*;
use crate::models::duration::format_duration;
use crate::models::{CandidateRoute, Coordinates, RecommendedPlace};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Route lines and their borders
    Routes,
    /// Start and end markers
    Endpoints,
    /// Places suggested by the recommendation assistant
    Recommendations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OverlayKey {
    RouteBorder(usize),
    RouteLine(usize),
    StartMarker,
    EndMarker,
    Recommendation(usize),
}

/// Stacking pane; borders sit below route lines, markers above both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    Border,
    Route,
    Marker,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f32,
    pub pane: Pane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    Default,
    Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Overlay {
    Polyline {
        /// `[lat, lng]` pairs
        path: Vec<[f64; 2]>,
        style: LineStyle,
        popup: Option<String>,
    },
    Marker {
        position: Coordinates,
        icon: MarkerIcon,
        popup: String,
    },
}

pub type OverlaySet = BTreeMap<OverlayKey, Overlay>;

/// Changes a host must apply to bring one layer to its desired state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayDelta {
    pub added: Vec<(OverlayKey, Overlay)>,
    /// Same geometry, new line style only
    pub restyled: Vec<(OverlayKey, LineStyle)>,
    /// Anything else changed: remove and redraw
    pub replaced: Vec<(OverlayKey, Overlay)>,
    pub removed: Vec<OverlayKey>,
}

impl OverlayDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.restyled.is_empty()
            && self.replaced.is_empty()
            && self.removed.is_empty()
    }
}

/// Compute the delta that turns `current` into `desired`
pub fn diff(current: &OverlaySet, desired: &OverlaySet) -> OverlayDelta {
    let mut delta = OverlayDelta::default();

    for (key, wanted) in desired {
        match current.get(key) {
            None => delta.added.push((*key, wanted.clone())),
            Some(existing) if existing == wanted => {}
            Some(existing) => match (existing, wanted) {
                (
                    Overlay::Polyline {
                        path: old_path,
                        popup: old_popup,
                        ..
                    },
                    Overlay::Polyline { path, popup, style },
                ) if old_path == path && old_popup == popup => {
                    delta.restyled.push((*key, *style));
                }
                _ => delta.replaced.push((*key, wanted.clone())),
            },
        }
    }

    delta.removed = current
        .keys()
        .filter(|key| !desired.contains_key(key))
        .copied()
        .collect();

    delta
}

/// Overlays currently on the map for one layer
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    kind: LayerKind,
    rendered: OverlaySet,
}

impl OverlayLayer {
    pub fn new(kind: LayerKind) -> Self {
        OverlayLayer {
            kind,
            rendered: OverlaySet::new(),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn rendered(&self) -> &OverlaySet {
        &self.rendered
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    pub fn reconcile(&mut self, desired: OverlaySet) -> OverlayDelta {
        let delta = diff(&self.rendered, &desired);
        self.rendered = desired;
        delta
    }

    pub fn clear(&mut self) -> OverlayDelta {
        self.reconcile(OverlaySet::new())
    }
}

fn line_style(index: usize, selected: bool) -> LineStyle {
    let (weight, opacity) = if selected {
        (SELECTED_LINE_WEIGHT, SELECTED_LINE_OPACITY)
    } else {
        (UNSELECTED_LINE_WEIGHT, UNSELECTED_LINE_OPACITY)
    };
    LineStyle {
        color: ROUTE_COLORS[index % ROUTE_COLORS.len()],
        weight,
        opacity,
        pane: Pane::Route,
    }
}

fn border_style(selected: bool) -> LineStyle {
    let (weight, opacity) = if selected {
        (SELECTED_BORDER_WEIGHT, SELECTED_BORDER_OPACITY)
    } else {
        (UNSELECTED_BORDER_WEIGHT, UNSELECTED_BORDER_OPACITY)
    };
    LineStyle {
        color: ROUTE_BORDER_COLOR,
        weight,
        opacity,
        pane: Pane::Border,
    }
}

/// Popup text for a route line: label, drawn length and service duration
pub fn route_popup(route: &CandidateRoute, index: usize) -> String {
    format!(
        "{} · {:.2} km · {}",
        route.label(index),
        route.geometry_length_km(),
        format_duration(route.duration_seconds)
    )
}

/// Every candidate as a bordered line, the selected one emphasized
pub fn route_overlays(candidates: &[CandidateRoute], selected_index: usize) -> OverlaySet {
    let mut set = OverlaySet::new();
    for (index, route) in candidates.iter().enumerate() {
        let selected = index == selected_index;
        let path = route.lat_lng_path();

        set.insert(
            OverlayKey::RouteBorder(index),
            Overlay::Polyline {
                path: path.clone(),
                style: border_style(selected),
                popup: None,
            },
        );
        set.insert(
            OverlayKey::RouteLine(index),
            Overlay::Polyline {
                path,
                style: line_style(index, selected),
                popup: Some(route_popup(route, index)),
            },
        );
    }
    set
}

pub fn endpoint_overlays(
    start: Coordinates,
    start_label: &str,
    end: Coordinates,
    end_label: &str,
) -> OverlaySet {
    let mut set = OverlaySet::new();
    set.insert(
        OverlayKey::StartMarker,
        Overlay::Marker {
            position: start,
            icon: MarkerIcon::Default,
            popup: start_label.to_string(),
        },
    );
    set.insert(
        OverlayKey::EndMarker,
        Overlay::Marker {
            position: end,
            icon: MarkerIcon::Default,
            popup: end_label.to_string(),
        },
    );
    set
}

/// One marker per place with usable coordinates; the rest are skipped
pub fn recommendation_overlays(places: &[RecommendedPlace]) -> OverlaySet {
    places
        .iter()
        .filter_map(|place| place.coordinates().map(|position| (place, position)))
        .enumerate()
        .map(|(index, (place, position))| {
            let name = place
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(UNKNOWN_PLACE_NAME);
            let location = place.location.as_deref().unwrap_or("").trim();
            let popup = if location.is_empty() {
                format!("Gợi ý AI: {}", name)
            } else {
                format!("Gợi ý AI: {}\n{}", name, location)
            };

            (
                OverlayKey::Recommendation(index),
                Overlay::Marker {
                    position,
                    icon: MarkerIcon::Recommendation,
                    popup,
                },
            )
        })
        .collect()
}
