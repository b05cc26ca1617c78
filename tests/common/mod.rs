#![allow(dead_code)]

use async_trait::async_trait;
use routepilot::models::{
    CandidateRoute, Coordinates, Location, RouteBounds, RoutePreference, RouteSegment, RouteStep,
};
use routepilot::navigation::host::NavigationHost;
use routepilot::navigation::info_panel::InfoPanel;
use routepilot::navigation::overlay::{LayerKind, OverlayDelta};
use routepilot::services::directions::{DirectionsResponse, DirectionsSource};
use routepilot::{AppError, Result};
use std::sync::Mutex;
use std::time::Duration;

pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok() || std::env::var("ORS_API_KEY").is_err()
}

pub fn hoan_kiem() -> Location {
    Location::new(21.0287, 105.8524, "Hồ Hoàn Kiếm, Hà Nội")
}

pub fn van_mieu() -> Location {
    Location::new(21.0293, 105.8355, "Văn Miếu - Quốc Tử Giám, Hà Nội")
}

pub fn lang_bac() -> Location {
    Location::new(21.0368, 105.8346, "Lăng Chủ tịch Hồ Chí Minh, Hà Nội")
}

/// A three-point route whose middle point is shifted by `bend`, so different
/// bends give different geometries
pub fn directions(bend: f64, distance_meters: f64, road: Option<&str>) -> DirectionsResponse {
    DirectionsResponse {
        distance_meters,
        duration_seconds: distance_meters / 8.0,
        geometry: vec![
            [105.8524, 21.0287],
            [105.8450 + bend, 21.0300 + bend],
            [105.8355, 21.0293],
        ],
        segments: vec![RouteSegment {
            distance: distance_meters,
            duration: distance_meters / 8.0,
            steps: vec![
                RouteStep {
                    name: Some("-".into()),
                    ..Default::default()
                },
                RouteStep {
                    name: road.map(String::from),
                    ..Default::default()
                },
            ],
        }],
    }
}

#[derive(Clone)]
struct Script {
    profile: Option<&'static str>,
    preference: RoutePreference,
    result: Result<DirectionsResponse>,
    delay: Duration,
}

/// In-memory directions source answering from a per-preference script.
/// Unscripted preferences fail with an HTTP 500.
#[derive(Default)]
pub struct ScriptedDirections {
    scripts: Vec<Script>,
    calls: Mutex<Vec<(String, RoutePreference)>>,
}

impl ScriptedDirections {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        mut self,
        profile: Option<&'static str>,
        preference: RoutePreference,
        result: Result<DirectionsResponse>,
        delay: Duration,
    ) -> Self {
        self.scripts.push(Script {
            profile,
            preference,
            result,
            delay,
        });
        self
    }

    pub fn respond(self, preference: RoutePreference, response: DirectionsResponse) -> Self {
        self.push(None, preference, Ok(response), Duration::ZERO)
    }

    pub fn respond_after(
        self,
        preference: RoutePreference,
        response: DirectionsResponse,
        delay: Duration,
    ) -> Self {
        self.push(None, preference, Ok(response), delay)
    }

    pub fn respond_for(
        self,
        profile: &'static str,
        preference: RoutePreference,
        response: DirectionsResponse,
    ) -> Self {
        self.push(Some(profile), preference, Ok(response), Duration::ZERO)
    }

    pub fn respond_for_after(
        self,
        profile: &'static str,
        preference: RoutePreference,
        response: DirectionsResponse,
        delay: Duration,
    ) -> Self {
        self.push(Some(profile), preference, Ok(response), delay)
    }

    pub fn fail(self, preference: RoutePreference, error: AppError) -> Self {
        self.push(None, preference, Err(error), Duration::ZERO)
    }

    /// Every preference answers with the same response
    pub fn respond_all(self, response: DirectionsResponse) -> Self {
        RoutePreference::ALL
            .iter()
            .fold(self, |s, p| s.respond(*p, response.clone()))
    }

    pub fn calls(&self) -> Vec<(String, RoutePreference)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectionsSource for ScriptedDirections {
    async fn directions(
        &self,
        profile: &str,
        preference: RoutePreference,
        _start: Coordinates,
        _end: Coordinates,
    ) -> Result<DirectionsResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((profile.to_string(), preference));

        let script = self
            .scripts
            .iter()
            .find(|s| s.preference == preference && s.profile == Some(profile))
            .or_else(|| {
                self.scripts
                    .iter()
                    .find(|s| s.preference == preference && s.profile.is_none())
            })
            .cloned();

        match script {
            Some(script) => {
                if !script.delay.is_zero() {
                    tokio::time::sleep(script.delay).await;
                }
                script.result
            }
            None => Err(AppError::DirectionsApi("HTTP 500: unscripted".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    RouteReady { count: usize, selected: usize },
    SelectionChanged { index: usize, panel: InfoPanel },
    Error(String),
    Closed,
    Loading(bool),
    Overlays(LayerKind, OverlayDelta),
    FitBounds(RouteBounds),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_panel(&self) -> Option<&InfoPanel> {
        self.events.iter().rev().find_map(|e| match e {
            HostEvent::SelectionChanged { panel, .. } => Some(panel),
            _ => None,
        })
    }

    pub fn route_ready_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::RouteReady { .. }))
            .count()
    }

    pub fn overlay_updates(&self, layer: LayerKind) -> Vec<&OverlayDelta> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Overlays(l, delta) if *l == layer => Some(delta),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl NavigationHost for RecordingHost {
    fn on_route_ready(&mut self, candidates: &[CandidateRoute], selected_index: usize) {
        self.events.push(HostEvent::RouteReady {
            count: candidates.len(),
            selected: selected_index,
        });
    }

    fn on_selection_changed(&mut self, selected_index: usize, panel: &InfoPanel) {
        self.events.push(HostEvent::SelectionChanged {
            index: selected_index,
            panel: panel.clone(),
        });
    }

    fn on_error(&mut self, message: &str) {
        self.events.push(HostEvent::Error(message.to_string()));
    }

    fn on_closed(&mut self) {
        self.events.push(HostEvent::Closed);
    }

    fn on_loading(&mut self, loading: bool) {
        self.events.push(HostEvent::Loading(loading));
    }

    fn on_overlays(&mut self, layer: LayerKind, delta: &OverlayDelta) {
        self.events.push(HostEvent::Overlays(layer, delta.clone()));
    }

    fn on_fit_bounds(&mut self, bounds: RouteBounds) {
        self.events.push(HostEvent::FitBounds(bounds));
    }
}
