//! Route selection and presentation.
//!
//! [`Navigator`] owns the candidate routes for the current start, end and
//! travel mode, tracks which one is selected, and keeps the map overlays and
//! the summary panel consistent with that state. Fetches run outside the
//! navigator: starting one returns a [`PendingFetch`] the host awaits, and
//! its [`FetchOutcome`] is handed back through [`Navigator::apply`]. Every
//! fetch carries a generation ticket, so an outcome from a superseded
//! request is discarded no matter when it arrives.

pub mod host;
pub mod info_panel;
pub mod overlay;

use crate::constants::{END_ADDRESS_PLACEHOLDER, START_ADDRESS_PLACEHOLDER};
use crate::error::{AppError, Result};
use crate::models::duration::{estimate_all_modes, ModeDurations};
use crate::models::{CandidateRoute, Location, RecommendedPlace, TravelMode};
use crate::services::route_provider::RouteProvider;
use futures::future::{BoxFuture, FutureExt};

use host::NavigationHost;
use info_panel::InfoPanel;
use overlay::{LayerKind, OverlayLayer};

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationState {
    /// Start or end missing, nothing drawn
    Idle,
    /// A fetch is in flight
    Loading,
    /// Candidates drawn, one selected
    Active,
    /// The last fetch failed; holds the user-facing message
    Error(String),
}

/// Candidates for the current request and the selected one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSelection {
    candidates: Vec<CandidateRoute>,
    selected_index: usize,
    per_mode_durations: ModeDurations,
}

impl RouteSelection {
    /// Select the first candidate
    pub fn new(candidates: Vec<CandidateRoute>) -> Self {
        let mut selection = RouteSelection {
            candidates,
            selected_index: 0,
            per_mode_durations: ModeDurations::new(),
        };
        selection.recompute_durations();
        selection
    }

    pub fn candidates(&self) -> &[CandidateRoute] {
        &self.candidates
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&CandidateRoute> {
        self.candidates.get(self.selected_index)
    }

    pub fn per_mode_durations(&self) -> &ModeDurations {
        &self.per_mode_durations
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Select candidate `index`; out-of-range indices leave the selection as is
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.candidates.len() {
            return Err(AppError::InvalidInput(format!(
                "Route index {} out of range ({} candidates)",
                index,
                self.candidates.len()
            )));
        }
        self.selected_index = index;
        self.recompute_durations();
        Ok(())
    }

    fn recompute_durations(&mut self) {
        self.per_mode_durations = self
            .selected()
            .map(|route| estimate_all_modes(route.distance_meters))
            .unwrap_or_default();
    }
}

/// Identifies one fetch; only the latest ticket's outcome is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A fetch started by the navigator, to be awaited by the host
pub struct PendingFetch {
    ticket: FetchTicket,
    mode: TravelMode,
    future: BoxFuture<'static, Result<Vec<CandidateRoute>>>,
}

impl PendingFetch {
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub async fn run(self) -> FetchOutcome {
        FetchOutcome {
            ticket: self.ticket,
            result: self.future.await,
        }
    }
}

impl std::fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFetch")
            .field("ticket", &self.ticket)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<CandidateRoute>>,
}

pub struct Navigator<H: NavigationHost> {
    provider: RouteProvider,
    host: H,
    start: Option<Location>,
    end: Option<Location>,
    mode: TravelMode,
    state: NavigationState,
    selection: RouteSelection,
    generation: u64,
    routes: OverlayLayer,
    endpoints: OverlayLayer,
    recommendations: OverlayLayer,
}

impl<H: NavigationHost> Navigator<H> {
    pub fn new(provider: RouteProvider, host: H, mode: TravelMode) -> Self {
        Navigator {
            provider,
            host,
            start: None,
            end: None,
            mode,
            state: NavigationState::Idle,
            selection: RouteSelection::default(),
            generation: 0,
            routes: OverlayLayer::new(LayerKind::Routes),
            endpoints: OverlayLayer::new(LayerKind::Endpoints),
            recommendations: OverlayLayer::new(LayerKind::Recommendations),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn selection(&self) -> &RouteSelection {
        &self.selection
    }

    pub fn start(&self) -> Option<&Location> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Location> {
        self.end.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn layer(&self, kind: LayerKind) -> &OverlayLayer {
        match kind {
            LayerKind::Routes => &self.routes,
            LayerKind::Endpoints => &self.endpoints,
            LayerKind::Recommendations => &self.recommendations,
        }
    }

    /// Summary panel for the current selection, when a route is active
    pub fn info_panel(&self) -> Option<InfoPanel> {
        let (start, end) = (self.start.as_ref()?, self.end.as_ref()?);
        let route = self.selection.selected()?;
        Some(InfoPanel::build(
            start,
            end,
            route,
            self.selection.selected_index(),
            self.mode,
            self.selection.per_mode_durations(),
        ))
    }

    /// Replace both endpoints. With both present a new fetch starts;
    /// otherwise the navigator returns to Idle.
    pub fn set_endpoints(
        &mut self,
        start: Option<Location>,
        end: Option<Location>,
    ) -> Option<PendingFetch> {
        self.start = start;
        self.end = end;
        self.refresh()
    }

    pub fn set_start(&mut self, start: Option<Location>) -> Option<PendingFetch> {
        self.start = start;
        self.refresh()
    }

    pub fn set_end(&mut self, end: Option<Location>) -> Option<PendingFetch> {
        self.end = end;
        self.refresh()
    }

    /// Switch travel mode. The routing profile changes the geometry itself,
    /// so a new fetch starts whenever both endpoints are set.
    pub fn change_mode(&mut self, mode: TravelMode) -> Option<PendingFetch> {
        if mode == self.mode {
            return None;
        }
        tracing::info!(from = %self.mode, to = %mode, "Travel mode changed");
        self.mode = mode;

        if self.start.is_some() && self.end.is_some() {
            self.refresh()
        } else {
            None
        }
    }

    /// Highlight another candidate without refetching
    pub fn select_candidate(&mut self, index: usize) -> Result<()> {
        if self.state != NavigationState::Active {
            return Err(AppError::InvalidInput(
                "No active route to select from".to_string(),
            ));
        }
        if index == self.selection.selected_index() {
            return Ok(());
        }
        self.selection.select(index)?;

        tracing::debug!(index = index, "Selected candidate {}", index);
        self.render_routes();
        self.emit_selection();
        Ok(())
    }

    /// Drop the route and its markers. Recommendation markers stay.
    pub fn close(&mut self) {
        tracing::info!("Route closed");
        self.start = None;
        self.end = None;
        self.reset(NavigationState::Idle);
        self.host.on_closed();
    }

    /// Replace the recommendation markers; route state is untouched.
    ///
    /// An empty list clears the layer. Hosts that want to keep the current
    /// markers while the assistant has nothing new should not call this.
    pub fn set_recommended_places(&mut self, places: &[RecommendedPlace]) {
        let delta = self
            .recommendations
            .reconcile(overlay::recommendation_overlays(places));
        if !delta.is_empty() {
            self.host.on_overlays(LayerKind::Recommendations, &delta);
        }
    }

    /// Apply a finished fetch. Returns `false` when the outcome belongs to a
    /// superseded request and was discarded.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.ticket.generation != self.generation
            || self.state != NavigationState::Loading
        {
            tracing::debug!(
                stale = outcome.ticket.generation,
                current = self.generation,
                "Discarding outcome of superseded fetch"
            );
            return false;
        }

        match outcome.result {
            Ok(candidates) if !candidates.is_empty() => self.enter_active(candidates),
            Ok(_) => self.enter_error(AppError::NoRouteFound(
                "Provider returned no candidates".to_string(),
            )),
            Err(e) => self.enter_error(e),
        }
        true
    }

    /// Set both endpoints and wait for the resulting fetch
    pub async fn navigate(&mut self, start: Location, end: Location) -> &NavigationState {
        if let Some(pending) = self.set_endpoints(Some(start), Some(end)) {
            let outcome = pending.run().await;
            self.apply(outcome);
        }
        &self.state
    }

    /// Change mode and wait for the resulting fetch
    pub async fn switch_mode(&mut self, mode: TravelMode) -> &NavigationState {
        if let Some(pending) = self.change_mode(mode) {
            let outcome = pending.run().await;
            self.apply(outcome);
        }
        &self.state
    }

    fn refresh(&mut self) -> Option<PendingFetch> {
        let (start, end) = match (self.start.clone(), self.end.clone()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                if self.state != NavigationState::Idle {
                    tracing::info!("Endpoint cleared, route reset");
                }
                self.reset(NavigationState::Idle);
                return None;
            }
        };

        // Malformed input fails right away without a request
        let (start_coords, end_coords) = match (start.coordinates(), end.coordinates()) {
            (Ok(s), Ok(e)) => (s, e),
            (Err(err), _) | (_, Err(err)) => {
                self.enter_error(err);
                return None;
            }
        };

        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
        };

        // No stale routes while loading
        self.selection = RouteSelection::default();
        self.render_routes();

        let markers = overlay::endpoint_overlays(
            start_coords,
            start.address_or(START_ADDRESS_PLACEHOLDER),
            end_coords,
            end.address_or(END_ADDRESS_PLACEHOLDER),
        );
        let delta = self.endpoints.reconcile(markers);
        if !delta.is_empty() {
            self.host.on_overlays(LayerKind::Endpoints, &delta);
        }

        self.state = NavigationState::Loading;
        self.host.on_loading(true);
        tracing::info!(
            generation = self.generation,
            mode = %self.mode,
            "Loading routes (generation {})",
            self.generation
        );

        let provider = self.provider.clone();
        let mode = self.mode;
        let future = async move { provider.fetch_route(&start, &end, mode).await }.boxed();

        Some(PendingFetch {
            ticket,
            mode,
            future,
        })
    }

    fn enter_active(&mut self, candidates: Vec<CandidateRoute>) {
        self.selection = RouteSelection::new(candidates);
        self.state = NavigationState::Active;
        self.host.on_loading(false);
        tracing::info!(
            candidates = self.selection.candidates().len(),
            "Routes ready: {} candidates",
            self.selection.candidates().len()
        );

        self.render_routes();
        self.host
            .on_route_ready(self.selection.candidates(), self.selection.selected_index());
        if let Some(bounds) = self.selection.candidates().first().and_then(|r| r.bounds()) {
            self.host.on_fit_bounds(bounds);
        }
        self.emit_selection();
    }

    fn enter_error(&mut self, error: AppError) {
        tracing::warn!(error = %error, "Route fetch failed: {}", error);
        let message = error.user_message().to_string();
        self.reset(NavigationState::Error(message.clone()));
        self.host.on_error(&message);
    }

    /// Clear route state and this navigator's own layers, invalidating any
    /// fetch in flight
    fn reset(&mut self, state: NavigationState) {
        let was_loading = self.state == NavigationState::Loading;
        self.generation += 1;
        self.selection = RouteSelection::default();
        self.render_routes();

        let delta = self.endpoints.clear();
        if !delta.is_empty() {
            self.host.on_overlays(LayerKind::Endpoints, &delta);
        }

        self.state = state;
        if was_loading {
            self.host.on_loading(false);
        }
    }

    fn render_routes(&mut self) {
        let desired =
            overlay::route_overlays(self.selection.candidates(), self.selection.selected_index());
        let delta = self.routes.reconcile(desired);
        if !delta.is_empty() {
            self.host.on_overlays(LayerKind::Routes, &delta);
        }
    }

    fn emit_selection(&mut self) {
        if let Some(panel) = self.info_panel() {
            self.host
                .on_selection_changed(self.selection.selected_index(), &panel);
        }
    }
}
