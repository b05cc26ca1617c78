use crate::models::{CandidateRoute, RouteBounds};
use crate::navigation::info_panel::InfoPanel;
use crate::navigation::overlay::{LayerKind, OverlayDelta};

/// Callbacks through which the navigator drives the hosting UI.
///
/// All calls happen synchronously from navigator methods, on the caller's
/// thread. The optional hooks default to no-ops.
pub trait NavigationHost {
    /// Candidates are ready to draw; called on every entry into Active
    fn on_route_ready(&mut self, candidates: &[CandidateRoute], selected_index: usize);

    /// The selected route or its summary panel changed
    fn on_selection_changed(&mut self, selected_index: usize, panel: &InfoPanel);

    /// A fetch failed; `message` is meant for the end user
    fn on_error(&mut self, message: &str);

    /// The route was closed explicitly
    fn on_closed(&mut self);

    fn on_loading(&mut self, _loading: bool) {}

    /// Apply overlay changes for one layer
    fn on_overlays(&mut self, _layer: LayerKind, _delta: &OverlayDelta) {}

    /// Suggested viewport when a new set of candidates is shown
    fn on_fit_bounds(&mut self, _bounds: RouteBounds) {}
}
