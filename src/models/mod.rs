pub mod coordinates;
pub mod duration;
pub mod location;
pub mod mode;
pub mod recommendation;
pub mod route;

pub use coordinates::Coordinates;
pub use location::Location;
pub use mode::{RoutePreference, TravelMode};
pub use recommendation::RecommendedPlace;
pub use route::{CandidateRoute, RouteBounds, RouteSegment, RouteStep};
