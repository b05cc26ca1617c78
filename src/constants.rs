//! Stable application-wide constants.
//!
//! Values here are service endpoints, per-mode speed coefficients, overlay
//! styling and user-facing fallback labels. Deployment-specific settings
//! (API keys, base URL overrides, timeouts) live in
//! [`Config`](crate::config::Config) instead.

// --- External services ---

/// Default directions endpoint. The routing profile and `/geojson` are appended.
pub const DEFAULT_DIRECTIONS_BASE_URL: &str = "https://api.openrouteservice.org/v2/directions";
/// Default forward/reverse geocoding endpoint.
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Default per-request HTTP timeout. Overridden by `HTTP_TIMEOUT_SECS`.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
/// Upper bound accepted for `HTTP_TIMEOUT_SECS`.
pub const MAX_HTTP_TIMEOUT_SECS: u64 = 120;
/// Identifies this client to the geocoder, whose usage policy requires one.
pub const USER_AGENT: &str = concat!("routepilot/", env!("CARGO_PKG_VERSION"));

// --- Average speeds (km/h) used for the four-mode comparison panel ---

pub const WALKING_SPEED_KMH: f64 = 5.0;
pub const BIKE_SPEED_KMH: f64 = 18.0;
pub const MOTORBIKE_SPEED_KMH: f64 = 40.0;
pub const CAR_SPEED_KMH: f64 = 65.0;

// --- Route overlays ---

/// Route line colors, picked by candidate index modulo the palette length.
pub const ROUTE_COLORS: [&str; 3] = ["#4285F4", "#34A853", "#FBBC05"];
/// Border lines are drawn in black underneath every route line.
pub const ROUTE_BORDER_COLOR: &str = "#000";

pub const SELECTED_LINE_WEIGHT: u8 = 6;
pub const SELECTED_LINE_OPACITY: f32 = 1.0;
pub const UNSELECTED_LINE_WEIGHT: u8 = 3;
pub const UNSELECTED_LINE_OPACITY: f32 = 0.4;

pub const SELECTED_BORDER_WEIGHT: u8 = 8;
pub const SELECTED_BORDER_OPACITY: f32 = 0.5;
pub const UNSELECTED_BORDER_WEIGHT: u8 = 6;
pub const UNSELECTED_BORDER_OPACITY: f32 = 0.3;

// --- User-facing labels ---

pub const START_ADDRESS_PLACEHOLDER: &str = "Vị trí bắt đầu";
pub const END_ADDRESS_PLACEHOLDER: &str = "Điểm đến";
pub const CURRENT_LOCATION_LABEL: &str = "Vị trí hiện tại";
pub const RAW_COORDINATES_LABEL: &str = "Tọa độ cụ thể";
pub const UNKNOWN_LOCATION_LABEL: &str = "Không rõ vị trí";
pub const UNKNOWN_PLACE_NAME: &str = "Không rõ";

pub const MSG_INVALID_COORDINATES: &str = "Tọa độ không hợp lệ";
pub const MSG_NO_ROUTE_FOUND: &str = "Không tìm được đường đi";
pub const MSG_ROUTE_FETCH_FAILED: &str = "Không thể lấy tuyến đường. Vui lòng thử lại.";
pub const MSG_PLACE_NOT_FOUND: &str = "Không tìm thấy địa điểm";
