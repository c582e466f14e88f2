//! Rendering constants and option defaults

/// Radius of the error-labelled marker drawn at each device fix (meters)
pub const ERROR_MARKER_RADIUS_M: f64 = 0.3;

/// Pixel radius of a single-sample path marker
pub const POINT_MARKER_RADIUS_PX: f64 = 5.0;

/// Stroke width of trajectory polylines
pub const PATH_STROKE_WIDTH_PX: f64 = 2.0;

/// Pixel radius of the direction arrow drawn at each segment end
pub const ARROW_RADIUS_PX: f64 = 8.0;

/// Number of vertices of the direction arrow shape
pub const ARROW_POINTS: u8 = 3;

/// Default half-width of the time window (seconds)
pub const DEFAULT_TIME_BOUND_S: u64 = 60;
