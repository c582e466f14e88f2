//! Device Trajectory Explorer
//!
//! Turns a flat stream of per-device location observations into
//! chronological trajectories, time-windowed subsets around a pivot
//! instant, and the uncertainty and anchor-distance circles behind each fix.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{LonLat, Observation, Sample, TimeRange, TimeWindow};
pub use algorithms::{
    latest_points, normalize_anchor_id, render_paths, AnchorMap, CircleFeature, CircleKind,
    FixGeometry, GeometryConfig, GeometrySynthesizer, PathFeature, PathGeometry,
};
pub use processing::{
    build_trajectories, filter_by_time, parse_observations, DeviceTrack, FilteredSet,
    Trajectories, TrajectoryBuild,
};
pub use validation::{AnchorError, IngestError, ObservationFault};
pub use utils::{ColorRegistry, ConfigError, OptionsManager, PanelOptions};
pub use api::{ExplorerEvent, ExplorerState, RenderFrame};
