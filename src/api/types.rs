//! Output handed to the rendering layer

use crate::algorithms::{FixGeometry, PathFeature};
use crate::core::TimeRange;
use serde::Serialize;

/// Slider tick: timestamp and its display label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeTick {
    pub value: i64,
    pub label: String,
}

/// Everything the map needs to draw one state of the explorer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Device ids available for selection
    pub devices: Vec<String>,
    pub time_range: Option<TimeRange>,
    pub ticks: Vec<TimeTick>,
    pub pivot: i64,
    pub pivot_label: String,
    pub playback_index: usize,
    /// Windowed trajectories of the selected devices
    pub paths: Vec<PathFeature>,
    /// Full, unwindowed trajectories, when the history layer is on
    pub history: Vec<PathFeature>,
    /// Most recent fix of each selected device, when that layer is on
    pub latest_points: Vec<PathFeature>,
    pub geometry: FixGeometry,
}
