//! Observation ingestion and trajectory processing

pub mod parser;
pub mod trajectory;
pub mod window;

pub use parser::{observations_from_value, parse_observations};
pub use trajectory::{build_trajectories, DeviceTrack, FilteredSet, Trajectories, TrajectoryBuild};
pub use window::{filter_by_time, select_devices};
