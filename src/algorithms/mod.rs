//! Geometry derivation for the map layers

pub mod anchors;
pub mod geometry;
pub mod path;

pub use anchors::{normalize_anchor_id, AnchorMap};
pub use geometry::{CircleFeature, CircleKind, FixGeometry, GeometryConfig, GeometrySynthesizer};
pub use path::{latest_points, render_paths, ArrowHead, PathFeature, PathGeometry};
