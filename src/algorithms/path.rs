//! Trajectory path descriptors for the map layer

use crate::core::{LonLat, ARROW_POINTS, ARROW_RADIUS_PX, PATH_STROKE_WIDTH_PX, POINT_MARKER_RADIUS_PX};
use crate::processing::{DeviceTrack, Trajectories};
use crate::utils::ColorRegistry;
use serde::{Deserialize, Serialize};

/// Direction marker placed at the end of a path segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    pub at: LonLat,
    /// Segment heading in radians, counter-clockwise from east
    pub heading_rad: f64,
    pub radius_px: f64,
    pub points: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathGeometry {
    Point {
        at: LonLat,
        radius_px: f64,
    },
    LineString {
        coordinates: Vec<LonLat>,
        stroke_width_px: f64,
        arrows: Vec<ArrowHead>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFeature {
    pub hash_id: String,
    pub color: String,
    pub geometry: PathGeometry,
}

/// Heading of the segment `from -> to` in lon/lat space
fn segment_heading(from: LonLat, to: LonLat) -> f64 {
    let delta = to.to_vector2() - from.to_vector2();
    delta.y.atan2(delta.x)
}

fn track_geometry(track: &DeviceTrack) -> Option<PathGeometry> {
    let coordinates = track.positions();
    match coordinates.len() {
        0 => None,
        1 => Some(PathGeometry::Point {
            at: coordinates[0],
            radius_px: POINT_MARKER_RADIUS_PX,
        }),
        _ => {
            let arrows = coordinates
                .windows(2)
                .map(|segment| ArrowHead {
                    at: segment[1],
                    heading_rad: segment_heading(segment[0], segment[1]),
                    radius_px: ARROW_RADIUS_PX,
                    points: ARROW_POINTS,
                })
                .collect();
            Some(PathGeometry::LineString {
                coordinates,
                stroke_width_px: PATH_STROKE_WIDTH_PX,
                arrows,
            })
        }
    }
}

/// One path per device: a point marker for a single sample, otherwise a
/// chronological polyline with an arrow at the end of every segment.
pub fn render_paths(tracks: &Trajectories, colors: &mut ColorRegistry) -> Vec<PathFeature> {
    tracks
        .iter()
        .filter_map(|(hash_id, track)| {
            let geometry = track_geometry(track)?;
            Some(PathFeature {
                hash_id: hash_id.to_string(),
                color: colors.get_or_create(hash_id).to_string(),
                geometry,
            })
        })
        .collect()
}

/// Point marker at the most recent sample of each selected device
pub fn latest_points<S: AsRef<str>>(
    trajectories: &Trajectories,
    selection: &[S],
    colors: &mut ColorRegistry,
) -> Vec<PathFeature> {
    let mut points = Vec::new();
    for hash_id in selection {
        let hash_id: &str = hash_id.as_ref();
        let Some(latest) = trajectories.get(hash_id).and_then(DeviceTrack::latest) else {
            continue;
        };
        points.push(PathFeature {
            hash_id: hash_id.to_string(),
            color: colors.get_or_create(hash_id).to_string(),
            geometry: PathGeometry::Point {
                at: latest.position,
                radius_px: POINT_MARKER_RADIUS_PX,
            },
        });
    }
    points
}
