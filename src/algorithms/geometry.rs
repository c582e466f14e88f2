//! Circle geometry behind a single playback instant

use crate::algorithms::anchors::AnchorMap;
use crate::core::{LonLat, ERROR_MARKER_RADIUS_M};
use crate::processing::FilteredSet;
use crate::utils::ColorRegistry;
use serde::{Deserialize, Serialize};

/// What a circle represents on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleKind {
    /// Where the device probably is
    Uncertainty,
    /// Small marker at the fix, labelled with the fix error
    ErrorMarker,
    /// How far the device was from a fixed anchor
    AnchorDistance,
}

/// A renderable circle in lon/lat space with a radius in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleFeature {
    pub kind: CircleKind,
    pub hash_id: String,
    pub center: LonLat,
    pub radius_m: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The two circle groups for one playback index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixGeometry {
    /// Uncertainty circle and error marker for each device
    pub device_circles: Vec<CircleFeature>,
    /// One circle per (device, known anchor) distance reading
    pub anchor_circles: Vec<CircleFeature>,
}

impl FixGeometry {
    pub fn is_empty(&self) -> bool {
        self.device_circles.is_empty() && self.anchor_circles.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct GeometryConfig {
    /// Radius of the error marker circle (meters)
    pub marker_radius_m: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            marker_radius_m: ERROR_MARKER_RADIUS_M,
        }
    }
}

pub struct GeometrySynthesizer {
    config: GeometryConfig,
}

impl GeometrySynthesizer {
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(GeometryConfig::default())
    }

    /// Build the circles for sample `iter` of every filtered device.
    ///
    /// A device whose track is too short for `iter` contributes nothing.
    /// Distance readings for anchors missing from `anchors` are dropped.
    pub fn synthesize(
        &self,
        filtered: &FilteredSet,
        iter: usize,
        anchors: &AnchorMap,
        colors: &mut ColorRegistry,
    ) -> FixGeometry {
        let mut geometry = FixGeometry::default();

        for (hash_id, track) in filtered.iter() {
            let Some(sample) = track.get(iter) else {
                tracing::trace!(hash_id, iter, len = track.len(), "playback index past track end");
                continue;
            };
            let color = colors.get_or_create(hash_id).to_string();

            geometry.device_circles.push(CircleFeature {
                kind: CircleKind::Uncertainty,
                hash_id: hash_id.to_string(),
                center: sample.position,
                radius_m: sample.uncertainty,
                color: color.clone(),
                anchor_id: None,
                label: None,
            });
            geometry.device_circles.push(CircleFeature {
                kind: CircleKind::ErrorMarker,
                hash_id: hash_id.to_string(),
                center: sample.position,
                radius_m: self.config.marker_radius_m,
                color: color.clone(),
                anchor_id: None,
                label: Some(format!("{:.3}", sample.error)),
            });

            for (anchor_id, distance) in &sample.devices {
                let Some(anchor_position) = anchors.get(anchor_id) else {
                    tracing::trace!(hash_id, anchor_id = %anchor_id, "no position for anchor");
                    continue;
                };
                geometry.anchor_circles.push(CircleFeature {
                    kind: CircleKind::AnchorDistance,
                    hash_id: hash_id.to_string(),
                    center: anchor_position,
                    radius_m: *distance,
                    color: color.clone(),
                    anchor_id: Some(anchor_id.clone()),
                    label: Some(format!("{}: {:.3}", anchor_id, distance)),
                });
            }
        }

        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Observation, TimeWindow};
    use crate::processing::{build_trajectories, filter_by_time};

    fn anchors() -> AnchorMap {
        [
            ("AA:01".to_string(), LonLat::new(10.0, 10.0)),
            ("aa:02".to_string(), LonLat::new(20.0, 20.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_scenario_without_known_anchors() {
        let trajectories = build_trajectories(vec![
            Observation::new(100, "a", 0.0, 0.0),
            Observation::new(200, "a", 1.0, 1.0),
            Observation::new(150, "b", 2.0, 2.0).with_distance("ffff", 3.0),
        ])
        .trajectories;
        let filtered = filter_by_time(&trajectories, &["a", "b"], TimeWindow::new(150, 40));

        let mut colors = ColorRegistry::with_seed(1);
        let geometry = GeometrySynthesizer::with_defaults().synthesize(&filtered, 0, &anchors(), &mut colors);

        assert!(geometry.anchor_circles.is_empty());
        assert_eq!(geometry.device_circles.len(), 2);
        assert!(geometry.device_circles.iter().all(|c| c.hash_id == "b"));
        assert!(geometry.device_circles.iter().all(|c| c.center == LonLat::new(2.0, 2.0)));
        assert_eq!(geometry.device_circles[0].kind, CircleKind::Uncertainty);
        assert_eq!(geometry.device_circles[1].kind, CircleKind::ErrorMarker);
        assert_eq!(geometry.device_circles[1].label.as_deref(), Some("0.000"));
    }

    #[test]
    fn test_anchor_circles_and_labels() {
        let trajectories = build_trajectories(vec![
            Observation::new(10, "a", 1.0, 1.0)
                .with_uncertainty(4.5)
                .with_error(0.12345)
                .with_distance("aa01", 7.25)
                .with_distance("aa02", 3.0)
                .with_distance("unknown", 1.0),
        ])
        .trajectories;
        let filtered = filter_by_time(&trajectories, &["a"], TimeWindow::new(10, 0));

        let mut colors = ColorRegistry::with_seed(3);
        let geometry = GeometrySynthesizer::with_defaults().synthesize(&filtered, 0, &anchors(), &mut colors);

        let uncertainty = &geometry.device_circles[0];
        assert_eq!(uncertainty.radius_m, 4.5);
        assert_eq!(geometry.device_circles[1].label.as_deref(), Some("0.123"));
        assert_eq!(geometry.device_circles[1].radius_m, ERROR_MARKER_RADIUS_M);

        assert_eq!(geometry.anchor_circles.len(), 2);
        let first = &geometry.anchor_circles[0];
        assert_eq!(first.anchor_id.as_deref(), Some("aa01"));
        assert_eq!(first.center, LonLat::new(10.0, 10.0));
        assert_eq!(first.radius_m, 7.25);
        assert_eq!(first.label.as_deref(), Some("aa01: 7.250"));
        assert_eq!(first.color, colors.get("a").unwrap());
    }

    #[test]
    fn test_index_past_end_excludes_device() {
        let trajectories = build_trajectories(vec![
            Observation::new(1, "a", 0.0, 0.0).with_distance("aa01", 1.0),
            Observation::new(2, "a", 0.0, 0.0).with_distance("aa01", 2.0),
            Observation::new(1, "b", 5.0, 5.0).with_distance("aa01", 9.0),
        ])
        .trajectories;
        let filtered = filter_by_time(&trajectories, &["a", "b"], TimeWindow::new(1, 5));

        let mut colors = ColorRegistry::with_seed(5);
        let synth = GeometrySynthesizer::with_defaults();
        let geometry = synth.synthesize(&filtered, 1, &anchors(), &mut colors);

        assert_eq!(geometry.device_circles.len(), 2);
        assert!(geometry.device_circles.iter().all(|c| c.hash_id == "a"));
        assert_eq!(geometry.anchor_circles.len(), 1);
        assert_eq!(geometry.anchor_circles[0].radius_m, 2.0);

        assert!(synth.synthesize(&filtered, 2, &anchors(), &mut colors).is_empty());
    }

    #[test]
    fn test_empty_inputs_give_empty_geometry() {
        let mut colors = ColorRegistry::with_seed(0);
        let geometry = GeometrySynthesizer::with_defaults().synthesize(
            &FilteredSet::new(),
            0,
            &AnchorMap::new(),
            &mut colors,
        );
        assert!(geometry.is_empty());
        assert!(colors.is_empty());
    }
}
