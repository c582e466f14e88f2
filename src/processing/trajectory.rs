//! Grouping of the flat observation stream into per-device trajectories

use crate::core::{LonLat, Observation, ObserverDistances, Sample, TimeRange};
use serde::Serialize;
use std::collections::BTreeMap;

/// Chronologically ordered samples of one device.
///
/// Every per-sample attribute lives in the same [`Sample`], so the position,
/// timestamp, uncertainty, error and observer views are equal length by
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeviceTrack {
    samples: Vec<Sample>,
}

impl DeviceTrack {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn positions(&self) -> Vec<LonLat> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn timestamps(&self) -> Vec<i64> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    pub fn uncertainties(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.uncertainty).collect()
    }

    pub fn errors(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.error).collect()
    }

    pub fn observer_distances(&self) -> Vec<&ObserverDistances> {
        self.samples.iter().map(|s| &s.devices).collect()
    }

    fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }
}

/// Device id to track. Used both for the full dataset and for a
/// time-windowed subset of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trajectories {
    tracks: BTreeMap<String, DeviceTrack>,
}

/// A selection- and window-restricted view. Never holds an empty track.
pub type FilteredSet = Trajectories;

impl Trajectories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash_id: &str) -> Option<&DeviceTrack> {
        self.tracks.get(hash_id)
    }

    pub fn contains(&self, hash_id: &str) -> bool {
        self.tracks.contains_key(hash_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceTrack)> {
        self.tracks.iter().map(|(id, track)| (id.as_str(), track))
    }

    /// Length of the shortest track, `None` when there are no tracks
    pub fn shortest_len(&self) -> Option<usize> {
        self.tracks.values().map(DeviceTrack::len).min()
    }

    pub fn total_samples(&self) -> usize {
        self.tracks.values().map(DeviceTrack::len).sum()
    }

    /// Empty tracks are discarded rather than stored
    pub(crate) fn insert(&mut self, hash_id: String, track: DeviceTrack) {
        if !track.is_empty() {
            self.tracks.insert(hash_id, track);
        }
    }
}

/// Result of one dataset refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryBuild {
    pub trajectories: Trajectories,
    /// `None` when the stream held no observations
    pub time_range: Option<TimeRange>,
}

/// Group observations by device in ascending time order.
///
/// The data source usually delivers newest-first; a stream whose last
/// observation precedes its first is reversed before grouping. Each track is
/// then stably sorted by timestamp, which leaves already ordered input as is.
pub fn build_trajectories(mut observations: Vec<Observation>) -> TrajectoryBuild {
    let newest_first = match (observations.first(), observations.last()) {
        (Some(first), Some(last)) => last.timestamp < first.timestamp,
        _ => false,
    };
    if newest_first {
        observations.reverse();
    }

    let time_range = observations.iter().fold(None, |range: Option<TimeRange>, obs| {
        Some(match range {
            Some(r) => TimeRange {
                min: r.min.min(obs.timestamp),
                max: r.max.max(obs.timestamp),
            },
            None => TimeRange { min: obs.timestamp, max: obs.timestamp },
        })
    });

    let mut grouped: BTreeMap<String, DeviceTrack> = BTreeMap::new();
    for mut obs in observations {
        let hash_id = std::mem::take(&mut obs.hash_id);
        grouped.entry(hash_id).or_default().push(Sample::from(obs));
    }

    let mut trajectories = Trajectories::new();
    for (hash_id, mut track) in grouped {
        track.samples.sort_by_key(|s| s.timestamp);
        trajectories.insert(hash_id, track);
    }

    tracing::debug!(
        devices = trajectories.len(),
        samples = trajectories.total_samples(),
        reversed = newest_first,
        "built trajectories"
    );

    TrajectoryBuild { trajectories, time_range }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_stream() -> Vec<Observation> {
        vec![
            Observation::new(100, "a", 0.0, 0.0),
            Observation::new(200, "a", 1.0, 1.0),
            Observation::new(150, "b", 2.0, 2.0),
        ]
    }

    #[test]
    fn test_build_groups_by_device_in_time_order() {
        let build = build_trajectories(scenario_stream());

        assert_eq!(build.time_range, Some(TimeRange { min: 100, max: 200 }));

        let a = build.trajectories.get("a").unwrap();
        assert_eq!(a.timestamps(), vec![100, 200]);
        assert_eq!(a.positions(), vec![LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)]);

        let b = build.trajectories.get("b").unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b.positions(), vec![LonLat::new(2.0, 2.0)]);
    }

    #[test]
    fn test_newest_first_stream_is_reversed() {
        let stream = vec![
            Observation::new(300, "a", 3.0, 3.0),
            Observation::new(200, "b", 2.0, 2.0),
            Observation::new(100, "a", 1.0, 1.0),
        ];
        let build = build_trajectories(stream);

        assert_eq!(build.time_range, Some(TimeRange { min: 100, max: 300 }));
        assert_eq!(build.trajectories.get("a").unwrap().timestamps(), vec![100, 300]);
    }

    #[test]
    fn test_views_are_equal_length_and_match_counts() {
        let stream = vec![
            Observation::new(1, "a", 0.0, 0.0).with_uncertainty(1.0),
            Observation::new(2, "b", 0.0, 0.0).with_error(0.5),
            Observation::new(3, "a", 0.0, 0.0).with_distance("ff", 2.0),
            Observation::new(4, "a", 0.0, 0.0),
        ];
        let build = build_trajectories(stream.clone());

        for (id, track) in build.trajectories.iter() {
            let expected = stream.iter().filter(|o| o.hash_id == id).count();
            assert_eq!(track.len(), expected);
            assert_eq!(track.positions().len(), expected);
            assert_eq!(track.timestamps().len(), expected);
            assert_eq!(track.uncertainties().len(), expected);
            assert_eq!(track.errors().len(), expected);
            assert_eq!(track.observer_distances().len(), expected);
        }

        let a = build.trajectories.get("a").unwrap();
        assert_eq!(a.uncertainties(), vec![1.0, 0.0, 0.0]);
        assert_eq!(a.observer_distances()[1].get("ff"), Some(&2.0));
        assert!(a.observer_distances()[0].is_empty());
    }

    #[test]
    fn test_unordered_input_still_sorted_per_device() {
        let stream = vec![
            Observation::new(10, "a", 0.0, 0.0),
            Observation::new(30, "a", 0.0, 0.0),
            Observation::new(20, "a", 0.0, 0.0),
            Observation::new(40, "a", 0.0, 0.0),
        ];
        let build = build_trajectories(stream);
        assert_eq!(build.trajectories.get("a").unwrap().timestamps(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_empty_stream_has_no_range() {
        let build = build_trajectories(Vec::new());
        assert!(build.trajectories.is_empty());
        assert_eq!(build.time_range, None);
        assert_eq!(build.trajectories.shortest_len(), None);
    }
}
