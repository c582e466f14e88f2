//! Time-window restriction of trajectories around a pivot instant

use crate::core::TimeWindow;
use crate::processing::trajectory::{DeviceTrack, FilteredSet, Trajectories};

/// Keep, for each selected device, the samples inside `window`.
///
/// Selected ids missing from `trajectories` are ignored. Order within a
/// track is preserved, and a device left with no samples is omitted from
/// the result entirely.
pub fn filter_by_time<S: AsRef<str>>(
    trajectories: &Trajectories,
    selection: &[S],
    window: TimeWindow,
) -> FilteredSet {
    let mut filtered = FilteredSet::new();

    for hash_id in selection {
        let hash_id: &str = hash_id.as_ref();
        let Some(track) = trajectories.get(hash_id) else {
            tracing::trace!(hash_id, "selected device not in dataset");
            continue;
        };

        let kept: Vec<_> = track
            .samples()
            .iter()
            .filter(|s| window.contains(s.timestamp))
            .cloned()
            .collect();

        filtered.insert(hash_id.to_string(), DeviceTrack::from_samples(kept));
    }

    tracing::debug!(
        pivot = window.pivot,
        bound = window.bound,
        selected = selection.len(),
        retained = filtered.len(),
        "filtered trajectories by time"
    );

    filtered
}

/// Restrict to the selected devices without any time window
pub fn select_devices<S: AsRef<str>>(trajectories: &Trajectories, selection: &[S]) -> Trajectories {
    let mut selected = Trajectories::new();
    for hash_id in selection {
        let hash_id: &str = hash_id.as_ref();
        if let Some(track) = trajectories.get(hash_id) {
            selected.insert(hash_id.to_string(), track.clone());
        }
    }
    selected
}
