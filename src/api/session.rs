//! Event-driven explorer state.
//!
//! Every event consumes the current state and returns the next one, so a
//! dataset refresh swaps trajectories, the filtered set and the playback
//! index in a single step. The color registry is carried from state to
//! state and only cleared when the dataset becomes empty.

use crate::algorithms::{latest_points, render_paths, AnchorMap, GeometrySynthesizer};
use crate::api::types::{RenderFrame, TimeTick};
use crate::core::{Observation, TimeRange, TimeWindow};
use crate::processing::{build_trajectories, filter_by_time, select_devices, FilteredSet, Trajectories};
use crate::utils::{format_time_label, slider_ticks, ColorRegistry, PanelOptions};
use std::collections::HashSet;

/// Triggers coming from the surrounding UI
#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerEvent {
    /// New dataset, replacing the previous one wholesale
    Refresh(Vec<Observation>),
    /// New device selection
    Select(Vec<String>),
    /// Slider moved to a new pivot timestamp
    SetPivot(i64),
    /// Window half-width option changed
    SetBound(u64),
    StepForward,
    StepBack,
}

#[derive(Debug, Clone)]
pub struct ExplorerState {
    trajectories: Trajectories,
    time_range: Option<TimeRange>,
    selection: Vec<String>,
    pivot: i64,
    bound: u64,
    filtered: FilteredSet,
    playback_index: usize,
    colors: ColorRegistry,
}

impl ExplorerState {
    pub fn new(bound: u64, colors: ColorRegistry) -> Self {
        Self {
            trajectories: Trajectories::new(),
            time_range: None,
            selection: Vec::new(),
            pivot: 0,
            bound,
            filtered: FilteredSet::new(),
            playback_index: 0,
            colors,
        }
    }

    pub fn from_options(options: &PanelOptions) -> Self {
        Self::new(options.time_bound, ColorRegistry::new())
    }

    pub fn apply(self, event: ExplorerEvent) -> Self {
        match event {
            ExplorerEvent::Refresh(observations) => self.refresh(observations),
            ExplorerEvent::Select(selection) => self.select(selection),
            ExplorerEvent::SetPivot(pivot) => Self { pivot, ..self }.refilter(),
            ExplorerEvent::SetBound(bound) => Self { bound, ..self }.refilter(),
            ExplorerEvent::StepForward => {
                let next = (self.playback_index + 1).min(self.max_playback_index());
                Self { playback_index: next, ..self }
            }
            ExplorerEvent::StepBack => {
                let prev = self.playback_index.saturating_sub(1);
                Self { playback_index: prev, ..self }
            }
        }
    }

    fn refresh(mut self, observations: Vec<Observation>) -> Self {
        let build = build_trajectories(observations);

        let Some(range) = build.time_range else {
            tracing::info!("dataset cleared");
            self.colors.clear();
            return Self::new(self.bound, self.colors);
        };

        tracing::info!(
            devices = build.trajectories.len(),
            start = range.min,
            end = range.max,
            "dataset refreshed"
        );
        Self {
            trajectories: build.trajectories,
            time_range: Some(range),
            pivot: range.min,
            ..self
        }
        .refilter()
    }

    /// New device set: duplicates dropped (first occurrence kept), filtered
    /// set recomputed and playback rewound
    fn select(self, selection: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let selection: Vec<String> = selection.into_iter().filter(|id| seen.insert(id.clone())).collect();
        Self { selection, ..self }.refilter()
    }

    /// Window or selection changed: recompute the filtered set and rewind playback
    fn refilter(self) -> Self {
        let filtered = filter_by_time(&self.trajectories, &self.selection, self.window());
        Self {
            filtered,
            playback_index: 0,
            ..self
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.pivot, self.bound)
    }

    /// Highest index playback may step to: two below the shortest filtered
    /// track, so every selected device still has a sample there and one
    /// after it.
    pub fn max_playback_index(&self) -> usize {
        self.filtered.shortest_len().map_or(0, |len| len.saturating_sub(2))
    }

    pub fn trajectories(&self) -> &Trajectories {
        &self.trajectories
    }

    pub fn filtered(&self) -> &FilteredSet {
        &self.filtered
    }

    pub fn time_range(&self) -> Option<TimeRange> {
        self.time_range
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn pivot(&self) -> i64 {
        self.pivot
    }

    pub fn playback_index(&self) -> usize {
        self.playback_index
    }

    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    /// Produce the layers for the current state. Only the color registry
    /// changes, as devices seen for the first time get their colors.
    pub fn render(
        &mut self,
        anchors: &AnchorMap,
        synthesizer: &GeometrySynthesizer,
        options: &PanelOptions,
    ) -> RenderFrame {
        let paths = render_paths(&self.filtered, &mut self.colors);
        let history = if options.show_last_line {
            render_paths(&select_devices(&self.trajectories, &self.selection), &mut self.colors)
        } else {
            Vec::new()
        };
        let latest = if options.show_last_point {
            latest_points(&self.trajectories, &self.selection, &mut self.colors)
        } else {
            Vec::new()
        };
        let geometry = synthesizer.synthesize(&self.filtered, self.playback_index, anchors, &mut self.colors);

        let tz = options.tz();
        let ticks = self
            .time_range
            .map(|range| slider_ticks(range, tz))
            .unwrap_or_default()
            .into_iter()
            .map(|(value, label)| TimeTick { value, label })
            .collect();

        RenderFrame {
            devices: self.trajectories.device_ids().map(str::to_string).collect(),
            time_range: self.time_range,
            ticks,
            pivot: self.pivot,
            pivot_label: format_time_label(self.pivot, tz),
            playback_index: self.playback_index,
            paths,
            history,
            latest_points: latest,
            geometry,
        }
    }
}
