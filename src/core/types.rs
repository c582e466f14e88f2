//! Core data types for trajectory exploration

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Geographic coordinate, passed through unprojected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn to_vector2(&self) -> Vector2<f64> {
        Vector2::new(self.lon, self.lat)
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(value: LonLat) -> Self {
        [value.lon, value.lat]
    }
}

/// Observer-anchor id to estimated distance
pub type ObserverDistances = BTreeMap<String, f64>;

/// A single location fix as received from the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Epoch seconds
    pub timestamp: i64,
    pub hash_id: String,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub uncertainty: f64,
    #[serde(default)]
    pub error: f64,
    #[serde(default)]
    pub devices: ObserverDistances,
}

impl Observation {
    pub fn new(timestamp: i64, hash_id: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            timestamp,
            hash_id: hash_id.into(),
            longitude,
            latitude,
            uncertainty: 0.0,
            error: 0.0,
            devices: ObserverDistances::new(),
        }
    }

    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = uncertainty;
        self
    }

    pub fn with_error(mut self, error: f64) -> Self {
        self.error = error;
        self
    }

    pub fn with_distance(mut self, anchor_id: impl Into<String>, distance: f64) -> Self {
        self.devices.insert(anchor_id.into(), distance);
        self
    }

    pub fn position(&self) -> LonLat {
        LonLat::new(self.longitude, self.latitude)
    }
}

/// One trajectory sample. Position, uncertainty, error and observer
/// distances always travel together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: i64,
    pub position: LonLat,
    pub uncertainty: f64,
    pub error: f64,
    pub devices: ObserverDistances,
}

impl From<Observation> for Sample {
    fn from(obs: Observation) -> Self {
        Self {
            timestamp: obs.timestamp,
            position: LonLat::new(obs.longitude, obs.latitude),
            uncertainty: obs.uncertainty,
            error: obs.error,
            devices: obs.devices,
        }
    }
}

/// Inclusive `[min, max]` over all ingested timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: i64,
    pub max: i64,
}

/// Window of `bound` seconds either side of `pivot`, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub pivot: i64,
    pub bound: u64,
}

impl TimeWindow {
    pub fn new(pivot: i64, bound: u64) -> Self {
        Self { pivot, bound }
    }

    pub fn start(&self) -> i64 {
        self.pivot.saturating_sub_unsigned(self.bound)
    }

    pub fn end(&self) -> i64 {
        self.pivot.saturating_add_unsigned(self.bound)
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start() <= timestamp && timestamp <= self.end()
    }
}
