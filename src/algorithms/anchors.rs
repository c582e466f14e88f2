//! Static anchor (observer station) positions

use crate::core::LonLat;
use crate::validation::AnchorError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<AnchorFeature>,
}

#[derive(Debug, Deserialize)]
struct AnchorFeature {
    #[serde(default)]
    properties: Option<AnchorProperties>,
    #[serde(default)]
    geometry: Option<PointGeometry>,
}

#[derive(Debug, Deserialize)]
struct AnchorProperties {
    #[serde(default)]
    id: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// Canonical form of an anchor id: colons removed, lowercased.
/// `AA:BB:CC:DD:EE:FF` and `aabbccddeeff` name the same anchor.
pub fn normalize_anchor_id(raw: &str) -> String {
    raw.chars().filter(|c| *c != ':').flat_map(char::to_lowercase).collect()
}

/// Normalized anchor id to position. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorMap {
    anchors: HashMap<String, LonLat>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a GeoJSON-style feature collection where `properties.id` names
    /// the anchor and `geometry.coordinates` is `[lon, lat, ..]`.
    pub fn from_geojson(json: &str) -> Result<Self, AnchorError> {
        let collection: FeatureCollection = serde_json::from_str(json)?;
        Self::from_features(collection.features)
    }

    fn from_features(features: Vec<AnchorFeature>) -> Result<Self, AnchorError> {
        let mut anchors = HashMap::with_capacity(features.len());

        for (index, feature) in features.into_iter().enumerate() {
            let raw_id = match feature.properties.and_then(|p| p.id) {
                Some(Value::String(s)) if !s.is_empty() => s,
                Some(Value::Number(n)) => n.to_string(),
                _ => return Err(AnchorError::MissingId { index }),
            };

            let coordinates = feature.geometry.map(|g| g.coordinates).unwrap_or_default();
            if coordinates.len() < 2 {
                return Err(AnchorError::MissingCoordinates { index, found: coordinates.len() });
            }
            let position = LonLat::new(coordinates[0], coordinates[1]);
            if !position.is_finite() {
                return Err(AnchorError::NonFiniteCoordinates { index });
            }

            let id = normalize_anchor_id(&raw_id);
            if anchors.insert(id.clone(), position).is_some() {
                tracing::debug!(anchor_id = %id, "duplicate anchor id, keeping last position");
            }
        }

        tracing::debug!(anchors = anchors.len(), "parsed anchor positions");
        Ok(Self { anchors })
    }

    /// Exact lookup by an already normalized id
    pub fn get(&self, anchor_id: &str) -> Option<LonLat> {
        self.anchors.get(anchor_id).copied()
    }

    /// Lookup by any formatting of an id
    pub fn lookup(&self, raw_id: &str) -> Option<LonLat> {
        self.get(&normalize_anchor_id(raw_id))
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl FromIterator<(String, LonLat)> for AnchorMap {
    fn from_iter<T: IntoIterator<Item = (String, LonLat)>>(iter: T) -> Self {
        Self {
            anchors: iter
                .into_iter()
                .map(|(id, pos)| (normalize_anchor_id(&id), pos))
                .collect(),
        }
    }
}
