//! Per-device display colors

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Remembers one color per device id for the whole session.
///
/// Colors are created on first reference and never reassigned, so a device
/// keeps its color across window and selection changes and regains it when
/// re-selected.
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    colors: HashMap<String, String>,
    rng: StdRng,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic color sequence, for tests and reproducible output
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self { colors: HashMap::new(), rng }
    }

    /// Existing color for `hash_id`, or a new random `#RRGGBB` one
    pub fn get_or_create(&mut self, hash_id: &str) -> &str {
        if !self.colors.contains_key(hash_id) {
            let color = format!("#{:06X}", self.rng.gen_range(0..=0x00FF_FFFFu32));
            tracing::trace!(hash_id, %color, "assigned device color");
            self.colors.insert(hash_id.to_string(), color);
        }
        &self.colors[hash_id]
    }

    pub fn get(&self, hash_id: &str) -> Option<&str> {
        self.colors.get(hash_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Only used when the whole dataset goes away
    pub fn clear(&mut self) {
        self.colors.clear();
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
