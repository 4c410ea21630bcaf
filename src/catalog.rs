//! Bottle types and spawn weights
//!
//! Loaded from a JSON file shaped like:
//!
//! ```json
//! {
//!   "bottle_types": {
//!     "1": { "name": "Ground", "color": [139, 69, 19], "width": 40, "height": 80,
//!            "min_curve": 0.0, "max_curve": 0.1, "score_gain": 10, "behavior": "ground" }
//!   },
//!   "spawn_weights": { "1": 30 }
//! }
//! ```
//!
//! The simulation only ever sees a sanitized catalog; it never reads the file.

use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::Behavior;

/// Sprite size used when a config gives a non-positive one
const FALLBACK_SIZE: (f32, f32) = (40.0, 80.0);

/// One kind of bottle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTypeConfig {
    pub name: String,
    /// Placeholder fill when no sprite is available
    pub color: [u8; 3],
    /// Unscaled sprite size (pixels at reference resolution)
    pub width: f32,
    pub height: f32,
    /// Curve strength range for curved throws (fraction of screen width)
    pub min_curve: f32,
    pub max_curve: f32,
    /// Base points for dodging this bottle
    pub score_gain: u32,
    #[serde(default)]
    pub behavior: Behavior,
    /// Cosmetic effect tag for the presentation layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_effect: Option<String>,
}

impl ProjectileTypeConfig {
    fn new(
        name: &str,
        color: [u8; 3],
        size: (f32, f32),
        curve: (f32, f32),
        score_gain: u32,
        behavior: Behavior,
        special_effect: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            color,
            width: size.0,
            height: size.1,
            min_curve: curve.0,
            max_curve: curve.1,
            score_gain,
            behavior,
            special_effect: special_effect.map(str::to_string),
        }
    }
}

/// Injected table of bottle types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleCatalog {
    pub bottle_types: BTreeMap<u32, ProjectileTypeConfig>,
    /// Relative spawn weights; negative values are treated as zero
    #[serde(default)]
    pub spawn_weights: BTreeMap<u32, i64>,
}

impl Default for BottleCatalog {
    fn default() -> Self {
        use Behavior::{Air, Ground};

        #[rustfmt::skip]
        let types = [
            ProjectileTypeConfig::new("Ground", [139, 69, 19], (40.0, 80.0), (0.0, 0.10), 10, Ground, None),
            ProjectileTypeConfig::new("Air", [135, 206, 235], (40.0, 80.0), (0.0, 0.10), 15, Air, None),
            ProjectileTypeConfig::new("Boomerang", [255, 165, 0], (50.0, 50.0), (0.15, 0.30), 20, Air, Some("boomerang")),
            ProjectileTypeConfig::new("Shatter", [200, 200, 255], (40.0, 80.0), (0.0, 0.10), 15, Ground, Some("shatter")),
            ProjectileTypeConfig::new("Molotov", [255, 69, 0], (40.0, 90.0), (0.05, 0.15), 25, Ground, Some("fire")),
            ProjectileTypeConfig::new("Sticky", [154, 205, 50], (45.0, 70.0), (0.0, 0.08), 15, Ground, Some("slow")),
            ProjectileTypeConfig::new("Leaky", [64, 224, 208], (40.0, 80.0), (0.05, 0.15), 15, Air, Some("puddle")),
            ProjectileTypeConfig::new("Pill", [255, 182, 193], (30.0, 60.0), (0.10, 0.20), 20, Air, Some("wobble")),
            ProjectileTypeConfig::new("Ink", [25, 25, 112], (40.0, 80.0), (0.0, 0.10), 20, Ground, Some("ink")),
            ProjectileTypeConfig::new("Hourglass", [218, 165, 32], (40.0, 70.0), (0.0, 0.05), 25, Air, Some("slow_time")),
            ProjectileTypeConfig::new("Caffeine", [101, 67, 33], (35.0, 75.0), (0.10, 0.25), 25, Ground, Some("speed")),
            ProjectileTypeConfig::new("Golden", [255, 215, 0], (40.0, 80.0), (0.05, 0.20), 100, Air, Some("bonus")),
            ProjectileTypeConfig::new("Star", [255, 255, 102], (50.0, 50.0), (0.15, 0.30), 50, Air, Some("sparkle")),
            ProjectileTypeConfig::new("Ghost", [220, 220, 220], (40.0, 80.0), (0.10, 0.25), 40, Ground, Some("fade")),
            ProjectileTypeConfig::new("Prankster", [186, 85, 211], (40.0, 80.0), (0.20, 0.35), 35, Ground, Some("fake_out")),
        ];
        let weights: [i64; 15] = [30, 30, 6, 6, 5, 5, 5, 4, 4, 3, 4, 1, 2, 3, 2];

        let bottle_types = (1u32..).zip(types).collect();
        let spawn_weights = (1u32..).zip(weights).collect();
        Self {
            bottle_types,
            spawn_weights,
        }
    }
}

impl BottleCatalog {
    /// Load from `path`, falling back to the built-in table
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<BottleCatalog>(path) {
            Ok(Some(catalog)) if !catalog.bottle_types.is_empty() => {
                log::info!(
                    "Loaded {} bottle types from {}",
                    catalog.bottle_types.len(),
                    path.display()
                );
                catalog.sanitized()
            }
            Ok(Some(_)) => {
                log::warn!("{} defines no bottle types, using defaults", path.display());
                Self::default()
            }
            Ok(None) => {
                log::info!("No bottle config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring bottle config: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)
    }

    /// Clamp out-of-range values into something the simulation can use
    pub fn sanitized(mut self) -> Self {
        for (id, config) in self.bottle_types.iter_mut() {
            if !(config.width > 0.0 && config.height > 0.0) {
                log::warn!("Bottle type {} has invalid size, using default", id);
                config.width = FALLBACK_SIZE.0;
                config.height = FALLBACK_SIZE.1;
            }
            config.min_curve = config.min_curve.max(0.0);
            config.max_curve = config.max_curve.max(0.0);
            if config.min_curve > config.max_curve {
                std::mem::swap(&mut config.min_curve, &mut config.max_curve);
            }
        }

        let types = &self.bottle_types;
        self.spawn_weights.retain(|id, _| {
            let known = types.contains_key(id);
            if !known {
                log::warn!("Dropping spawn weight for unknown bottle type {}", id);
            }
            known
        });
        for weight in self.spawn_weights.values_mut() {
            *weight = (*weight).max(0);
        }
        self
    }

    pub fn get(&self, type_id: u32) -> Option<&ProjectileTypeConfig> {
        self.bottle_types.get(&type_id)
    }

    /// Effective weight of a type (missing or negative weights count as zero)
    pub fn weight(&self, type_id: u32) -> u64 {
        self.spawn_weights
            .get(&type_id)
            .map(|w| (*w).max(0) as u64)
            .unwrap_or(0)
    }

    /// Weighted random pick. Uniform when every weight is zero, `None` when empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(u32, &ProjectileTypeConfig)> {
        if self.bottle_types.is_empty() {
            return None;
        }
        let entries: Vec<(u32, &ProjectileTypeConfig)> =
            self.bottle_types.iter().map(|(id, c)| (*id, c)).collect();

        let index = match WeightedIndex::new(entries.iter().map(|(id, _)| self.weight(*id))) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.random_range(0..entries.len()),
        };
        entries.get(index).copied()
    }
}
