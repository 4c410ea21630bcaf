//! Score-driven spawn pacing

use serde::{Deserialize, Serialize};

/// Maps cumulative score to a spawn interval (in ticks)
///
/// Every `threshold` points shaves `step` ticks off `base_interval`, never
/// going below `min_interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    pub base_interval: u32,
    pub min_interval: u32,
    pub threshold: u64,
    pub step: u32,
}

impl DifficultyCurve {
    pub fn spawn_interval(&self, score: u64) -> u32 {
        let steps = score / self.threshold.max(1);
        let decrement = steps.saturating_mul(u64::from(self.step));
        let interval = u64::from(self.base_interval).saturating_sub(decrement);
        // interval <= base_interval, so the cast back cannot truncate
        (interval as u32).max(self.min_interval)
    }

    /// Multiply both interval bounds, keeping at least one tick
    pub fn scaled(&self, factor: f32) -> Self {
        let scale = |ticks: u32| ((ticks as f32 * factor.max(0.0)).round() as u32).max(1);
        Self {
            base_interval: scale(self.base_interval),
            min_interval: scale(self.min_interval),
            ..*self
        }
    }
}
