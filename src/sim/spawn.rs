//! Per-hand preview/throw cycle
//!
//! Each hand runs its own `Idle -> Preview -> Idle` loop:
//! - `Idle -> Preview` once the hand's spawn interval has passed since its last throw
//! - `Preview -> Idle` (the throw) once the throw delay has passed since the preview began
//!
//! The right hand throws fast and straight; the left hand throws slower, curved
//! bottles. The two profiles are tuned separately on purpose.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyCurve;
use super::projectile::Hand;
use crate::catalog::BottleCatalog;

/// Tuning for one hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandProfile {
    pub hand: Hand,
    pub pacing: DifficultyCurve,
    /// Ticks between preview and throw; zero throws without a preview
    pub throw_delay: u32,
    /// Depth gained per frame by this hand's bottles
    pub z_speed: f32,
    /// Whether throws get a lateral curve
    pub curves: bool,
    /// Hand position as a fraction of the screen
    pub origin: Vec2,
}

impl HandProfile {
    pub fn right() -> Self {
        Self {
            hand: Hand::Right,
            pacing: DifficultyCurve {
                base_interval: 90,
                min_interval: 36,
                threshold: 500,
                step: 6,
            },
            throw_delay: 30,
            z_speed: 0.02,
            curves: false,
            origin: Vec2::new(0.58, 0.32),
        }
    }

    pub fn left() -> Self {
        Self {
            hand: Hand::Left,
            pacing: DifficultyCurve {
                base_interval: 150,
                min_interval: 60,
                threshold: 500,
                step: 8,
            },
            throw_delay: 45,
            z_speed: 0.014,
            curves: true,
            origin: Vec2::new(0.42, 0.32),
        }
    }

    /// Stretch (`pace > 1`) or compress (`pace < 1`) every timing of this hand
    pub fn paced(&self, pace: f32) -> Self {
        Self {
            pacing: self.pacing.scaled(pace),
            throw_delay: (self.throw_delay as f32 * pace.max(0.0)).round() as u32,
            ..*self
        }
    }
}

/// Where a hand is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandPhase {
    Idle,
    /// Showing the upcoming bottle since tick `since`
    Preview { type_id: u32, since: u64 },
}

/// What a hand did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEvent {
    PreviewStarted { hand: Hand, type_id: u32 },
    Throw { hand: Hand, type_id: u32, from_preview: bool },
}

/// State machine for a single hand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandSpawner {
    pub profile: HandProfile,
    pub phase: HandPhase,
    /// Tick of the most recent throw
    pub last_throw: u64,
}

impl HandSpawner {
    pub fn new(profile: HandProfile) -> Self {
        Self {
            profile,
            phase: HandPhase::Idle,
            last_throw: 0,
        }
    }

    /// Bottle type currently being previewed, if any
    pub fn preview(&self) -> Option<u32> {
        match self.phase {
            HandPhase::Preview { type_id, .. } => Some(type_id),
            HandPhase::Idle => None,
        }
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        score: u64,
        catalog: &BottleCatalog,
        rng: &mut R,
    ) -> Option<SpawnEvent> {
        let hand = self.profile.hand;
        match self.phase {
            HandPhase::Idle => {
                let interval = u64::from(self.profile.pacing.spawn_interval(score));
                if now.saturating_sub(self.last_throw) < interval {
                    return None;
                }
                let Some((type_id, _)) = catalog.choose(rng) else {
                    log::debug!("{:?} hand has nothing to throw", hand);
                    return None;
                };
                if self.profile.throw_delay == 0 {
                    self.last_throw = now;
                    return Some(SpawnEvent::Throw {
                        hand,
                        type_id,
                        from_preview: false,
                    });
                }
                self.phase = HandPhase::Preview { type_id, since: now };
                Some(SpawnEvent::PreviewStarted { hand, type_id })
            }
            HandPhase::Preview { type_id, since } => {
                if now.saturating_sub(since) < u64::from(self.profile.throw_delay) {
                    return None;
                }
                self.phase = HandPhase::Idle;
                self.last_throw = now;
                Some(SpawnEvent::Throw {
                    hand,
                    type_id,
                    from_preview: true,
                })
            }
        }
    }
}

/// Both hands of the thrower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnController {
    pub left: HandSpawner,
    pub right: HandSpawner,
}

impl Default for SpawnController {
    fn default() -> Self {
        Self::new(HandProfile::left(), HandProfile::right())
    }
}

impl SpawnController {
    pub fn new(left: HandProfile, right: HandProfile) -> Self {
        Self {
            left: HandSpawner::new(left),
            right: HandSpawner::new(right),
        }
    }

    /// Step both hands (left first, for a stable RNG draw order)
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        score: u64,
        catalog: &BottleCatalog,
        rng: &mut R,
    ) -> Vec<SpawnEvent> {
        [&mut self.left, &mut self.right]
            .into_iter()
            .filter_map(|spawner| spawner.step(now, score, catalog, rng))
            .collect()
    }

    pub fn hand(&self, hand: Hand) -> &HandSpawner {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }
}
