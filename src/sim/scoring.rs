//! Combo scoring for dodges and hits
//!
//! Each bottle is resolved at most once: `award_dodge` and `register_hit` both
//! refuse bottles whose `scored`/`hit_player` flag is already set.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::is_close_call;
use super::projectile::{Behavior, Projectile};
use super::state::Stance;
use crate::consts::STARTING_LIVES;

/// Point-award policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Max distance (pixels) between bottle and player centers for a close call
    pub close_call_distance: f32,
    pub close_call_multiplier: f32,
    /// Bonus for dodging air bottles
    pub air_multiplier: f32,
    pub combo_increment: f32,
    pub max_combo: f32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            close_call_distance: 150.0,
            close_call_multiplier: 2.0,
            air_multiplier: 1.5,
            combo_increment: 0.2,
            max_combo: 5.0,
        }
    }
}

/// Running score for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    /// Always within [1.0, max_combo]
    pub combo: f32,
    pub dodges: u32,
    pub close_calls: u32,
    pub hits: u32,
    pub lives: u8,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(STARTING_LIVES)
    }
}

impl ScoreState {
    pub fn new(lives: u8) -> Self {
        Self {
            score: 0,
            combo: 1.0,
            dodges: 0,
            close_calls: 0,
            hits: 0,
            lives: lives.max(1),
        }
    }
}

/// Points granted for one dodge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DodgeAward {
    pub points: u64,
    pub close_call: bool,
    /// Multiplier that was applied to this dodge
    pub combo: f32,
}

/// Consequence of one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub lives_left: u8,
    pub game_over: bool,
}

impl ScoringRules {
    /// Score a bottle that left play without touching the player
    pub fn award_dodge(
        &self,
        state: &mut ScoreState,
        bottle: &mut Projectile,
        base_points: u32,
        player_center: Vec2,
        stance: Stance,
    ) -> Option<DodgeAward> {
        if bottle.is_resolved() {
            return None;
        }
        bottle.scored = true;

        let close_call = is_close_call(
            bottle.pos,
            player_center,
            bottle.behavior,
            stance,
            self.close_call_distance,
        );

        let mut points = base_points as f32;
        if close_call {
            points *= self.close_call_multiplier;
        }
        if bottle.behavior == Behavior::Air {
            points *= self.air_multiplier;
        }
        let combo = state.combo;
        let points = (points * combo).round().max(0.0) as u64;

        state.score = state.score.saturating_add(points);
        state.dodges += 1;
        if close_call {
            state.close_calls += 1;
        }
        state.combo = (state.combo + self.combo_increment).clamp(1.0, self.max_combo.max(1.0));

        Some(DodgeAward {
            points,
            close_call,
            combo,
        })
    }

    /// Resolve a bottle that struck the player
    pub fn register_hit(
        &self,
        state: &mut ScoreState,
        bottle: &mut Projectile,
    ) -> Option<HitOutcome> {
        if bottle.is_resolved() {
            return None;
        }
        bottle.hit_player = true;

        state.lives = state.lives.saturating_sub(1);
        state.hits += 1;
        state.combo = 1.0;

        Some(HitOutcome {
            lives_left: state.lives,
            game_over: state.lives == 0,
        })
    }
}
