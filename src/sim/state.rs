//! Session state and core simulation types
//!
//! One `GameState` owns everything a running game needs; nothing lives in globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionZones;
use super::geometry::{Rect, Viewport};
use super::projectile::{Behavior, Curve, Hand, Launch, Projectile};
use super::scoring::{ScoreState, ScoringRules};
use super::spawn::{HandProfile, SpawnController};
use super::tick::TickInput;
use crate::catalog::BottleCatalog;
use crate::consts::*;
use crate::ticks_to_secs;

/// Player's vertical posture; decides which bottles can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Grounded,
    Airborne,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Out of lives; the final score is fixed
    GameOver,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PreviewShown {
        hand: Hand,
        type_id: u32,
    },
    Thrown {
        hand: Hand,
        bottle_id: u32,
        type_id: u32,
    },
    Dodged {
        bottle_id: u32,
        type_id: u32,
        points: u64,
        close_call: bool,
        combo: f32,
    },
    Hit {
        bottle_id: u32,
        type_id: u32,
        lives_left: u8,
    },
    GameOver {
        survival_secs: f32,
        score: u64,
    },
}

/// Vertical offset above the player's center that air bottles aim for
const AIR_AIM_OFFSET: f32 = 150.0;
/// Player center height as a fraction of the screen
const PLAYER_GROUND_FRACTION: f32 = 0.78;
/// Points for a dodged bottle whose type vanished from the catalog
pub const DEFAULT_SCORE_GAIN: u32 = 10;

/// The dodging character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Body center (pixels)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical speed while airborne (pixels/s, positive is down)
    pub vel_y: f32,
    /// Center height when standing
    pub ground_y: f32,
    pub stance: Stance,
}

impl Player {
    pub fn new(viewport: &Viewport) -> Self {
        let scale = viewport.scale_factor();
        let ground_y = viewport.height * PLAYER_GROUND_FRACTION;
        Self {
            pos: Vec2::new(viewport.width * 0.5, ground_y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * scale,
            vel_y: 0.0,
            ground_y,
            stance: Stance::Grounded,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    /// Apply movement/jump input and gravity for one tick
    pub fn update(&mut self, input: &TickInput, dt: f32, viewport: &Viewport) {
        let scale = viewport.scale_factor();

        let half_width = self.size.x * 0.5;
        self.pos.x += input.move_x.clamp(-1.0, 1.0) * PLAYER_SPEED * scale * dt;
        self.pos.x = self
            .pos
            .x
            .clamp(half_width, (viewport.width - half_width).max(half_width));

        if input.jump && self.stance == Stance::Grounded {
            self.launch(scale);
        }

        if self.stance == Stance::Airborne {
            self.pos.y += self.vel_y * dt;
            self.vel_y += GRAVITY * scale * dt;
            if self.pos.y >= self.ground_y {
                self.pos.y = self.ground_y;
                self.vel_y = 0.0;
                self.stance = Stance::Grounded;
                // A held jump takes off again without a grounded frame
                if input.jump {
                    self.launch(scale);
                }
            }
        }
    }

    fn launch(&mut self, scale: f32) {
        self.vel_y = -JUMP_VELOCITY * scale;
        self.stance = Stance::Airborne;
    }
}

/// Tunables for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub seed: u64,
    pub viewport: Viewport,
    pub lives: u8,
    pub zones: CollisionZones,
    pub rules: ScoringRules,
    pub left: HandProfile,
    pub right: HandProfile,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            viewport: Viewport::default(),
            lives: STARTING_LIVES,
            zones: CollisionZones::default(),
            rules: ScoringRules::default(),
            left: HandProfile::left(),
            right: HandProfile::right(),
        }
    }
}

/// Numbers worth keeping after a session ends (or is abandoned)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResult {
    pub score: u64,
    pub survival_secs: f32,
    pub dodges: u32,
    pub close_calls: u32,
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub zones: CollisionZones,
    pub rules: ScoringRules,
    /// Injected bottle table (sanitized)
    pub catalog: BottleCatalog,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub spawner: SpawnController,
    /// Bottles in flight (sorted by id)
    pub bottles: Vec<Projectile>,
    pub score: ScoreState,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    pub fn new(config: SessionConfig, catalog: BottleCatalog) -> Self {
        log::debug!(
            "New session: seed={} viewport={}x{}",
            config.seed,
            config.viewport.width,
            config.viewport.height
        );
        Self {
            seed: config.seed,
            rng: Pcg32::seed_from_u64(config.seed),
            viewport: config.viewport,
            zones: config.zones,
            rules: config.rules,
            catalog: catalog.sanitized(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::new(&config.viewport),
            spawner: SpawnController::new(config.left, config.right),
            bottles: Vec::new(),
            score: ScoreState::new(config.lives),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put a bottle of `type_id` in the air from `hand`, aimed at the player
    pub fn throw_bottle(&mut self, hand: Hand, type_id: u32, from_preview: bool) -> Option<u32> {
        let Some(config) = self.catalog.get(type_id).cloned() else {
            log::warn!("Unknown bottle type {}, skipping throw", type_id);
            return None;
        };
        let profile = self.spawner.hand(hand).profile;
        let scale = self.viewport.scale_factor();

        let start = self.viewport.point(profile.origin);
        let mut target = Vec2::new(self.player.pos.x, self.player.ground_y);
        if config.behavior == Behavior::Air {
            target.y -= AIR_AIM_OFFSET * scale;
        }

        let start_z = if from_preview {
            PREVIEW_START_Z
        } else {
            self.rng
                .random_range(DIRECT_START_Z_MIN..=DIRECT_START_Z_MAX)
        };

        let curve = if profile.curves && config.max_curve > 0.0 {
            let strength = self.rng.random_range(config.min_curve..=config.max_curve);
            let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            Some(Curve::new(strength, direction))
        } else {
            None
        };

        let spin = self.rng.random_range(2.0..=8.0_f32);
        let angular_speed = if self.rng.random_bool(0.5) { spin } else { -spin };

        let id = self.next_entity_id();
        let bottle = Projectile::new(
            id,
            &Launch {
                type_id,
                behavior: config.behavior,
                hand,
                start,
                target,
                start_z,
                target_z: TARGET_Z,
                z_speed: profile.z_speed,
                base_size: Vec2::new(config.width, config.height),
                curve,
                angular_speed,
            },
        );
        log::trace!(
            "Bottle {} ({}) thrown by {:?} hand, {}",
            id,
            config.name,
            hand,
            config.behavior.as_str()
        );
        self.bottles.push(bottle);
        Some(id)
    }

    pub fn survival_secs(&self) -> f32 {
        ticks_to_secs(self.time_ticks)
    }

    /// Already-computed totals; valid at any frame boundary
    pub fn final_result(&self) -> SessionResult {
        SessionResult {
            score: self.score.score,
            survival_secs: self.survival_secs(),
            dodges: self.score.dodges,
            close_calls: self.score.close_calls,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.lives, STARTING_LIVES);
        assert_eq!(state.score.combo, 1.0);
        assert!(state.bottles.is_empty());
        assert_eq!(state.player.stance, Stance::Grounded);
    }

    #[test]
    fn test_throw_from_preview_starts_at_preview_depth() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        let id = state.throw_bottle(Hand::Right, 1, true).unwrap();
        let bottle = state.bottles.iter().find(|b| b.id == id).unwrap();
        assert_eq!(bottle.z, PREVIEW_START_Z);
        assert!(bottle.curve.is_none());
        assert_eq!(bottle.behavior, Behavior::Ground);
    }

    #[test]
    fn test_direct_throw_start_depth_range() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        for _ in 0..20 {
            let id = state.throw_bottle(Hand::Left, 2, false).unwrap();
            let bottle = state.bottles.iter().find(|b| b.id == id).unwrap();
            assert!((DIRECT_START_Z_MIN..=DIRECT_START_Z_MAX).contains(&bottle.z));
        }
    }

    #[test]
    fn test_left_hand_curves() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        let id = state.throw_bottle(Hand::Left, 3, true).unwrap();
        let bottle = state.bottles.iter().find(|b| b.id == id).unwrap();
        assert!(bottle.curve.is_some());
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        assert!(state.throw_bottle(Hand::Left, 999, true).is_none());
        assert!(state.bottles.is_empty());
    }

    #[test]
    fn test_player_jump_lands() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        player.update(&jump, SIM_DT, &viewport);
        assert_eq!(player.stance, Stance::Airborne);
        assert!(player.pos.y < player.ground_y);

        let idle = TickInput::default();
        let mut ticks = 0;
        while player.stance == Stance::Airborne {
            player.update(&idle, SIM_DT, &viewport);
            ticks += 1;
            assert!(ticks < 120, "player never landed");
        }
        assert_eq!(player.pos.y, player.ground_y);
        // Roughly 2v/g seconds of airtime
        assert!((30..60).contains(&ticks));
    }

    #[test]
    fn test_held_jump_never_touches_down() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..300 {
            player.update(&jump, SIM_DT, &viewport);
            assert_eq!(player.stance, Stance::Airborne);
            assert!(player.pos.y <= player.ground_y);
        }
    }

    #[test]
    fn test_final_result_mid_session() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        state.time_ticks = 600;
        state.score.score = 1234;
        state.score.dodges = 17;
        state.score.close_calls = 4;
        assert_eq!(
            state.final_result(),
            SessionResult {
                score: 1234,
                survival_secs: ticks_to_secs(600),
                dodges: 17,
                close_calls: 4,
            }
        );
        assert!(!state.is_over());
    }

    #[test]
    fn test_player_stays_on_screen() {
        let viewport = Viewport::default();
        let mut player = Player::new(&viewport);
        let left = TickInput {
            move_x: -1.0,
            ..Default::default()
        };
        for _ in 0..600 {
            player.update(&left, SIM_DT, &viewport);
        }
        assert!((player.rect().min.x - 0.0).abs() < 1e-3);
    }
}
