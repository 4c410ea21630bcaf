//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, asset or file dependencies

pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod projectile;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionZones, DepthBand, check_hit, collision_rect, in_collision_zone, is_close_call,
};
pub use difficulty::DifficultyCurve;
pub use geometry::{Rect, Viewport};
pub use projectile::{Behavior, Curve, Flight, Hand, Launch, Projectile};
pub use scoring::{DodgeAward, HitOutcome, ScoreState, ScoringRules};
pub use spawn::{HandPhase, HandProfile, HandSpawner, SpawnController, SpawnEvent};
pub use state::{GameEvent, GamePhase, GameState, Player, SessionConfig, SessionResult, Stance};
pub use tick::{DrawOrder, FrameReport, TickInput, draw_order, tick};
