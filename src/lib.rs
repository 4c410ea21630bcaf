//! Bottle Dodge - a pseudo-3D arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bottles, collision zones, spawning, scoring)
//! - `catalog`: Data-driven bottle types and spawn weights
//! - `leaderboard`: Persisted top scores
//! - `settings`: Player preferences and difficulty presets
//! - `persistence`: JSON load/save with atomic replace
//! - `renderer`: Draw-list builder with placeholder fallback

pub mod catalog;
pub mod leaderboard;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use catalog::{BottleCatalog, ProjectileTypeConfig};
pub use leaderboard::Leaderboard;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Target frame rate; one simulation tick per rendered frame
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FPS as f32;

    /// Reference screen size the tuning below was made for
    pub const REFERENCE_WIDTH: f32 = 1925.0;
    pub const REFERENCE_HEIGHT: f32 = 1025.0;

    /// Depth every bottle flies toward
    pub const TARGET_Z: f32 = 0.7;
    /// Start depth for a bottle thrown out of a preview
    pub const PREVIEW_START_Z: f32 = 0.05;
    /// Start depth range for direct throws
    pub const DIRECT_START_Z_MIN: f32 = 0.01;
    pub const DIRECT_START_Z_MAX: f32 = 0.2;
    /// Floor for per-frame depth increments
    pub const MIN_Z_SPEED: f32 = 1.0e-4;

    /// Scale law: scale = max(MIN_SCALE, z^SCALE_EXPONENT * SCALE_K * screen_scale)
    pub const SCALE_EXPONENT: f32 = 1.8;
    pub const SCALE_K: f32 = 4.0;
    pub const MIN_SCALE: f32 = 0.01;
    /// Hitbox size relative to the drawn sprite
    pub const HITBOX_FACTOR: f32 = 0.8;
    /// Bottles whose footprint leaves the screen grown by this margin are dropped
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Depth bands in which each stance occupies space
    pub const GROUND_ZONE: (f32, f32) = (0.55, 0.70);
    pub const AIR_ZONE: (f32, f32) = (0.50, 0.65);
    /// Bottles shallower than this are drawn behind the player
    pub const PLAYER_DEPTH: f32 = 0.6;

    /// Player defaults (pixels, pixels/s, pixels/s²) at reference size
    pub const PLAYER_WIDTH: f32 = 120.0;
    pub const PLAYER_HEIGHT: f32 = 200.0;
    pub const PLAYER_SPEED: f32 = 520.0;
    pub const JUMP_VELOCITY: f32 = 950.0;
    pub const GRAVITY: f32 = 2600.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Preview marker size (pixels at reference size)
    pub const PREVIEW_MARKER_SIZE: f32 = 24.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert a tick count to seconds of play
#[inline]
pub fn ticks_to_secs(ticks: u64) -> f32 {
    ticks as f32 * consts::SIM_DT
}
