//! Thrown bottles and their pseudo-3D flight
//!
//! A bottle has no real 3D position. Its depth `z` grows from near zero toward
//! a target depth, and everything else (apparent size, hitbox, whether it can
//! touch the player at all) is derived from that single scalar.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Viewport};
use super::state::Stance;
use crate::consts::*;

/// Which player stance a bottle can strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    /// Rolls/flies low: jump over it
    #[default]
    Ground,
    /// Flies high: stay on the ground
    Air,
}

impl Behavior {
    /// The stance this bottle is able to hit
    pub fn threatens(self, stance: Stance) -> bool {
        matches!(
            (self, stance),
            (Behavior::Ground, Stance::Grounded) | (Behavior::Air, Stance::Airborne)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Ground => "ground",
            Behavior::Air => "air",
        }
    }
}

/// The NPC hand a bottle was thrown from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

/// Lateral drift applied to curved throws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Peak offset as a fraction of screen width
    pub strength: f32,
    /// -1.0 (drift left) or +1.0 (drift right)
    pub direction: f32,
    /// Progress (z / target_z) at which the drift peaks
    pub peak_depth: f32,
}

impl Curve {
    /// Default progress at which a curve peaks
    pub const DEFAULT_PEAK: f32 = 0.6;

    pub fn new(strength: f32, direction: f32) -> Self {
        Self {
            strength: strength.max(0.0),
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            peak_depth: Self::DEFAULT_PEAK,
        }
    }

    /// Lateral offset in pixels at the given flight progress
    pub fn offset(&self, progress: f32, screen_width: f32) -> f32 {
        let peak = self.peak_depth.max(f32::EPSILON);
        let phase = (progress / peak).min(1.0);
        (phase * std::f32::consts::PI).sin() * self.strength * self.direction * screen_width
    }
}

/// Everything needed to put a bottle in the air
#[derive(Debug, Clone)]
pub struct Launch {
    pub type_id: u32,
    pub behavior: Behavior,
    pub hand: Hand,
    /// Hand position (pixels)
    pub start: Vec2,
    /// Where the bottle is aimed (pixels)
    pub target: Vec2,
    pub start_z: f32,
    pub target_z: f32,
    pub z_speed: f32,
    /// Unscaled sprite size
    pub base_size: Vec2,
    pub curve: Option<Curve>,
    /// Degrees per frame
    pub angular_speed: f32,
}

/// Result of advancing a bottle by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    Active,
    /// Reached its target depth or left the screen
    Finished,
}

/// A bottle in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub type_id: u32,
    pub behavior: Behavior,
    pub hand: Hand,
    /// Sprite center (pixels)
    pub pos: Vec2,
    /// Linear per-frame displacement
    pub vel: Vec2,
    pub z: f32,
    pub start_z: f32,
    pub target_z: f32,
    pub z_speed: f32,
    /// Frames advanced so far
    pub frames: u32,
    pub base_size: Vec2,
    pub curve: Option<Curve>,
    /// Degrees, in [0, 360)
    pub rotation: f32,
    pub angular_speed: f32,
    /// Dodge already counted
    pub scored: bool,
    /// Already resolved as a hit
    pub hit_player: bool,
}

impl Projectile {
    pub fn new(id: u32, launch: &Launch) -> Self {
        let z_speed = launch.z_speed.max(MIN_Z_SPEED);
        let start_z = launch.start_z.max(0.0);
        let target_z = launch.target_z.max(start_z);

        let frames = ((target_z - start_z) / z_speed).ceil().max(1.0);
        let vel = (launch.target - launch.start) / frames;

        Self {
            id,
            type_id: launch.type_id,
            behavior: launch.behavior,
            hand: launch.hand,
            pos: launch.start,
            vel,
            z: start_z,
            start_z,
            target_z,
            z_speed,
            frames: 0,
            base_size: launch.base_size,
            curve: launch.curve,
            rotation: 0.0,
            angular_speed: launch.angular_speed,
            scored: false,
            hit_player: false,
        }
    }

    /// Fraction of the flight completed, by depth
    pub fn progress(&self) -> f32 {
        if self.target_z <= 0.0 {
            return 1.0;
        }
        self.z / self.target_z
    }

    /// Advance one frame. Must be called exactly once per rendered frame.
    pub fn update(&mut self, viewport: &Viewport) -> Flight {
        self.frames += 1;
        // Derived from the frame count so depth never accumulates rounding drift
        self.z = self.start_z + self.frames as f32 * self.z_speed;

        if let Some(curve) = self.curve {
            let offset = curve.offset(self.progress(), viewport.width);
            self.pos.x += offset * self.z_speed;
        }

        self.pos += self.vel;
        self.rotation = (self.rotation + self.angular_speed).rem_euclid(360.0);

        if self.z >= self.target_z {
            return Flight::Finished;
        }
        let bounds = viewport.rect().expanded(OFFSCREEN_MARGIN);
        if !bounds.intersects(&self.draw_rect(viewport)) {
            return Flight::Finished;
        }
        Flight::Active
    }

    /// Apparent size multiplier at the current depth
    pub fn scale(&self, viewport: &Viewport) -> f32 {
        (self.z.powf(SCALE_EXPONENT) * SCALE_K * viewport.scale_factor()).max(MIN_SCALE)
    }

    /// On-screen sprite footprint (before rotation)
    pub fn draw_rect(&self, viewport: &Viewport) -> Rect {
        Rect::from_center_size(self.pos, self.base_size * self.scale(viewport))
    }

    /// The part of the sprite that can hit the player
    pub fn hitbox(&self, viewport: &Viewport) -> Rect {
        self.draw_rect(viewport).scaled(HITBOX_FACTOR)
    }

    /// Where the straight-line part of the flight ends (curve drift not included)
    pub fn landing_point(&self) -> Vec2 {
        let remaining = ((self.target_z - self.z) / self.z_speed).max(0.0);
        self.pos + self.vel * remaining
    }

    /// Already counted as a dodge or a hit
    pub fn is_resolved(&self) -> bool {
        self.scored || self.hit_player
    }
}
