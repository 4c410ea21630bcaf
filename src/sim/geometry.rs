//! Screen-space geometry for bottles and the player
//!
//! Everything is axis-aligned: bottles rotate only cosmetically, and the
//! hitbox stays an unrotated rectangle around the sprite center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH};

/// An axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Zero-area rectangle that overlaps nothing
    pub const EMPTY: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Grow (or shrink, for negative `margin`) on all four sides
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Same center, each dimension multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_center_size(self.center(), self.size() * factor)
    }

    /// Strict overlap test; empty rectangles never intersect anything
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// The visible play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
        }
    }
}

impl Viewport {
    /// Degenerate sizes are clamped to one pixel
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Uniform scale relative to the reference resolution
    pub fn scale_factor(&self) -> f32 {
        (self.width / REFERENCE_WIDTH).min(self.height / REFERENCE_HEIGHT)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: Vec2::ZERO,
            max: Vec2::new(self.width, self.height),
        }
    }

    /// Convert a position given as fractions of the screen to pixels
    pub fn point(&self, fraction: Vec2) -> Vec2 {
        Vec2::new(fraction.x * self.width, fraction.y * self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::from_center_size(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Rect::from_center_size(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        // Touching edges do not count
        let d = Rect::from_center_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let a = Rect::from_center_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(!Rect::EMPTY.intersects(&a));
        assert!(!a.intersects(&Rect::EMPTY));
    }

    #[test]
    fn test_scaled_keeps_center() {
        let a = Rect::from_center_size(Vec2::new(50.0, 40.0), Vec2::new(20.0, 30.0));
        let s = a.scaled(0.8);
        assert!((s.center() - a.center()).length() < 1e-4);
        assert!((s.size().x - 16.0).abs() < 1e-4);
        assert!((s.size().y - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_viewport_scale_factor() {
        assert!((Viewport::default().scale_factor() - 1.0).abs() < 1e-6);
        let half = Viewport::new(REFERENCE_WIDTH / 2.0, REFERENCE_HEIGHT);
        assert!((half.scale_factor() - 0.5).abs() < 1e-6);
    }
}
