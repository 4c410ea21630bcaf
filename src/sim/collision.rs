//! Depth-banded collision between bottles and the player
//!
//! A bottle can only touch the player while its depth lies inside the band the
//! player's current stance occupies, and only if the bottle's behavior targets
//! that stance. Rectangle overlap is tested only after both checks pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Viewport};
use super::projectile::{Behavior, Projectile};
use super::state::Stance;
use crate::consts::{AIR_ZONE, GROUND_ZONE};

/// Inclusive depth interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthBand {
    pub start: f32,
    pub end: f32,
}

impl DepthBand {
    pub fn new(start: f32, end: f32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    #[inline]
    pub fn contains(&self, z: f32) -> bool {
        z >= self.start && z <= self.end
    }
}

/// One depth band per stance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionZones {
    pub ground: DepthBand,
    pub air: DepthBand,
}

impl Default for CollisionZones {
    fn default() -> Self {
        Self {
            ground: DepthBand::new(GROUND_ZONE.0, GROUND_ZONE.1),
            air: DepthBand::new(AIR_ZONE.0, AIR_ZONE.1),
        }
    }
}

impl CollisionZones {
    pub fn band(&self, stance: Stance) -> DepthBand {
        match stance {
            Stance::Grounded => self.ground,
            Stance::Airborne => self.air,
        }
    }
}

/// Whether a bottle at depth `z` currently shares space with the player
pub fn in_collision_zone(
    zones: &CollisionZones,
    behavior: Behavior,
    z: f32,
    stance: Stance,
) -> bool {
    if !behavior.threatens(stance) {
        return false;
    }
    zones.band(stance).contains(z)
}

/// Hitbox of the bottle, or `Rect::EMPTY` while it is outside the player's zone
pub fn collision_rect(
    bottle: &Projectile,
    stance: Stance,
    zones: &CollisionZones,
    viewport: &Viewport,
) -> Rect {
    if in_collision_zone(zones, bottle.behavior, bottle.z, stance) {
        bottle.hitbox(viewport)
    } else {
        Rect::EMPTY
    }
}

/// Full hit test: zone eligibility, then rectangle overlap
pub fn check_hit(
    bottle: &Projectile,
    stance: Stance,
    player_rect: &Rect,
    zones: &CollisionZones,
    viewport: &Viewport,
) -> bool {
    collision_rect(bottle, stance, zones, viewport).intersects(player_rect)
}

/// A dodge that passed within `threshold` pixels of the player while aimed at their stance
pub fn is_close_call(
    bottle_center: Vec2,
    player_center: Vec2,
    behavior: Behavior,
    stance: Stance,
    threshold: f32,
) -> bool {
    behavior.threatens(stance) && bottle_center.distance(player_center) <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TARGET_Z;
    use crate::sim::projectile::{Hand, Launch};
    use proptest::prelude::*;

    fn bottle_at(behavior: Behavior, z: f32, pos: Vec2) -> Projectile {
        let mut bottle = Projectile::new(
            1,
            &Launch {
                type_id: 1,
                behavior,
                hand: Hand::Left,
                start: pos,
                target: pos,
                start_z: 0.01,
                target_z: TARGET_Z,
                z_speed: 0.02,
                base_size: Vec2::new(40.0, 80.0),
                curve: None,
                angular_speed: 0.0,
            },
        );
        bottle.z = z;
        bottle
    }

    #[test]
    fn test_zone_membership_matching_stance() {
        let zones = CollisionZones::default();
        assert!(in_collision_zone(&zones, Behavior::Ground, 0.6, Stance::Grounded));
        assert!(!in_collision_zone(&zones, Behavior::Ground, 0.3, Stance::Grounded));
        assert!(in_collision_zone(&zones, Behavior::Air, 0.55, Stance::Airborne));
        assert!(!in_collision_zone(&zones, Behavior::Air, 0.68, Stance::Airborne));
    }

    /// An air bottle swept through every depth never threatens a grounded player
    #[test]
    fn test_air_bottle_never_hits_grounded_player() {
        let zones = CollisionZones::default();
        for i in 0..=1000 {
            let z = i as f32 / 1000.0;
            assert!(!in_collision_zone(&zones, Behavior::Air, z, Stance::Grounded));
        }
    }

    #[test]
    fn test_collision_rect_empty_outside_zone() {
        let zones = CollisionZones::default();
        let viewport = Viewport::default();
        let bottle = bottle_at(Behavior::Ground, 0.2, Vec2::new(500.0, 500.0));
        assert_eq!(
            collision_rect(&bottle, Stance::Grounded, &zones, &viewport),
            Rect::EMPTY
        );
        let bottle = bottle_at(Behavior::Ground, 0.6, Vec2::new(500.0, 500.0));
        assert_eq!(
            collision_rect(&bottle, Stance::Grounded, &zones, &viewport),
            bottle.hitbox(&viewport)
        );
    }

    #[test]
    fn test_check_hit_requires_zone_and_overlap() {
        let zones = CollisionZones::default();
        let viewport = Viewport::default();
        let player = Rect::from_center_size(Vec2::new(500.0, 500.0), Vec2::new(120.0, 200.0));

        let in_zone = bottle_at(Behavior::Ground, 0.6, Vec2::new(500.0, 500.0));
        assert!(check_hit(&in_zone, Stance::Grounded, &player, &zones, &viewport));
        // Jumping defends against ground bottles
        assert!(!check_hit(&in_zone, Stance::Airborne, &player, &zones, &viewport));

        let wide = bottle_at(Behavior::Ground, 0.6, Vec2::new(900.0, 500.0));
        assert!(!check_hit(&wide, Stance::Grounded, &player, &zones, &viewport));
    }

    #[test]
    fn test_check_hit_air_bottle_against_airborne_player() {
        let zones = CollisionZones::default();
        let viewport = Viewport::default();
        let player = Rect::from_center_size(Vec2::new(500.0, 500.0), Vec2::new(120.0, 200.0));

        let in_zone = bottle_at(Behavior::Air, 0.6, Vec2::new(500.0, 500.0));
        assert!(check_hit(&in_zone, Stance::Airborne, &player, &zones, &viewport));
        // Staying down defends against air bottles
        assert!(!check_hit(&in_zone, Stance::Grounded, &player, &zones, &viewport));

        // Past the air band, even though the rectangles overlap
        let too_near = bottle_at(Behavior::Air, 0.68, Vec2::new(500.0, 500.0));
        assert!(!check_hit(&too_near, Stance::Airborne, &player, &zones, &viewport));
        let too_far = bottle_at(Behavior::Air, 0.45, Vec2::new(500.0, 500.0));
        assert!(!check_hit(&too_far, Stance::Airborne, &player, &zones, &viewport));

        let wide = bottle_at(Behavior::Air, 0.6, Vec2::new(900.0, 500.0));
        assert!(!check_hit(&wide, Stance::Airborne, &player, &zones, &viewport));
    }

    #[test]
    fn test_close_call() {
        let player = Vec2::new(100.0, 100.0);
        assert!(is_close_call(
            Vec2::new(150.0, 100.0),
            player,
            Behavior::Ground,
            Stance::Grounded,
            60.0
        ));
        assert!(!is_close_call(
            Vec2::new(150.0, 100.0),
            player,
            Behavior::Ground,
            Stance::Airborne,
            60.0
        ));
        assert!(!is_close_call(
            Vec2::new(300.0, 100.0),
            player,
            Behavior::Ground,
            Stance::Grounded,
            60.0
        ));
    }

    proptest! {
        #[test]
        fn prop_mismatched_behavior_never_in_zone(z in -1.0f32..2.0) {
            let zones = CollisionZones::default();
            prop_assert!(!in_collision_zone(&zones, Behavior::Air, z, Stance::Grounded));
            prop_assert!(!in_collision_zone(&zones, Behavior::Ground, z, Stance::Airborne));
        }

        #[test]
        fn prop_hitbox_is_eighty_percent_of_draw_rect(
            z in 0.0f32..1.0,
            x in 0.0f32..1925.0,
            y in 0.0f32..1025.0,
        ) {
            let viewport = Viewport::default();
            let bottle = bottle_at(Behavior::Ground, z, Vec2::new(x, y));
            let draw = bottle.draw_rect(&viewport);
            let hit = bottle.hitbox(&viewport);
            prop_assert!((draw.center() - hit.center()).length() < 1e-2);
            prop_assert!((hit.size().x - draw.size().x * 0.8).abs() < 1e-2);
            prop_assert!((hit.size().y - draw.size().y * 0.8).abs() < 1e-2);
        }
    }
}
