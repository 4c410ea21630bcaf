//! Draw list construction
//!
//! Paint order: hand previews, bottles behind the player (far to near), the
//! player, then bottles in front of the player (far to near).

use glam::Vec2;

use crate::consts::PREVIEW_MARKER_SIZE;
use crate::lerp;
use crate::sim::{FrameReport, GameState, Hand, HandPhase, HandSpawner, Projectile, Rect, Stance};

/// Handle to a sprite owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Resolves bottle types to loaded sprites
pub trait SpriteSource {
    fn sprite_for(&self, type_id: u32) -> Option<SpriteId>;
}

/// No images at all; everything falls back to placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteSource for NoSprites {
    fn sprite_for(&self, _type_id: u32) -> Option<SpriteId> {
        None
    }
}

/// How to paint a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Sprite(SpriteId),
    /// Placeholder color (RGB)
    Solid([u8; 3]),
}

/// One thing to paint, in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Upcoming bottle shown at a hand; grows until the throw
    Preview {
        hand: Hand,
        type_id: u32,
        rect: Rect,
        fill: Fill,
    },
    Bottle {
        id: u32,
        type_id: u32,
        rect: Rect,
        /// Radians, in [0, 2π)
        rotation: f32,
        fill: Fill,
    },
    Player {
        rect: Rect,
        stance: Stance,
    },
}

/// Colors for elements without a catalog color
pub mod colors {
    pub const UNKNOWN_BOTTLE: [u8; 3] = [200, 0, 200];
}

/// Build this frame's paint list from the state and its frame report
pub fn build_draw_list(
    state: &GameState,
    report: &FrameReport,
    sprites: &impl SpriteSource,
) -> Vec<DrawCommand> {
    let mut commands =
        Vec::with_capacity(2 + report.draw.behind.len() + report.draw.front.len() + 1);

    let fill_for = |type_id: u32| match sprites.sprite_for(type_id) {
        Some(sprite) => Fill::Sprite(sprite),
        None => Fill::Solid(
            state
                .catalog
                .get(type_id)
                .map(|c| c.color)
                .unwrap_or(colors::UNKNOWN_BOTTLE),
        ),
    };

    for spawner in [&state.spawner.left, &state.spawner.right] {
        if let Some((type_id, rect)) = preview_rect(state, spawner) {
            commands.push(DrawCommand::Preview {
                hand: spawner.profile.hand,
                type_id,
                rect,
                fill: fill_for(type_id),
            });
        }
    }

    let bottle = |id: u32| -> Option<&Projectile> {
        // Bottles are kept in id order
        state
            .bottles
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &state.bottles[i])
    };
    let bottle_command = |b: &Projectile| DrawCommand::Bottle {
        id: b.id,
        type_id: b.type_id,
        rect: b.draw_rect(&state.viewport),
        rotation: b.rotation.to_radians(),
        fill: fill_for(b.type_id),
    };

    commands.extend(
        report
            .draw
            .behind
            .iter()
            .filter_map(|&id| bottle(id))
            .map(bottle_command),
    );
    commands.push(DrawCommand::Player {
        rect: state.player.rect(),
        stance: state.player.stance,
    });
    commands.extend(
        report
            .draw
            .front
            .iter()
            .filter_map(|&id| bottle(id))
            .map(bottle_command),
    );

    commands
}

/// Marker at the hand, growing from half to full size over the throw delay
fn preview_rect(state: &GameState, spawner: &HandSpawner) -> Option<(u32, Rect)> {
    let HandPhase::Preview { type_id, since } = spawner.phase else {
        return None;
    };
    let delay = spawner.profile.throw_delay.max(1) as f32;
    let t = (state.time_ticks.saturating_sub(since) as f32 / delay).clamp(0.0, 1.0);
    let size = lerp(0.5, 1.0, t) * PREVIEW_MARKER_SIZE * state.viewport.scale_factor();
    let center = state.viewport.point(spawner.profile.origin);
    Some((type_id, Rect::from_center_size(center, Vec2::splat(size))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BottleCatalog;
    use crate::sim::{SessionConfig, TickInput, draw_order, tick};

    struct EvenSprites;

    impl SpriteSource for EvenSprites {
        fn sprite_for(&self, type_id: u32) -> Option<SpriteId> {
            (type_id % 2 == 0).then_some(SpriteId(type_id))
        }
    }

    fn player_index(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Player { .. }))
            .unwrap()
    }

    #[test]
    fn test_player_between_behind_and_front() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        state.throw_bottle(Hand::Right, 1, true).unwrap();
        state.throw_bottle(Hand::Right, 2, true).unwrap();
        // Push the second bottle past the player's depth
        state.bottles[1].z = 0.65;
        let report = FrameReport {
            events: Vec::new(),
            draw: draw_order(&state.bottles),
        };

        let commands = build_draw_list(&state, &report, &NoSprites);
        let player = player_index(&commands);
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[player - 1], DrawCommand::Bottle { type_id: 1, .. }));
        assert!(matches!(commands[player + 1], DrawCommand::Bottle { type_id: 2, .. }));
    }

    #[test]
    fn test_placeholder_matches_sprite_size() {
        let catalog = BottleCatalog::default();
        let mut state = GameState::new(SessionConfig::default(), catalog.clone());
        state.throw_bottle(Hand::Right, 1, true).unwrap();
        state.throw_bottle(Hand::Right, 2, true).unwrap();
        let report = FrameReport {
            events: Vec::new(),
            draw: draw_order(&state.bottles),
        };

        let plain = build_draw_list(&state, &report, &NoSprites);
        let sprited = build_draw_list(&state, &report, &EvenSprites);
        assert_eq!(plain.len(), sprited.len());

        for (a, b) in plain.iter().zip(&sprited) {
            if let (
                DrawCommand::Bottle { rect: ra, fill: fa, type_id, .. },
                DrawCommand::Bottle { rect: rb, fill: fb, .. },
            ) = (a, b)
            {
                assert_eq!(ra, rb);
                let color = catalog.get(*type_id).unwrap().color;
                assert_eq!(*fa, Fill::Solid(color));
                if type_id % 2 == 0 {
                    assert_eq!(*fb, Fill::Sprite(SpriteId(*type_id)));
                } else {
                    assert_eq!(*fb, Fill::Solid(color));
                }
            }
        }
    }

    #[test]
    fn test_preview_grows_until_throw() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        let input = TickInput::default();
        let mut sizes = Vec::new();
        for _ in 0..200 {
            let report = tick(&mut state, &input);
            let commands = build_draw_list(&state, &report, &NoSprites);
            if let Some(DrawCommand::Preview { rect, .. }) = commands
                .iter()
                .find(|c| matches!(c, DrawCommand::Preview { hand: Hand::Right, .. }))
            {
                sizes.push(rect.size().x);
            }
            if state.is_over() {
                break;
            }
        }
        assert!(!sizes.is_empty());
        assert!(sizes.windows(2).take(20).all(|w| w[1] >= w[0]));
        assert!(sizes[0] >= PREVIEW_MARKER_SIZE * 0.5 - 1e-3);
        assert!(sizes.iter().all(|&s| s <= PREVIEW_MARKER_SIZE + 1e-3));
    }

    #[test]
    fn test_bottle_rotation_is_radians() {
        let mut state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        state.throw_bottle(Hand::Right, 1, true).unwrap();
        let mut seen = 0;
        // Short of the hit band, so the bottle is still in flight afterwards
        for _ in 0..20 {
            let report = tick(&mut state, &TickInput::default());
            for command in build_draw_list(&state, &report, &NoSprites) {
                if let DrawCommand::Bottle { rotation, .. } = command {
                    assert!((0.0..std::f32::consts::TAU).contains(&rotation));
                    seen += 1;
                }
            }
        }
        assert!(seen > 0);
        let bottle = &state.bottles[0];
        let report = FrameReport {
            events: Vec::new(),
            draw: draw_order(&state.bottles),
        };
        let commands = build_draw_list(&state, &report, &NoSprites);
        let Some(DrawCommand::Bottle { rotation, .. }) = commands
            .iter()
            .find(|c| matches!(c, DrawCommand::Bottle { .. }))
        else {
            panic!("bottle missing from draw list");
        };
        assert!((rotation - bottle.rotation.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_idle_frame_is_just_the_player() {
        let state = GameState::new(SessionConfig::default(), BottleCatalog::default());
        let commands = build_draw_list(&state, &FrameReport::default(), &NoSprites);
        assert_eq!(commands.len(), 1);
        assert_eq!(player_index(&commands), 0);
    }
}
