//! Fixed timestep simulation tick
//!
//! One call per rendered frame. Order within a frame:
//! 1. pause handling
//! 2. player movement
//! 3. hand spawners (previews and throws)
//! 4. every bottle advances once
//! 5. each bottle is resolved against the player using its post-update state
//! 6. resolved bottles are removed and the draw order is reported

use super::collision::check_hit;
use super::projectile::{Behavior, Flight, Projectile};
use super::spawn::SpawnEvent;
use super::state::{DEFAULT_SCORE_GAIN, GameEvent, GamePhase, GameState, Stance};
use crate::consts::*;

/// How far ahead (in depth) the autopilot starts reacting
const AUTOPILOT_LOOKAHEAD: f32 = 0.1;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal movement in [-1, 1]
    pub move_x: f32,
    /// Jump (ignored while airborne)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI dodges on its own
    pub idle_mode: bool,
}

/// Painter's order for this frame: `behind`, then the player, then `front`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOrder {
    /// Bottle ids, farthest first
    pub behind: Vec<u32>,
    pub front: Vec<u32>,
}

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub draw: DrawOrder,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameReport {
    let mut report = FrameReport::default();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        report.draw = draw_order(&state.bottles);
        return report;
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    let now = state.time_ticks;
    let viewport = state.viewport;

    state.player.update(&input, SIM_DT, &viewport);

    let spawns = state
        .spawner
        .step(now, state.score.score, &state.catalog, &mut state.rng);
    for spawn in spawns {
        match spawn {
            SpawnEvent::PreviewStarted { hand, type_id } => {
                report.events.push(GameEvent::PreviewShown { hand, type_id });
            }
            SpawnEvent::Throw {
                hand,
                type_id,
                from_preview,
            } => {
                if let Some(bottle_id) = state.throw_bottle(hand, type_id, from_preview) {
                    report.events.push(GameEvent::Thrown {
                        hand,
                        bottle_id,
                        type_id,
                    });
                }
            }
        }
    }

    // Advance everything before anything is resolved
    let flights: Vec<Flight> = state
        .bottles
        .iter_mut()
        .map(|bottle| bottle.update(&viewport))
        .collect();

    let stance = state.player.stance;
    let player_rect = state.player.rect();
    let player_center = player_rect.center();
    let mut game_over = false;

    for (bottle, flight) in state.bottles.iter_mut().zip(flights) {
        // The session ended on an earlier bottle this frame
        if game_over {
            break;
        }
        if check_hit(bottle, stance, &player_rect, &state.zones, &viewport) {
            if let Some(outcome) = state.rules.register_hit(&mut state.score, bottle) {
                log::debug!("Hit by bottle {}, {} lives left", bottle.id, outcome.lives_left);
                report.events.push(GameEvent::Hit {
                    bottle_id: bottle.id,
                    type_id: bottle.type_id,
                    lives_left: outcome.lives_left,
                });
                game_over |= outcome.game_over;
            }
        } else if flight == Flight::Finished {
            let base_points = state
                .catalog
                .get(bottle.type_id)
                .map(|c| c.score_gain)
                .unwrap_or(DEFAULT_SCORE_GAIN);
            if let Some(award) =
                state
                    .rules
                    .award_dodge(&mut state.score, bottle, base_points, player_center, stance)
            {
                report.events.push(GameEvent::Dodged {
                    bottle_id: bottle.id,
                    type_id: bottle.type_id,
                    points: award.points,
                    close_call: award.close_call,
                    combo: award.combo,
                });
            }
        }
    }

    state.bottles.retain(|bottle| !bottle.is_resolved());

    if game_over {
        state.phase = GamePhase::GameOver;
        let result = state.final_result();
        log::info!(
            "Game over after {:.1}s with {} points",
            result.survival_secs,
            result.score
        );
        report.events.push(GameEvent::GameOver {
            survival_secs: result.survival_secs,
            score: result.score,
        });
    }

    report.draw = draw_order(&state.bottles);
    report
}

/// Split bottles around the player by depth, each side sorted far to near
pub fn draw_order(bottles: &[Projectile]) -> DrawOrder {
    let mut sorted: Vec<&Projectile> = bottles.iter().collect();
    sorted.sort_by(|a, b| a.z.total_cmp(&b.z).then(a.id.cmp(&b.id)));

    let mut order = DrawOrder::default();
    for bottle in sorted {
        if bottle.z < PLAYER_DEPTH {
            order.behind.push(bottle.id);
        } else {
            order.front.push(bottle.id);
        }
    }
    order
}

/// Demo-mode input: jump over incoming ground bottles, drift back to center
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let player = &state.player;
    let rect = player.rect();

    let incoming = |behavior: Behavior| {
        let band = state.zones.band(match behavior {
            Behavior::Ground => Stance::Grounded,
            Behavior::Air => Stance::Airborne,
        });
        state.bottles.iter().any(|bottle| {
            if bottle.behavior != behavior || bottle.is_resolved() {
                return false;
            }
            if bottle.z < band.start - AUTOPILOT_LOOKAHEAD || bottle.z > band.end {
                return false;
            }
            let landing = bottle.landing_point();
            let reach = (rect.size().x + bottle.hitbox(&state.viewport).size().x) * 0.5;
            (landing.x - player.pos.x).abs() < reach
        })
    };

    input.jump = incoming(Behavior::Ground) && !incoming(Behavior::Air);

    let center_x = state.viewport.width * 0.5;
    let offset = center_x - player.pos.x;
    input.move_x = if offset.abs() > rect.size().x * 0.25 {
        (offset / (state.viewport.width * 0.1)).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    input
}
