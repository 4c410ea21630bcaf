//! Bottle Dodge entry point
//!
//! Headless runner: loads settings, catalog and leaderboard, plays one
//! autopilot session at the fixed tick rate and records the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use bottle_dodge::consts::FPS;
    use bottle_dodge::renderer::{NoSprites, build_draw_list};
    use bottle_dodge::sim::{GameEvent, GameState, TickInput, tick};
    use bottle_dodge::{BottleCatalog, Leaderboard, Settings};

    env_logger::init();
    log::info!("Bottle Dodge (headless) starting...");

    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let catalog = BottleCatalog::load(&settings.bottle_config_path);
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!(
        "Difficulty {}, seed {}, {} bottle types",
        settings.difficulty,
        seed,
        catalog.bottle_types.len()
    );

    let mut state = GameState::new(settings.session_config(seed), catalog);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let max_ticks = u64::from(settings.demo_seconds) * u64::from(FPS);

    let mut thrown = 0u32;
    let mut hits = 0u32;
    let mut peak_draw = 0usize;
    while state.time_ticks < max_ticks && !state.is_over() {
        let report = tick(&mut state, &input);
        for event in &report.events {
            match event {
                GameEvent::Thrown { .. } => thrown += 1,
                GameEvent::Hit { lives_left, .. } => {
                    hits += 1;
                    log::info!("Hit! {} lives left", lives_left);
                }
                GameEvent::Dodged {
                    points, close_call, ..
                } if *close_call => {
                    log::debug!("Close call for {} points", points);
                }
                _ => {}
            }
        }
        peak_draw = peak_draw.max(build_draw_list(&state, &report, &NoSprites).len());
    }

    let result = state.final_result();
    log::info!(
        "Session finished: {} points, {:.1}s, {} thrown, {} dodged ({} close), {} hits",
        result.score,
        result.survival_secs,
        thrown,
        result.dodges,
        result.close_calls,
        hits
    );
    log::debug!("Largest draw list: {} commands", peak_draw);

    let mut leaderboard = Leaderboard::load(&settings.leaderboard_path);
    match leaderboard.add_score(&settings.username, result.score) {
        Some(rank) => {
            log::info!("New leaderboard entry at rank {}", rank);
            if let Err(e) = leaderboard.save(&settings.leaderboard_path) {
                log::error!("Failed to save leaderboard: {}", e);
            }
        }
        None => log::info!("Score did not make the leaderboard"),
    }

    println!(
        "{}: {} points in {:.1}s ({} dodges, {} close calls)",
        settings.username, result.score, result.survival_secs, result.dodges, result.close_calls
    );
    for (i, entry) in leaderboard.scores.iter().enumerate() {
        println!("{:>2}. {:<12} {}", i + 1, entry.username, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is usable from wasm; there is no browser host
}
