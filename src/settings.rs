//! Game settings and preferences
//!
//! Persisted as JSON next to the leaderboard. Every field has a default, so
//! partial or older files still load.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH, STARTING_LIVES};
use crate::persistence::{self, PersistError};
use crate::sim::{HandProfile, SessionConfig, Viewport};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Multiplier on spawn intervals and throw delays (higher is gentler)
    pub fn pace(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.75,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "med" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded on the leaderboard
    pub username: String,
    pub difficulty: Difficulty,

    // === Display ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Session ===
    pub starting_lives: u8,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Autopilot session cap for the headless runner (seconds)
    pub demo_seconds: u32,

    // === Files ===
    pub leaderboard_path: PathBuf,
    pub bottle_config_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: "player".to_string(),
            difficulty: Difficulty::Normal,

            screen_width: REFERENCE_WIDTH,
            screen_height: REFERENCE_HEIGHT,

            starting_lives: STARTING_LIVES,
            seed: None,
            demo_seconds: 120,

            leaderboard_path: PathBuf::from("leaderboard.json"),
            bottle_config_path: PathBuf::from("bottle_config.json"),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "settings.json";

    /// Create settings with a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Load settings from `path` (defaults when missing or malformed)
    pub fn load(path: &Path) -> Self {
        persistence::load_or_default(path, "settings")
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.screen_width, self.screen_height)
    }

    /// Session tunables for these settings
    pub fn session_config(&self, seed: u64) -> SessionConfig {
        let pace = self.difficulty.pace();
        SessionConfig {
            seed,
            viewport: self.viewport(),
            lives: self.starting_lives.max(1),
            left: HandProfile::left().paced(pace),
            right: HandProfile::right().paced(pace),
            ..SessionConfig::default()
        }
    }
}
