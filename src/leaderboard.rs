//! Leaderboard
//!
//! Persisted as `{"scores": [{"username": ..., "score": ...}]}`, sorted
//! descending by score. Keeps the top 10.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;
/// Usernames longer than this are truncated
pub const MAX_USERNAME_LEN: usize = 12;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u64,
}

/// Top scores, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub scores: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.scores.len() < MAX_ENTRIES {
            return true;
        }
        // Check if score beats the lowest entry
        self.scores.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.scores.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.scores.len()) + 1)
    }

    /// Add a new score (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, username: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            username: clean_username(username),
            score,
        };

        // Ties go after existing entries with the same score
        let pos = self.scores.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.scores.insert(i, entry);
                i + 1
            }
            None => {
                self.scores.push(entry);
                self.scores.len()
            }
        };

        self.scores.truncate(MAX_ENTRIES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.scores.first().map(|e| e.score)
    }

    /// Load from `path`. Missing file is an empty board; a malformed one is
    /// logged and treated as empty.
    pub fn load(path: &Path) -> Self {
        let mut board: Self = persistence::load_or_default(path, "leaderboard");
        board.normalize();
        board
    }

    /// Write to `path`, sorted best first
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let mut sorted = self.clone();
        sorted.normalize();
        persistence::save_json(path, &sorted)?;
        log::info!("Leaderboard saved ({} entries)", sorted.scores.len());
        Ok(())
    }

    /// Re-establish ordering, name and size limits (for hand-edited files)
    fn normalize(&mut self) {
        for entry in &mut self.scores {
            entry.username = clean_username(&entry.username);
        }
        // Stable sort keeps earlier entries first on ties
        self.scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.scores.truncate(MAX_ENTRIES);
    }
}

/// Trim whitespace and cap the length (in characters)
fn clean_username(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "???".to_string();
    }
    trimmed.chars().take(MAX_USERNAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(board: &Leaderboard) -> Vec<(&str, u64)> {
        board
            .scores
            .iter()
            .map(|e| (e.username.as_str(), e.score))
            .collect()
    }

    /// Three scores in arbitrary order come back best first
    #[test]
    fn test_sorted_descending() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_score("p1", 500), Some(1));
        assert_eq!(board.add_score("p2", 900), Some(1));
        assert_eq!(board.add_score("p3", 700), Some(2));
        assert_eq!(order(&board), vec![("p2", 900), ("p3", 700), ("p1", 500)]);
        assert_eq!(board.top_score(), Some(900));
    }

    #[test]
    fn test_keeps_top_entries() {
        let mut board = Leaderboard::new();
        for i in 1..=12 {
            board.add_score("x", i * 100);
        }
        assert_eq!(board.scores.len(), MAX_ENTRIES);
        assert_eq!(board.scores.last().map(|e| e.score), Some(300));
        assert!(!board.qualifies(300));
        assert_eq!(board.potential_rank(301), Some(10));
        assert_eq!(board.add_score("low", 50), None);
    }

    #[test]
    fn test_zero_score_does_not_qualify() {
        let board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert!(board.is_empty());
    }

    #[test]
    fn test_ties_keep_earlier_first() {
        let mut board = Leaderboard::new();
        board.add_score("first", 100);
        assert_eq!(board.add_score("second", 100), Some(2));
        assert_eq!(order(&board), vec![("first", 100), ("second", 100)]);
    }

    #[test]
    fn test_username_is_cleaned() {
        let mut board = Leaderboard::new();
        board.add_score("  averyveryverylongname  ", 10);
        board.add_score("   ", 5);
        assert_eq!(board.scores[0].username, "averyveryver");
        assert_eq!(board.scores[1].username, "???");
    }

    #[test]
    fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let mut board = Leaderboard::new();
        board.add_score("p1", 500);
        board.add_score("p2", 900);
        board.save(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["scores"][0]["username"], "p2");
        assert_eq!(json["scores"][0]["score"], 900);
        assert_eq!(json["scores"][1]["username"], "p1");

        assert_eq!(Leaderboard::load(&path), board);
    }

    #[test]
    fn test_load_missing_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Leaderboard::load(&dir.path().join("missing.json")).is_empty());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"scores\": \"lots\"}").unwrap();
        assert!(Leaderboard::load(&path).is_empty());
    }

    #[test]
    fn test_load_sorts_hand_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        std::fs::write(
            &path,
            r#"{"scores": [{"username": "a", "score": 1}, {"username": "b", "score": 3}]}"#,
        )
        .unwrap();
        let board = Leaderboard::load(&path);
        assert_eq!(order(&board), vec![("b", 3), ("a", 1)]);
    }
}
