//! High score leaderboard
//!
//! Persisted as a JSON file, kept sorted descending by score. No dedup and
//! no cap at the data level; presentation truncates via [`HighScores::top`].

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append an entry and restore descending score order
    ///
    /// Zero scores are not recorded. Insertion keeps earlier entries ahead of
    /// later ones with the same score.
    pub fn add(&mut self, name: &str, score: u64) {
        if score == 0 {
            return;
        }
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            HighScoreEntry {
                name: name.to_string(),
                score,
            },
        );
    }

    /// The first `n` entries, highest score first
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..self.entries.len().min(n)]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest recorded score, if any
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from a JSON file; an unreadable or missing file is an empty list
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(mut scores) => {
                    // Files written by hand may be unsorted
                    scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                    log::info!("loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("malformed high score file {}: {e}", path.display());
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no high scores at {}, starting fresh", path.display());
                Self::new()
            }
        }
    }

    /// Save to a JSON file; failures are logged, never fatal
    pub fn save(&self, path: &Path) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("failed to save high scores to {}: {e}", path.display());
                } else {
                    log::info!("high scores saved ({} entries)", self.entries.len());
                }
            }
            Err(e) => log::warn!("failed to serialize high scores: {e}"),
        }
    }
}
