//! High-Score Table
//!
//! A persisted top-10 ranked by score (descending) then completion time
//! (ascending - faster runs win ties). Stored as pretty JSON next to the
//! game.
//!
//! Loading is lenient: a missing file starts an empty table, a corrupt
//! one is logged and discarded rather than failing the session. Only
//! writes surface errors.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Maximum number of entries kept on disk.
pub const MAX_ENTRIES: usize = 10;

/// Errors raised while persisting the table.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The table could not be written
    #[error("failed to write high scores: {0}")]
    Io(#[from] std::io::Error),

    /// The table could not be serialized
    #[error("failed to serialize high scores: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One finished session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name
    pub name: String,
    /// Final score
    pub score: u32,
    /// Items collected
    pub collected: u32,
    /// Completion time in seconds
    pub time_seconds: f64,
    /// When the session finished
    pub date: DateTime<Utc>,
}

/// The ranked table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    /// Load the table from a JSON file.
    ///
    /// Missing file: empty table. Corrupt file: warn and start empty,
    /// matching the game's "never block a session on score data" rule.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str::<Vec<HighScoreEntry>>(&data) {
            Ok(entries) => {
                let mut table = Self { entries };
                table.sort_and_truncate();
                table
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt high-score file, starting empty");
                Self::default()
            }
        }
    }

    /// Write the table to a JSON file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), ScoreError> {
        self.sort_and_truncate();
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Whether a result would make the table.
    pub fn qualifies(&self, score: u32, time_seconds: f64) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        let worst = &self.entries[MAX_ENTRIES - 1];
        score > worst.score || (score == worst.score && time_seconds < worst.time_seconds)
    }

    /// Add an entry and return its 1-based position, or 0 if it did not
    /// make the table.
    pub fn add(&mut self, name: impl Into<String>, score: u32, collected: u32, time_seconds: f64) -> usize {
        if !self.qualifies(score, time_seconds) {
            return 0;
        }

        let entry = HighScoreEntry {
            name: name.into(),
            score,
            collected,
            time_seconds,
            date: Utc::now(),
        };
        self.entries.push(entry.clone());
        self.sort_and_truncate();

        self.entries
            .iter()
            .position(|e| e == &entry)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Top entries, best first.
    pub fn top(&self, limit: usize) -> &[HighScoreEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sort_and_truncate(&mut self) {
        // Score descending, then time ascending. total_cmp keeps the sort
        // stable even if a hand-edited file contains NaN.
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.time_seconds.total_cmp(&b.time_seconds))
        });
        self.entries.truncate(MAX_ENTRIES);
    }
}

// =============================================================================
// TESTS
// =============================================================================
