//! High score persistence.
//!
//! One small JSON file next to the binary. The driver loads it once at
//! startup and writes it back whenever a game beats the stored value; the
//! core never touches the filesystem.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default store location, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "blockfall_high_score.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Reads and writes the high score file.
///
/// Both operations are deliberately quiet: a missing or corrupt file loads
/// as zero, and a failed write is dropped.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }

    /// Store backed by an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stored high score, or zero when the file is missing or unreadable.
    pub fn load(&self) -> u32 {
        self.read().map(|record| record.high_score).unwrap_or(0)
    }

    /// Persist a new high score, ignoring write errors.
    pub fn save(&self, high_score: u32) {
        let _ = self.write(&HighScoreRecord { high_score });
    }

    fn read(&self) -> Result<HighScoreRecord> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let record = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(record)
    }

    fn write(&self, record: &HighScoreRecord) -> Result<()> {
        let text = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(tag: &str) -> ScoreStore {
        let mut path = env::temp_dir();
        path.push(format!("blockfall_test_{}_{}.json", tag, std::process::id()));
        let _ = fs::remove_file(&path);
        ScoreStore::at(path)
    }

    #[test]
    fn test_load_defaults_to_zero_when_file_missing() {
        let store = temp_store("missing");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let store = temp_store("round_trip");
        store.save(1280);
        assert_eq!(store.load(), 1280);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_load_defaults_to_zero_on_garbage() {
        let store = temp_store("garbage");
        fs::write(&store.path, "not json at all").unwrap();
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let store = temp_store("overwrite");
        store.save(10);
        store.save(250);
        assert_eq!(store.load(), 250);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_stored_file_is_json() {
        let store = temp_store("format");
        store.save(99);
        let text = fs::read_to_string(&store.path).unwrap();
        let record: HighScoreRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(record, HighScoreRecord { high_score: 99 });
        let _ = fs::remove_file(&store.path);
    }
}
