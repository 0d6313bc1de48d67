use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "gridsnake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Errors raised by the score store. Always recovered by the caller; a
/// failing store never alters game state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// One finished round's result.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Unix epoch milliseconds at the time the round ended.
    pub timestamp_ms: u64,
}

/// Persistent history of past round scores.
///
/// The round controller only ever calls [`add`]; `top_n` and `clear` serve
/// the frontend's history display and its reset button.
///
/// [`add`]: ScoreStore::add
pub trait ScoreStore {
    fn add(&mut self, score: u32) -> Result<(), StoreError>;
    /// Best scores first, at most `limit` entries.
    fn top_n(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Score history persisted as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Creates a store backed by the platform-default location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: default_scores_path(),
        }
    }

    /// Creates a store backed by an explicit file path.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        load_entries(&self.path)
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        save_entries(&self.path, entries)
    }
}

impl Default for JsonScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for JsonScoreStore {
    fn add(&mut self, score: u32) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.push(ScoreEntry {
            score,
            timestamp_ms: unix_epoch_ms(),
        });
        self.save(&entries)
    }

    fn top_n(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut entries = self.load()?;
        // Ties rank the more recent round first.
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.timestamp_ms.cmp(&a.timestamp_ms))
        });
        entries.truncate(limit);
        Ok(entries)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.save(&[])
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads the score history; a missing file reads as an empty history.
fn load_entries(path: &Path) -> Result<Vec<ScoreEntry>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn save_entries(path: &Path, entries: &[ScoreEntry]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}

fn unix_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
