//! Best-score persistence.
//!
//! The file holds a single decimal integer. Reading tolerates surrounding
//! whitespace; anything unreadable counts as no record.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default file name, relative to the working directory.
pub const DEFAULT_BEST_SCORE_PATH: &str = "best_score.dat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestScoreStore {
    path: PathBuf,
    /// Highest value known to be on disk.
    recorded: u64,
}

impl BestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recorded: 0,
        }
    }

    /// Store for `path`, primed with whatever record the file already holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        store.recorded = store.load();
        store
    }

    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recorded best, reporting why it could not be read.
    pub fn try_load(&self) -> Result<u64> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let best = text
            .trim()
            .parse::<u64>()
            .with_context(|| format!("parse best score in {}", self.path.display()))?;
        Ok(best)
    }

    /// Recorded best, or 0 when the file is missing or malformed.
    pub fn load(&self) -> u64 {
        self.try_load().unwrap_or(0)
    }

    pub fn try_save(&self, best: u64) -> Result<()> {
        fs::write(&self.path, best.to_string())
            .with_context(|| format!("write {}", self.path.display()))
    }

    /// Overwrite the record. Failures are ignored; the game keeps running.
    pub fn save(&self, best: u64) {
        let _ = self.try_save(best);
    }

    /// Write `best` only if it beats the value already on disk.
    ///
    /// Returns true when the file was updated. A failed write leaves
    /// `recorded` alone so a later call retries.
    pub fn record(&mut self, best: u64) -> bool {
        if best <= self.recorded || self.try_save(best).is_err() {
            return false;
        }
        self.recorded = best;
        true
    }
}

impl Default for BestScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_BEST_SCORE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::scratch_path;

    #[test]
    fn missing_file_loads_zero() {
        let store = BestScoreStore::new(scratch_path("missing"));
        assert_eq!(store.load(), 0);
        assert!(store.try_load().is_err());
    }

    #[test]
    fn save_then_load() {
        let path = scratch_path("roundtrip");
        let store = BestScoreStore::new(&path);
        store.save(4242);
        assert_eq!(store.load(), 4242);
        assert_eq!(fs::read_to_string(&path).unwrap(), "4242");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn whitespace_is_tolerated_and_garbage_is_zero() {
        let path = scratch_path("format");
        let store = BestScoreStore::new(&path);

        fs::write(&path, " 17\n").unwrap();
        assert_eq!(store.load(), 17);

        fs::write(&path, "not a number").unwrap();
        assert_eq!(store.load(), 0);

        fs::write(&path, "-5").unwrap();
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn record_only_writes_improvements() {
        let path = scratch_path("record");
        fs::write(&path, "50").unwrap();
        let mut store = BestScoreStore::open(&path);
        assert_eq!(store.recorded(), 50);

        assert!(!store.record(50));
        assert!(!store.record(12));
        assert_eq!(fs::read_to_string(&path).unwrap(), "50");

        assert!(store.record(51));
        assert_eq!(store.recorded(), 51);
        assert_eq!(store.load(), 51);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn failed_record_is_retried() {
        let mut store = BestScoreStore::open(scratch_path("no-such-dir").join("best.dat"));
        assert_eq!(store.recorded(), 0);
        assert!(!store.record(10));
        assert_eq!(store.recorded(), 0);
    }

    #[test]
    fn save_to_unwritable_path_is_silent() {
        let store = BestScoreStore::new(scratch_path("no-such-dir").join("best.dat"));
        store.save(10);
        assert!(store.try_save(10).is_err());
    }
}
