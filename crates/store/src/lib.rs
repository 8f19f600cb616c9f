//! Host-side persistence: the best-score file and the JSONL event journal.
//!
//! Nothing here is needed to simulate a game. Every failure is absorbed at
//! this boundary so a read-only disk never interrupts play.

pub mod best_score;
pub mod journal;

pub use neon_tetris_types as types;

pub use best_score::{BestScoreStore, DEFAULT_BEST_SCORE_PATH};
pub use journal::{EventJournal, JournalRecord, SessionTotals};

#[cfg(test)]
pub(crate) mod test_util {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    /// Unique path under the system temp dir.
    pub fn scratch_path(tag: &str) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "neon-tetris-store-{}-{}-{}",
            std::process::id(),
            tag,
            n
        ))
    }
}
