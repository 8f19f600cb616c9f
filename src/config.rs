//! Runtime configuration read from the environment.
//!
//! | Variable                 | Meaning                           | Default            |
//! |--------------------------|-----------------------------------|--------------------|
//! | `TETRIS_SEED`            | piece source seed (u32)           | derived from clock |
//! | `TETRIS_RANDOMIZER`      | `bag` or `uniform`                | `bag`              |
//! | `TETRIS_LOCK_DELAY_MS`   | lock delay in milliseconds        | 500                |
//! | `TETRIS_BEST_SCORE_PATH` | best-score file                   | `best_score.dat`   |
//! | `TETRIS_LOG_PATH`        | JSONL event journal (off if unset)| unset              |
//!
//! Values that fail to parse fall back to the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{EngineConfig, GameState, Randomizer, RandomizerKind};
use crate::store::DEFAULT_BEST_SCORE_PATH;
use crate::types::LOCK_DELAY_S;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: u32,
    pub randomizer: RandomizerKind,
    pub lock_delay_ms: u32,
    pub best_score_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: RandomizerKind::Bag,
            lock_delay_ms: (LOCK_DELAY_S * 1000.0) as u32,
            best_score_path: PathBuf::from(DEFAULT_BEST_SCORE_PATH),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup, so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let seed = get("TETRIS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let randomizer = get("TETRIS_RANDOMIZER")
            .and_then(|s| RandomizerKind::from_str(&s))
            .unwrap_or(defaults.randomizer);

        let lock_delay_ms = get("TETRIS_LOCK_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.lock_delay_ms);

        let best_score_path = get("TETRIS_BEST_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.best_score_path);

        let log_path = get("TETRIS_LOG_PATH").map(PathBuf::from);

        Self {
            seed,
            randomizer,
            lock_delay_ms,
            best_score_path,
            log_path,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default().with_lock_delay_s(self.lock_delay_ms as f32 / 1000.0)
    }

    /// A fresh engine wired to this configuration.
    pub fn build_game(&self, best_score: u64) -> GameState {
        GameState::with_config(
            Randomizer::new(self.randomizer, self.seed),
            self.engine_config(),
        )
        .with_best_score(best_score)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_every_variable() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("TETRIS_SEED", "42"),
            ("TETRIS_RANDOMIZER", "uniform"),
            ("TETRIS_LOCK_DELAY_MS", "0"),
            ("TETRIS_BEST_SCORE_PATH", "/tmp/best"),
            ("TETRIS_LOG_PATH", " /tmp/journal.jsonl "),
        ]));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.randomizer, RandomizerKind::Uniform);
        assert_eq!(cfg.lock_delay_ms, 0);
        assert_eq!(cfg.best_score_path, PathBuf::from("/tmp/best"));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/journal.jsonl")));
        assert_eq!(cfg.engine_config().lock_delay_s, 0.0);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("TETRIS_RANDOMIZER", "tetris-master"),
            ("TETRIS_LOCK_DELAY_MS", "-3"),
            ("TETRIS_LOG_PATH", "   "),
        ]));
        assert_eq!(cfg.randomizer, RandomizerKind::Bag);
        assert_eq!(cfg.lock_delay_ms, 500);
        assert_eq!(cfg.best_score_path, PathBuf::from("best_score.dat"));
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn build_game_carries_best_and_lock_delay() {
        let cfg = AppConfig {
            lock_delay_ms: 250,
            ..AppConfig::default()
        };
        let game = cfg.build_game(99);
        assert_eq!(game.best_score(), 99);
        assert!((game.config().lock_delay_s - 0.25).abs() < 1e-6);
    }
}
