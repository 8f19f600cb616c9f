//! JSONL event journal.
//!
//! One JSON object per line, tagged by `type`. The journal is strictly
//! best-effort: if the file cannot be opened the caller gets an error and
//! usually falls back to [`EventJournal::disabled`]; if a write fails later the
//! journal closes itself and every further record is dropped.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::GameEvents;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    SessionStart {
        session_id: u32,
        seed: u32,
        randomizer: &'static str,
        best_score: u64,
    },
    Lock {
        session_id: u32,
        kind: &'static str,
        lines_cleared: u32,
        line_score: u64,
        combo: u32,
        combo_bonus: u64,
        level: u32,
    },
    LevelUp {
        session_id: u32,
        level: u32,
    },
    NewBest {
        session_id: u32,
        score: u64,
    },
    GameOver {
        session_id: u32,
        score: u64,
        lines: u32,
        level: u32,
    },
}

/// Totals the journal needs alongside a frame's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTotals {
    pub session_id: u32,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
}

#[derive(Debug)]
pub struct EventJournal {
    out: Option<BufWriter<File>>,
    buf: Vec<u8>,
    written: u64,
}

impl EventJournal {
    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open journal {}", path.display()))?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
            buf: Vec::with_capacity(256),
            written: 0,
        })
    }

    /// A journal that drops everything.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            written: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Records successfully handed to the writer.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn record(&mut self, record: &JournalRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
            return;
        }
        self.written += 1;
    }

    /// Translate one frame's events into records and flush them.
    pub fn record_events(&mut self, events: &GameEvents, totals: SessionTotals) {
        if self.out.is_none() || events.is_empty() {
            return;
        }
        let session_id = totals.session_id;

        for lock in &events.locks {
            self.record(&JournalRecord::Lock {
                session_id,
                kind: lock.kind.as_str(),
                lines_cleared: lock.lines_cleared,
                line_score: lock.line_score,
                combo: lock.combo,
                combo_bonus: lock.combo_bonus,
                level: lock.level,
            });
        }
        if events.leveled_up {
            self.record(&JournalRecord::LevelUp {
                session_id,
                level: totals.level,
            });
        }
        if events.new_best {
            self.record(&JournalRecord::NewBest {
                session_id,
                score: totals.score,
            });
        }
        if events.game_over {
            self.record(&JournalRecord::GameOver {
                session_id,
                score: totals.score,
                lines: totals.lines,
                level: totals.level,
            });
        }
        self.flush();
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }
}

impl Default for EventJournal {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Drop for EventJournal {
    fn drop(&mut self) {
        self.flush();
    }
}
