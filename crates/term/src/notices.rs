//! Short-lived text banners shown beside the board.
//!
//! Notices are derived from [`GameEvents`] by the host after each frame and
//! fade out on their own; the engine never sees them.

use std::collections::VecDeque;

use crate::fb::Rgb;
use crate::types::GameEvents;

/// How long a notice stays on screen.
pub const NOTICE_TTL_S: f32 = 1.5;

/// Most notices kept at once; older ones are dropped first.
pub const MAX_NOTICES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub color: Rgb,
    pub remaining_s: f32,
}

impl Notice {
    /// True during the last third of its lifetime.
    pub fn fading(&self) -> bool {
        self.remaining_s < NOTICE_TTL_S / 3.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    items: VecDeque<Notice>,
    /// Session in which "NEW BEST" was already announced.
    best_announced: Option<u32>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, color: Rgb) {
        if self.items.len() == MAX_NOTICES {
            self.items.pop_front();
        }
        self.items.push_back(Notice {
            text: text.into(),
            color,
            remaining_s: NOTICE_TTL_S,
        });
    }

    /// Turn one frame's events into banners.
    pub fn push_events(&mut self, events: &GameEvents, session_id: u32) {
        for lock in &events.locks {
            if lock.lines_cleared == 0 {
                continue;
            }
            self.push(format!("+{}", lock.line_score), Rgb::new(255, 255, 100));
            if lock.combo > 1 {
                self.push(
                    format!("COMBO x{}! +{}", lock.combo, lock.combo_bonus),
                    Rgb::new(0, 255, 255),
                );
            }
            if lock.lines_cleared == 4 {
                self.push("TETRIS!", Rgb::new(255, 50, 255));
            }
        }
        if events.leveled_up {
            if let Some(level) = events.locks.last().map(|lock| lock.level) {
                self.push(format!("LEVEL {level}"), Rgb::new(120, 255, 120));
            }
        }
        if events.new_best && self.best_announced != Some(session_id) {
            self.best_announced = Some(session_id);
            self.push("NEW BEST", Rgb::new(255, 215, 0));
        }
    }

    /// Age every notice and drop the expired ones.
    pub fn update(&mut self, dt_s: f32) {
        for notice in &mut self.items {
            notice.remaining_s -= dt_s.max(0.0);
        }
        self.items.retain(|n| n.remaining_s > 0.0);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> + '_ {
        self.items.iter()
    }
}
