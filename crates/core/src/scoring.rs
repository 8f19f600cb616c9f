//! Scoring module - line clear, combo and level math
//!
//! - A clear of `n` lines scores `n² × 2^(level-1)`.
//! - The combo counter counts consecutive locks that cleared at least one
//!   line. From the second such lock on, a bonus of `2^(combo-1) × level²` is
//!   added.
//! - Level is `lines / 10 + 1` and only ever rises.
//! - Gravity is `max(floor, base - (level-1) × step)` seconds per row.
//!
//! All point values are `u64` with saturating arithmetic so absurd levels and
//! combos pin at `u64::MAX` instead of wrapping.

use crate::config::EngineConfig;
use crate::types::LINES_PER_LEVEL;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub line_score: u64,
    pub combo_bonus: u64,
    pub total: u64,
}

/// `2^exp`, saturating.
fn pow2(exp: u32) -> u64 {
    1u64.checked_shl(exp).unwrap_or(u64::MAX)
}

/// Points for clearing `lines` rows at `level` (1-based).
pub fn calculate_line_score(lines: u32, level: u32) -> u64 {
    if lines == 0 {
        return 0;
    }
    let n = lines as u64;
    (n * n).saturating_mul(pow2(level.saturating_sub(1)))
}

/// Bonus for the `combo`-th consecutive clearing lock.
///
/// Zero for the first clear of a chain.
pub fn calculate_combo_bonus(combo: u32, level: u32) -> u64 {
    if combo <= 1 {
        return 0;
    }
    let level = level as u64;
    pow2(combo - 1).saturating_mul(level.saturating_mul(level))
}

/// Complete score for one lock.
///
/// `combo` is the counter value *after* this lock was counted.
pub fn calculate_score(lines: u32, level: u32, combo: u32) -> ScoreResult {
    if lines == 0 {
        return ScoreResult::default();
    }
    let line_score = calculate_line_score(lines, level);
    let combo_bonus = calculate_combo_bonus(combo, level);
    ScoreResult {
        line_score,
        combo_bonus,
        total: line_score.saturating_add(combo_bonus),
    }
}

/// Level for a running line total (starts at 1).
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Seconds per gravity row at `level`.
pub fn fall_interval_s(level: u32, config: &EngineConfig) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (config.base_fall_interval_s - steps * config.fall_interval_step_s)
        .max(config.min_fall_interval_s)
}
