//! Engine tuning knobs.

use crate::types::{
    BASE_FALL_INTERVAL_S, FALL_INTERVAL_STEP_S, LOCK_DELAY_S, MAX_FRAME_DELTA_S,
    MIN_FALL_INTERVAL_S,
};

/// Timing parameters for one engine instance. All values are seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Grace period before a grounded piece locks. `0.0` locks as soon as
    /// gravity fails to move the piece.
    pub lock_delay_s: f32,
    pub base_fall_interval_s: f32,
    pub fall_interval_step_s: f32,
    pub min_fall_interval_s: f32,
    /// Largest delta accepted by one `update` call.
    pub max_frame_delta_s: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_delay_s: LOCK_DELAY_S,
            base_fall_interval_s: BASE_FALL_INTERVAL_S,
            fall_interval_step_s: FALL_INTERVAL_STEP_S,
            min_fall_interval_s: MIN_FALL_INTERVAL_S,
            max_frame_delta_s: MAX_FRAME_DELTA_S,
        }
    }
}

impl EngineConfig {
    pub fn with_lock_delay_s(mut self, lock_delay_s: f32) -> Self {
        self.lock_delay_s = lock_delay_s.max(0.0);
        self
    }
}
