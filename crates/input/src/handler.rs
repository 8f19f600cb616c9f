//! DAS/ARR input handler for terminal environments.
//!
//! Durations are seconds. Holding left/right repeats the move after the DAS
//! delay at the ARR rate; holding down repeats soft drop at a fixed rate with
//! no delay. Terminals that never emit key-release events are handled by a
//! timeout: a held key that has not been seen for a while counts as released.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent};

use crate::map::handle_key_event;
use crate::types::{GameAction, DEFAULT_ARR_S, DEFAULT_DAS_S, SOFT_DROP_ARR_S};

/// Repeats produced by one `update` call.
pub type RepeatActions = ArrayVec<GameAction, 32>;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    /// Seconds since the last held-key press was seen.
    idle_s: f32,
    horizontal_das_timer: f32,
    horizontal_arr_accumulator: f32,
    down_arr_accumulator: f32,
    das_delay_s: f32,
    arr_rate_s: f32,
    key_release_timeout_s: f32,
}

// Terminals repeat a held key roughly every 30-50ms, so a held key is refreshed
// well inside this window while a single tap expires quickly.
const DEFAULT_KEY_RELEASE_TIMEOUT_S: f32 = 0.15;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_S, DEFAULT_ARR_S)
    }

    pub fn with_config(das_delay_s: f32, arr_rate_s: f32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            idle_s: 0.0,
            horizontal_das_timer: 0.0,
            horizontal_arr_accumulator: 0.0,
            down_arr_accumulator: 0.0,
            das_delay_s,
            // A zero rate would repeat forever.
            arr_rate_s: arr_rate_s.max(0.001),
            key_release_timeout_s: DEFAULT_KEY_RELEASE_TIMEOUT_S,
        }
    }

    pub fn with_key_release_timeout_s(mut self, timeout_s: f32) -> Self {
        self.key_release_timeout_s = timeout_s;
        self
    }

    pub fn key_release_timeout_s(&self) -> f32 {
        self.key_release_timeout_s
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Register a key press. Returns the immediate action for a fresh
    /// movement press; repeats of an already held key return `None`, and so do
    /// keys chorded with Ctrl or Alt.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        match handle_key_event(key)? {
            GameAction::MoveLeft => {
                self.idle_s = 0.0;
                self.press_horizontal(HorizontalDirection::Left)
                    .then_some(GameAction::MoveLeft)
            }
            GameAction::MoveRight => {
                self.idle_s = 0.0;
                self.press_horizontal(HorizontalDirection::Right)
                    .then_some(GameAction::MoveRight)
            }
            GameAction::SoftDrop => {
                self.idle_s = 0.0;
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_arr_accumulator = 0.0;
                    Some(GameAction::SoftDrop)
                }
            }
            _ => None,
        }
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> bool {
        if self.horizontal == direction {
            return false;
        }
        self.horizontal = direction;
        self.horizontal_das_timer = 0.0;
        self.horizontal_arr_accumulator = 0.0;
        true
    }

    /// Register a key release. Modifiers are ignored so a key let go while
    /// Ctrl is down still stops repeating.
    pub fn handle_key_release(&mut self, key: KeyEvent) {
        match handle_key_event(KeyEvent::from(key.code)) {
            Some(GameAction::MoveLeft) if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            Some(GameAction::MoveRight) if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            Some(GameAction::SoftDrop) => self.release_down(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_das_timer = 0.0;
        self.horizontal_arr_accumulator = 0.0;
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_arr_accumulator = 0.0;
    }

    /// Advance held-key timers by `elapsed_s` and return the repeats due.
    pub fn update(&mut self, elapsed_s: f32) -> RepeatActions {
        let mut actions = RepeatActions::new();
        let elapsed_s = elapsed_s.max(0.0);

        // Auto-release when terminal does not emit release events.
        self.idle_s += elapsed_s;
        if self.idle_s > self.key_release_timeout_s {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        let repeat = match self.horizontal {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(action) = repeat {
            let prev_das = self.horizontal_das_timer;
            self.horizontal_das_timer += elapsed_s;

            if self.horizontal_das_timer >= self.das_delay_s {
                let excess = if prev_das < self.das_delay_s {
                    self.horizontal_das_timer - self.das_delay_s
                } else {
                    elapsed_s
                };
                self.horizontal_arr_accumulator += excess;

                while self.horizontal_arr_accumulator >= self.arr_rate_s {
                    if actions.try_push(action).is_err() {
                        self.horizontal_arr_accumulator = 0.0;
                        break;
                    }
                    self.horizontal_arr_accumulator -= self.arr_rate_s;
                }
            }
        }

        if self.down_held {
            self.down_arr_accumulator += elapsed_s;
            while self.down_arr_accumulator >= SOFT_DROP_ARR_S {
                if actions.try_push(GameAction::SoftDrop).is_err() {
                    self.down_arr_accumulator = 0.0;
                    break;
                }
                self.down_arr_accumulator -= SOFT_DROP_ARR_S;
            }
        }

        actions
    }

    /// Forget every held key (used on pause, restart and game over).
    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.idle_s = 0.0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(0.125, 0.03125).with_key_release_timeout_s(10.0);

        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(0.0625).is_empty());
        // Exactly at DAS: still nothing accumulated past the delay.
        assert!(ih.update(0.0625).is_empty());

        // First ARR interval after DAS: one repeat.
        assert_eq!(ih.update(0.03125).as_slice(), &[GameAction::MoveLeft]);
        // Two intervals at once: two repeats.
        assert_eq!(
            ih.update(0.0625).as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
    }

    #[test]
    fn test_repeated_press_of_held_key_is_swallowed() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(key(KeyCode::Right)), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(key(KeyCode::Char('d'))), None);
        // Switching direction fires immediately.
        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);
    }

    #[test]
    fn test_default_das_is_170ms() {
        let mut ih = InputHandler::new().with_key_release_timeout_s(10.0);
        ih.handle_key_press(key(KeyCode::Left));

        assert!(ih.update(0.16).is_empty());
        // 0.23s held: past DAS by 0.06, one ARR interval of 0.05.
        assert_eq!(ih.update(0.07).as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut ih = InputHandler::with_config(0.125, 0.03125).with_key_release_timeout_s(0.05);

        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);

        assert!(ih.update(0.0625).is_empty());
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(0.125, 0.03125).with_key_release_timeout_s(0.05);

        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        ih.update(0.03125);
        assert_eq!(ih.handle_key_press(key(KeyCode::Up)), None);

        ih.update(0.03125);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_key_release_stops_repeats() {
        let mut ih = InputHandler::with_config(0.125, 0.03125).with_key_release_timeout_s(10.0);
        ih.handle_key_press(key(KeyCode::Right));
        ih.handle_key_release(key(KeyCode::Left));
        assert_eq!(ih.horizontal(), HorizontalDirection::Right);

        ih.handle_key_release(key(KeyCode::Right));
        assert!(ih.update(1.0).is_empty());
    }

    #[test]
    fn test_soft_drop_repeats_without_delay() {
        let mut ih = InputHandler::new().with_key_release_timeout_s(10.0);

        assert_eq!(ih.handle_key_press(key(KeyCode::Down)), Some(GameAction::SoftDrop));
        assert!(ih.update(0.04).is_empty());

        // 0.06s held: one repeat.
        assert_eq!(ih.update(0.02).as_slice(), &[GameAction::SoftDrop]);

        // Another 0.1s: two repeats.
        assert_eq!(
            ih.update(0.1).as_slice(),
            &[GameAction::SoftDrop, GameAction::SoftDrop]
        );
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(0.125, 0.03125).with_key_release_timeout_s(10.0);

        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert!(!ih.update(0.25).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(0.25).is_empty(), "reset should stop repeats");
        assert!(!ih.down_held());
    }

    #[test]
    fn test_huge_elapsed_is_capped_by_buffer() {
        let mut ih = InputHandler::with_config(0.0, 0.001).with_key_release_timeout_s(1000.0);
        ih.handle_key_press(key(KeyCode::Left));
        let actions = ih.update(10.0);
        assert_eq!(actions.len(), actions.capacity());
    }

    #[test]
    fn test_chorded_keys_do_not_start_a_hold() {
        let mut ih = InputHandler::new().with_key_release_timeout_s(10.0);

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let alt_left = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        let ctrl_down = KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL);
        assert_eq!(ih.handle_key_press(ctrl_a), None);
        assert_eq!(ih.handle_key_press(alt_left), None);
        assert_eq!(ih.handle_key_press(ctrl_down), None);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
        assert!(!ih.down_held());
        assert!(ih.update(1.0).is_empty());

        // Shift is not a chord.
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(ih.handle_key_press(shift_a), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_release_ignores_modifiers() {
        let mut ih = InputHandler::new().with_key_release_timeout_s(10.0);
        ih.handle_key_press(key(KeyCode::Left));
        ih.handle_key_release(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }
}
