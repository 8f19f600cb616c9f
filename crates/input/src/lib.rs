//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. Maps `crossterm` key events into
//! [`crate::types::GameAction`] and provides a DAS/ARR input handler suitable
//! for terminals, including ones without key-release events.

pub mod handler;
pub mod map;

pub use neon_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_help_key, should_quit, KEY_BINDINGS};
