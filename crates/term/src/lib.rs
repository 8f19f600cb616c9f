//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer. It avoids widget toolkits and
//! renders into a framebuffer that is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Precise control over aspect ratio (2 columns per board cell)

pub mod fb;
pub mod game_view;
pub mod notices;
pub mod renderer;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Viewport};
pub use notices::{Notice, Notices};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
