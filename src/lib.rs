//! Neon Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benches can use `neon_tetris::{core, input, store, term, types}`.
//! The host-side configuration lives here in [`config`], and the help screen
//! toggle in [`help`].

pub mod config;
pub mod help;

pub use neon_tetris_core as core;
pub use neon_tetris_input as input;
pub use neon_tetris_store as store;
pub use neon_tetris_term as term;
pub use neon_tetris_types as types;

pub use config::AppConfig;
pub use help::HelpScreen;
