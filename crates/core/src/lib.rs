//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, terminals, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or scripted source) produces identical games
//! - **Testable**: Unit tests for every rule, plus injectable piece sources
//! - **Portable**: The host supplies frame deltas and commands, nothing else
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 board with a 2-row hidden buffer, collision, line clearing
//! - [`piece`]: The active falling piece value type
//! - [`pieces`]: Tetromino shapes and SRS rotation with wall kicks
//! - [`rng`]: Piece sources (7-bag, uniform, scripted)
//! - [`scoring`]: Line, combo, level and gravity math
//! - [`config`]: Engine timing knobs
//! - [`game_state`]: The engine itself
//! - [`snapshot`]: Read-only frame view for renderers
//!
//! # Game Rules
//!
//! - **SRS Rotation**: Super Rotation System kicks for every kind except O,
//!   which does not rotate
//! - **Lock Delay**: 0.5s before a grounded piece locks; rotations reset it up
//!   to 15 times per piece
//! - **Ghost Piece**: Where the current piece will land
//! - **Scoring**: `n² × 2^(level-1)` per clear, plus a doubling combo bonus
//! - **Levels**: One per 10 lines; gravity speeds up 0.08s per level down to 0.08s
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::GameState;
//! use neon_tetris_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), Phase::Start);
//! game.apply_action(GameAction::Start);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! let events = game.take_events();
//! assert_eq!(events.locks.len(), 1);
//! assert_eq!(game.score(), 0); // drops award nothing
//! ```
//!
//! # Timing
//!
//! Call [`GameState::update`](game_state::GameState::update) once per frame
//! with the elapsed seconds. Deltas are clamped to 0.05s so a stalled host
//! never drops a piece several rows at once.

pub mod board;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use neon_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use game_state::GameState;
pub use piece::Tetromino;
pub use pieces::{get_shape, try_rotate};
pub use rng::{
    BagRandomizer, PieceSource, Randomizer, RandomizerKind, ScriptedSource, SimpleRng,
    UniformRandomizer,
};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
