//! Shared data structures and constants
//!
//! Everything in this crate is plain data with no external dependencies, so it
//! can be used by the simulation core, the terminal front end and the stores
//! alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19)
//! - **Buffer**: 2 hidden rows above the visible area (rows -1 and -2)
//!
//! # Timing
//!
//! All simulation durations are real-valued seconds advanced by the frame
//! delta, never frame counts:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_INTERVAL_S` | 1.0 | Seconds per row at level 1 |
//! | `FALL_INTERVAL_STEP_S` | 0.08 | Speed-up per level |
//! | `MIN_FALL_INTERVAL_S` | 0.08 | Fastest gravity |
//! | `LOCK_DELAY_S` | 0.5 | Grace period for a grounded piece |
//! | `MAX_FRAME_DELTA_S` | 0.05 | Upper clamp on one update step |
//!
//! # Examples
//!
//! ```
//! use neon_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden rows stored above the visible area.
///
/// Spawning and upward wall kicks may place cells here.
pub const BUFFER_ROWS: u8 = 2;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity at level 1 (seconds per row)
pub const BASE_FALL_INTERVAL_S: f32 = 1.0;

/// Gravity speed-up per level (seconds)
pub const FALL_INTERVAL_STEP_S: f32 = 0.08;

/// Gravity floor (seconds per row)
pub const MIN_FALL_INTERVAL_S: f32 = 0.08;

/// Lock delay for a grounded piece (seconds)
pub const LOCK_DELAY_S: f32 = 0.5;

/// Maximum number of lock timer resets from rotation per piece
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Largest frame delta the simulation accepts in one update (seconds)
pub const MAX_FRAME_DELTA_S: f32 = 0.05;

/// Host loop step in milliseconds (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Delayed auto shift before horizontal repeat starts (seconds)
pub const DEFAULT_DAS_S: f32 = 0.17;

/// Auto repeat rate for horizontal movement (seconds)
pub const DEFAULT_ARR_S: f32 = 0.05;

/// Repeat rate while soft drop is held (seconds)
pub const SOFT_DROP_ARR_S: f32 = 0.05;

/// The seven tetromino piece kinds
///
/// Each kind has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Pink-red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Compact grid code used by snapshots: 1..=7 in catalog order (0 means empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Display color as (r, g, b).
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 240, 240),
            PieceKind::O => (240, 240, 0),
            PieceKind::T => (180, 0, 255),
            PieceKind::S => (0, 240, 0),
            PieceKind::Z => (255, 60, 80),
            PieceKind::J => (50, 100, 255),
            PieceKind::L => (255, 160, 0),
        }
    }
}

/// Rotation states, in clockwise order
///
/// - **North**: Spawn orientation (0°)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotation index in `0..4` (North = 0, clockwise).
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index, taken modulo 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Commands accepted by the engine
///
/// Every command is safe to issue redundantly: when it is not legal in the
/// current state it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Leave the start screen and spawn the first piece
    Start,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its ghost row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause
    Pause,
    /// Discard the session and begin a fresh one
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Session lifecycle
///
/// `Start` waits for a begin command, `Playing` runs the piece cycle, and
/// `GameOver` is terminal until a restart. Pause is a separate flag on top of
/// `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Start,
    Playing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Playing => "playing",
            Phase::GameOver => "game_over",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind (its color tag)
pub type Cell = Option<PieceKind>;

/// Outcome of one piece lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_score: u64,
    /// Combo counter after this lock (0 when nothing was cleared).
    pub combo: u32,
    pub combo_bonus: u64,
    /// Level in effect after this lock.
    pub level: u32,
}

impl LockEvent {
    pub fn total(&self) -> u64 {
        self.line_score.saturating_add(self.combo_bonus)
    }
}

/// Events produced since the host last collected them.
///
/// Renderers and audio use these to trigger cosmetic effects; the engine keeps
/// no presentation state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameEvents {
    pub locks: Vec<LockEvent>,
    /// Rows removed, top-to-bottom per clear (buffer rows are negative).
    pub cleared_rows: Vec<i8>,
    pub leveled_up: bool,
    pub game_over: bool,
    /// The session score passed the previously recorded best.
    pub new_best: bool,
}

impl GameEvents {
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
            && self.cleared_rows.is_empty()
            && !self.leveled_up
            && !self.game_over
            && !self.new_best
    }
}
