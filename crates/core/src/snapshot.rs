use crate::piece::Tetromino;
use crate::types::{Phase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

pub type SnapshotGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<ActiveSnapshot> for Tetromino {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimersSnapshot {
    pub fall_s: f32,
    pub lock_s: f32,
}

/// Read-only view of everything a renderer needs for one frame.
///
/// `board` holds the visible rows only, as kind codes (0 = empty).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: SnapshotGrid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub phase: Phase,
    pub paused: bool,
    pub session_id: u32,
    pub piece_id: u32,
    pub score: u64,
    pub best_score: u64,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub fall_interval_s: f32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&code| PieceKind::from_code(code))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            phase: Phase::Start,
            paused: false,
            session_id: 0,
            piece_id: 0,
            score: 0,
            best_score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            fall_interval_s: 0.0,
            timers: TimersSnapshot {
                fall_s: 0.0,
                lock_s: 0.0,
            },
        }
    }
}
