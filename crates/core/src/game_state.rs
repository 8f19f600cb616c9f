//! Game state module - the simulation engine
//!
//! Ties together board, pieces, piece source and scoring. It owns the whole
//! session: phase, active and next piece, score/combo/lines/level, gravity and
//! lock-delay timers. Hosts drive it with commands ([`GameState::apply_action`])
//! and frame deltas ([`GameState::update`]), then read a [`GameSnapshot`] and
//! collect [`GameEvents`] once per frame.
//!
//! Piece cycle while playing: spawn -> fall -> lock -> clear -> score ->
//! level-up -> spawn. A spawn that does not fit ends the session.

use crate::config::EngineConfig;
use crate::rng::{PieceSource, Randomizer};
use crate::scoring::{calculate_level, calculate_score, fall_interval_s};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::*;
use crate::{pieces, Board, Tetromino};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: PieceSource = Randomizer> {
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    source: R,
    config: EngineConfig,
    phase: Phase,
    paused: bool,
    /// Monotonic session id (increments on restart).
    session_id: u32,
    /// Successful spawns in this session.
    piece_id: u32,
    score: u64,
    best_score: u64,
    level: u32,
    lines: u32,
    combo: u32,
    fall_interval_s: f32,
    fall_timer_s: f32,
    lock_timer_s: f32,
    lock_reset_count: u8,
    /// Accumulated until the host calls `take_events`.
    events: GameEvents,
}

impl GameState<Randomizer> {
    /// Create a new game drawing from a 7-bag seeded with `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(Randomizer::bag(seed))
    }
}

impl Default for GameState<Randomizer> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: PieceSource> GameState<R> {
    pub fn with_source(source: R) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    pub fn with_config(mut source: R, config: EngineConfig) -> Self {
        let next = source.next_kind();
        Self {
            board: Board::new(),
            active: None,
            next,
            source,
            config,
            phase: Phase::Start,
            paused: false,
            session_id: 0,
            piece_id: 0,
            score: 0,
            best_score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            fall_interval_s: fall_interval_s(1, &config),
            fall_timer_s: 0.0,
            lock_timer_s: 0.0,
            lock_reset_count: 0,
            events: GameEvents::default(),
        }
    }

    /// Seed the best score recorded by a previous run.
    pub fn with_best_score(mut self, best_score: u64) -> Self {
        self.best_score = best_score;
        self
    }

    /// Replace the board, for setting up a position before `start`.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Leave the start screen and spawn the first piece.
    ///
    /// Returns false when not in the `Start` phase.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Start {
            return false;
        }
        self.phase = Phase::Playing;
        self.spawn_piece();
        true
    }

    /// Discard the session and begin a fresh one.
    ///
    /// The piece source and best score carry over; everything else resets.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = self.source.next_kind();
        self.paused = false;
        self.session_id = self.session_id.wrapping_add(1);
        self.piece_id = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.fall_interval_s = fall_interval_s(1, &self.config);
        self.fall_timer_s = 0.0;
        self.lock_timer_s = 0.0;
        self.lock_reset_count = 0;
        self.events = GameEvents::default();

        self.phase = Phase::Playing;
        self.spawn_piece();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Start
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Current gravity in seconds per row
    pub fn fall_interval_s(&self) -> f32 {
        self.fall_interval_s
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Events accumulated since the last `take_events`.
    pub fn events(&self) -> &GameEvents {
        &self.events
    }

    /// Hand the accumulated events to the host and start a fresh record.
    pub fn take_events(&mut self) -> GameEvents {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.phase = self.phase;
        out.paused = self.paused;
        out.session_id = self.session_id;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.best_score = self.best_score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.fall_interval_s = self.fall_interval_s;
        out.timers = TimersSnapshot {
            fall_s: self.fall_timer_s,
            lock_s: self.lock_timer_s,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Move the next kind into play and draw a new next kind.
    ///
    /// Ends the session when the fresh piece does not fit.
    fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::new(self.next);
        self.next = self.source.next_kind();
        self.fall_timer_s = 0.0;
        self.lock_timer_s = 0.0;
        self.lock_reset_count = 0;

        if !self.board.fits(&piece.cells()) {
            self.active = None;
            self.phase = Phase::GameOver;
            self.events.game_over = true;
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !self.board.fits(&moved.cells()) {
            return false;
        }

        self.active = Some(moved);
        if dy > 0 {
            self.lock_timer_s = 0.0;
        }
        true
    }

    /// Try to rotate the active piece with wall kicks
    pub(crate) fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let result = pieces::try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |cells| self.board.fits(cells),
        );

        let Some((rotation, x, y)) = result else {
            return false;
        };

        self.active = Some(Tetromino {
            rotation,
            x,
            y,
            ..active
        });
        self.reset_lock_timer();
        true
    }

    /// Reset the lock timer (with reset limit)
    fn reset_lock_timer(&mut self) {
        if self.lock_reset_count < LOCK_RESET_LIMIT {
            self.lock_timer_s = 0.0;
            self.lock_reset_count += 1;
        }
    }

    /// Drop the active piece to its ghost row and lock it
    pub(crate) fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let y = self.board.ghost_row(&active);
        self.active = Some(Tetromino { y, ..active });
        self.lock_piece();
        true
    }

    /// Commit the active piece, clear lines, score, level up, spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock(&active);
        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;

        let score = if lines_cleared > 0 {
            self.combo = self.combo.saturating_add(1);
            let score = calculate_score(lines_cleared, self.level, self.combo);
            self.score = self.score.saturating_add(score.total);
            self.lines = self.lines.saturating_add(lines_cleared);
            self.events.cleared_rows.extend_from_slice(&cleared_rows);

            let new_level = calculate_level(self.lines);
            if new_level > self.level {
                self.level = new_level;
                self.fall_interval_s = fall_interval_s(new_level, &self.config);
                self.events.leveled_up = true;
            }
            score
        } else {
            self.combo = 0;
            Default::default()
        };

        if self.score > self.best_score {
            self.best_score = self.score;
            self.events.new_best = true;
        }

        self.events.locks.push(LockEvent {
            kind: active.kind,
            lines_cleared,
            line_score: score.line_score,
            combo: self.combo,
            combo_bonus: score.combo_bonus,
            level: self.level,
        });

        self.spawn_piece();
    }

    /// Check if the active piece is resting on something
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(piece) => !self.board.fits(&piece.shifted(0, 1).cells()),
            None => false,
        }
    }

    /// Anchor row the active piece would land on if hard-dropped
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| self.board.ghost_row(&piece))
    }

    /// Advance gravity and lock delay by one frame.
    ///
    /// `dt_s` is clamped to `[0, max_frame_delta_s]`. Does nothing unless
    /// playing and unpaused. Returns true if the piece moved or locked.
    pub fn update(&mut self, dt_s: f32) -> bool {
        if self.phase != Phase::Playing || self.paused || self.active.is_none() {
            return false;
        }

        let dt = if dt_s.is_finite() {
            dt_s.clamp(0.0, self.config.max_frame_delta_s)
        } else {
            0.0
        };
        let immediate_lock = self.config.lock_delay_s <= 0.0;
        let mut changed = false;

        self.fall_timer_s += dt;
        if self.fall_timer_s >= self.fall_interval_s {
            self.fall_timer_s =
                (self.fall_timer_s - self.fall_interval_s).min(self.fall_interval_s);
            if self.try_move(0, 1) {
                changed = true;
            } else if immediate_lock {
                self.lock_piece();
                return true;
            }
        }

        if !immediate_lock {
            if self.is_grounded() {
                self.lock_timer_s += dt;
                if self.lock_timer_s >= self.config.lock_delay_s {
                    self.lock_piece();
                    return true;
                }
            } else {
                self.lock_timer_s = 0.0;
            }
        }

        changed
    }

    /// Apply a player command
    ///
    /// Returns true if the command changed state. Illegal commands are
    /// silent no-ops.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.phase {
            Phase::Start => match action {
                GameAction::Start => self.start(),
                GameAction::Restart => {
                    self.restart();
                    true
                }
                _ => false,
            },
            Phase::GameOver => match action {
                GameAction::Restart => {
                    self.restart();
                    true
                }
                _ => false,
            },
            Phase::Playing if self.paused => match action {
                GameAction::Pause => {
                    self.paused = false;
                    true
                }
                _ => false,
            },
            Phase::Playing => match action {
                GameAction::Start => false,
                GameAction::MoveLeft => self.try_move(-1, 0),
                GameAction::MoveRight => self.try_move(1, 0),
                GameAction::SoftDrop => self.try_move(0, 1),
                GameAction::HardDrop => self.hard_drop(),
                GameAction::RotateCw => self.try_rotate(true),
                GameAction::RotateCcw => self.try_rotate(false),
                GameAction::Pause => {
                    self.paused = true;
                    true
                }
                GameAction::Restart => {
                    self.restart();
                    true
                }
            },
        }
    }

    /// Check if piece can move in given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.active
            .map(|piece| self.board.fits(&piece.shifted(dx, dy).cells()))
            .unwrap_or(false)
    }
}
