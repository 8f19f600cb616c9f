//! Board module - manages the game grid
//!
//! The board is 10 columns by 20 visible rows, plus `BUFFER_ROWS` hidden rows
//! stored above the visible area. Coordinates are `(x, y)`: x ranges 0..=9
//! left to right, y ranges -2..=19 top to bottom, with row 0 the top visible row.
//! Rows above the buffer are outside storage and always free, so pieces may
//! poke above the playfield while rotating or spawning.
//!
//! Storage is a flat row-major array, so line clears are allocation-free.

use arrayvec::ArrayVec;

use crate::piece::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS};

const WIDTH: usize = BOARD_WIDTH as usize;

/// Stored rows: buffer plus visible.
pub const TOTAL_ROWS: usize = (BOARD_HEIGHT + BUFFER_ROWS) as usize;

/// Total number of stored cells
const BOARD_SIZE: usize = WIDTH * TOTAL_ROWS;

/// Rows removed by one clear, top-to-bottom.
pub type ClearedRows = ArrayVec<i8, TOTAL_ROWS>;

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major, row `-BUFFER_ROWS` first
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Flat index for a stored cell
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        let row = y as i16 + BUFFER_ROWS as i16;
        if x < 0 || x >= BOARD_WIDTH as i8 || row < 0 || row >= TOTAL_ROWS as i16 {
            return None;
        }
        Some(row as usize * WIDTH + x as usize)
    }

    /// Storage row for a board row index
    #[inline(always)]
    fn storage_row(y: i8) -> usize {
        (y as i16 + BUFFER_ROWS as i16) as usize
    }

    /// Board row index for a storage row
    #[inline(always)]
    fn board_row(row: usize) -> i8 {
        row as i8 - BUFFER_ROWS as i8
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Visible height (buffer rows excluded)
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get a stored cell. `None` when `(x, y)` is outside storage.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set a stored cell. Returns false if `(x, y)` is outside storage.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a single cell may hold a mino.
    ///
    /// Columns must lie in `[0, 10)` and rows below 20. Rows above the buffer
    /// impose no limit; anything else must be empty.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        match self.get(x, y) {
            Some(cell) => cell.is_none(),
            None => true,
        }
    }

    /// Check if position is occupied (within storage and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether every cell in `cells` is free.
    pub fn fits(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        let Some(start) = Self::index(0, y) else {
            return false;
        };
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Write the piece's kind into each of its cells.
    ///
    /// Callers must have checked [`Board::fits`] for the piece first. Cells above
    /// the buffer have no storage and are dropped.
    pub fn lock(&mut self, piece: &Tetromino) {
        self.lock_cells(&piece.cells(), piece.kind);
    }

    /// Write `kind` into each cell in `cells`.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) {
        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }
    }

    /// Remove every full row and compact the rest downward.
    ///
    /// Returns the removed row indices top-to-bottom. The same number of empty
    /// rows enter at the top of the buffer, so the row count never changes and
    /// surviving rows keep their relative order. Two-pointer scan, no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_row = TOTAL_ROWS;

        // Scan from bottom to top
        for read_row in (0..TOTAL_ROWS).rev() {
            let y = Self::board_row(read_row);
            if self.is_row_full(y) {
                cleared_rows.push(y);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_row * WIDTH);
                }
            }
        }

        // Clear the rows that opened up at the top
        self.cells[..write_row * WIDTH].fill(None);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Lowest anchor row the piece reaches by falling straight down.
    ///
    /// Returns the piece's own row when it cannot move at all.
    pub fn ghost_row(&self, piece: &Tetromino) -> i8 {
        let mut y = piece.y;
        while self.fits(&piece.cells_at(piece.rotation, piece.x, y + 1)) {
            y += 1;
        }
        y
    }

    /// Write the visible rows as kind codes (0 = empty).
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = Self::storage_row(y as i8) * WIDTH;
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[start + x].map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Visible rows, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[BUFFER_ROWS as usize * WIDTH..].chunks_exact(WIDTH)
    }

    /// Get a reference to the internal cells array (buffer rows first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from ASCII art of the bottom visible rows.
    ///
    /// Each line is one row (10 chars); `.` is empty, a piece letter fills the
    /// cell with that kind, and any other character fills it with `I`. The last
    /// line lands on row 19.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let first = BOARD_HEIGHT as i16 - rows.len() as i16;
        for (i, line) in rows.iter().enumerate() {
            let y = (first + i as i16).max(i8::MIN as i16) as i8;
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_str(&ch.to_string()).unwrap_or(PieceKind::I);
                board.set(x as i8, y, Some(kind));
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
