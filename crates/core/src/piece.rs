//! The active falling piece.

use crate::pieces::{get_shape, normalize_rotation, rotation_states, spawn_position, PieceShape};
use crate::types::{PieceKind, Rotation};

/// Active falling piece
///
/// Plain value type: movement is validated by the engine against the board
/// and then applied by building a new `Tetromino`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute cells for the current rotation and position.
    pub fn cells(&self) -> PieceShape {
        self.cells_at(self.rotation, self.x, self.y)
    }

    /// Absolute cells for a hypothetical rotation and anchor.
    ///
    /// Lets the board judge a move without touching the piece.
    pub fn cells_at(&self, rotation: Rotation, x: i8, y: i8) -> PieceShape {
        get_shape(self.kind, normalize_rotation(self.kind, rotation))
            .map(|(dx, dy)| (x + dx, y + dy))
    }

    /// Next rotation clockwise, modulo the kind's state count.
    pub fn rotate_cw(&self) -> Rotation {
        let states = rotation_states(self.kind);
        Rotation::from_index((self.rotation.index() + 1) % states)
    }

    /// Previous rotation, modulo the kind's state count.
    pub fn rotate_ccw(&self) -> Rotation {
        let states = rotation_states(self.kind);
        Rotation::from_index((self.rotation.index() + states - 1) % states)
    }

    /// Same piece shifted by `(dx, dy)`.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_spawn_anchor() {
        let t = Tetromino::new(PieceKind::T);
        assert_eq!((t.x, t.y, t.rotation), (3, -2, Rotation::North));
        assert!(t.cells().iter().all(|&(_, y)| y < 0));

        let i = Tetromino::new(PieceKind::I);
        assert_eq!((i.x, i.y), (3, -3));
        // The bar lies on the upper buffer row.
        assert!(i.cells().iter().all(|&(_, y)| y == -2));
    }

    #[test]
    fn cells_at_does_not_mutate() {
        let t = Tetromino::new(PieceKind::T);
        let moved = t.cells_at(Rotation::East, 0, 5);
        assert_eq!(moved, [(1, 5), (1, 6), (2, 6), (1, 7)]);
        assert_eq!(t.rotation, Rotation::North);
        assert_eq!(t.x, 3);
    }

    #[test]
    fn rotation_helpers_wrap() {
        let mut t = Tetromino::new(PieceKind::L);
        assert_eq!(t.rotate_cw(), Rotation::East);
        assert_eq!(t.rotate_ccw(), Rotation::West);
        t.rotation = Rotation::West;
        assert_eq!(t.rotate_cw(), Rotation::North);
    }

    #[test]
    fn o_piece_rotation_stays_north() {
        let o = Tetromino::new(PieceKind::O);
        assert_eq!(o.rotate_cw(), Rotation::North);
        assert_eq!(o.rotate_ccw(), Rotation::North);
    }

    #[test]
    fn shifted_moves_anchor_only() {
        let t = Tetromino::new(PieceKind::S).shifted(-2, 3);
        assert_eq!((t.x, t.y), (1, 3));
        assert_eq!(t.kind, PieceKind::S);
    }
}
