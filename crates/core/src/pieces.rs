//! Pieces module - tetromino shape catalog and SRS wall kick tables
//!
//! Offsets are `(dx, dy)`: column then row, relative to the piece anchor, with
//! rows growing downward. Kick candidates follow SRS orientation instead: a
//! positive row component means *up* and is applied as `y - dy`.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Number of distinct rotation states for a kind.
pub fn rotation_states(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::O => 1,
        _ => 4,
    }
}

/// Reduce a rotation to the kind's state count (the O piece only has `North`).
pub fn normalize_rotation(kind: PieceKind, rotation: Rotation) -> Rotation {
    Rotation::from_index(rotation.index() % rotation_states(kind))
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => O_SHAPE,
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece lives in a 4x4 box; the spawn bar sits on box row 1.
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

const O_SHAPE: PieceShape = [(1, 0), (2, 0), (1, 1), (2, 1)];

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Kick candidates for one rotation transition, in priority order.
pub type KickList = [(i8, i8); 5];

/// Eight transitions per table, indexed by [`transition_index`].
pub type KickTable = [KickList; 8];

/// Shared by J, L, S, T and Z.
pub const JLSTZ_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kicks reach two columns.
pub const I_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Table slot for a `(from, to)` pair; `None` unless the two are adjacent.
pub fn transition_index(from: Rotation, to: Rotation) -> Option<usize> {
    use Rotation::*;
    match (from, to) {
        (North, East) => Some(0),
        (East, North) => Some(1),
        (East, South) => Some(2),
        (South, East) => Some(3),
        (South, West) => Some(4),
        (West, South) => Some(5),
        (West, North) => Some(6),
        (North, West) => Some(7),
        _ => None,
    }
}

/// Kick candidates to try for `kind` rotating from `from` to `to`.
///
/// The O piece and non-adjacent transitions have no kicks (empty slice).
pub fn kick_offsets(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [(i8, i8)] {
    let table = match kind {
        PieceKind::O => return &[],
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    match transition_index(from, to) {
        Some(idx) => &table[idx],
        None => &[],
    }
}

/// Try to rotate a piece with wall kicks
///
/// `fits` judges absolute cells. Candidates are tried in table order and the
/// first that fits wins. Returns `(new_rotation, new_x, new_y)`, or `None` when
/// every candidate collides (the caller leaves the piece unchanged).
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    fits: impl Fn(&PieceShape) -> bool,
) -> Option<(Rotation, i8, i8)> {
    if rotation_states(kind) == 1 {
        return None;
    }

    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };
    let new_shape = get_shape(kind, new_rotation);

    for &(kick_x, kick_up) in kick_offsets(kind, rotation, new_rotation) {
        let new_x = x + kick_x;
        let new_y = y - kick_up;
        let cells = new_shape.map(|(dx, dy)| (new_x + dx, new_y + dy));
        if fits(&cells) {
            return Some((new_rotation, new_x, new_y));
        }
    }

    None
}

/// Spawn anchor for new pieces (x, y), inside the hidden buffer rows.
///
/// Every kind except I fills rows -2 and -1; the I anchor sits one row higher
/// so its bar lies on row -2.
pub const SPAWN_POSITION: (i8, i8) = (3, -2);

/// Spawn anchor for a given kind.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    match kind {
        PieceKind::I => (SPAWN_POSITION.0, SPAWN_POSITION.1 - 1),
        _ => SPAWN_POSITION,
    }
}
