//! Pieces module tests - shapes, spawn anchors and SRS rotation

use std::cell::Cell;

use neon_tetris::core::pieces::{
    get_shape, kick_offsets, rotation_states, spawn_position, transition_index, try_rotate,
    I_KICKS, JLSTZ_KICKS, SPAWN_POSITION,
};
use neon_tetris::core::{Board, Tetromino};
use neon_tetris::types::{PieceKind, Rotation};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::I, Rotation::North),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::East),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::South),
        [(0, 2), (1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::I, Rotation::West),
        [(1, 0), (1, 1), (1, 2), (1, 3)]
    );
}

#[test]
fn test_o_piece_shape_is_fixed() {
    let north = get_shape(PieceKind::O, Rotation::North);
    assert_eq!(north, [(1, 0), (2, 0), (1, 1), (2, 1)]);
    for rotation in ROTATIONS {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
    assert_eq!(rotation_states(PieceKind::O), 1);
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::T, Rotation::North),
        [(1, 0), (0, 1), (1, 1), (2, 1)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::East),
        [(1, 0), (1, 1), (2, 1), (1, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::South),
        [(0, 1), (1, 1), (2, 1), (1, 2)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::West),
        [(1, 0), (0, 1), (1, 1), (1, 2)]
    );
}

#[test]
fn test_all_shapes_fit_bounding_box() {
    for kind in PieceKind::ALL {
        let size = if kind == PieceKind::I { 4 } else { 3 };
        for rotation in ROTATIONS {
            for (x, y) in get_shape(kind, rotation) {
                assert!(
                    (0..size).contains(&x) && (0..size).contains(&y),
                    "{:?} {:?} leaves its {}x{} box",
                    kind,
                    rotation,
                    size,
                    size
                );
            }
        }
    }
}

#[test]
fn test_spawn_position() {
    assert_eq!(SPAWN_POSITION, (3, -2));
    assert_eq!(spawn_position(PieceKind::T), (3, -2));
    assert_eq!(spawn_position(PieceKind::I), (3, -3));
}

#[test]
fn test_spawned_pieces_are_horizontally_centered() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        let min_x = piece.cells().iter().map(|c| c.0).min().unwrap();
        let max_x = piece.cells().iter().map(|c| c.0).max().unwrap();
        assert!(min_x >= 3 && max_x <= 6, "{:?} spawns off-center", kind);
        // Every spawn sits in the two hidden buffer rows.
        assert!(piece.cells().iter().all(|c| (-2..0).contains(&c.1)));
    }
}

// ============== SRS Rotation Tests ==============

#[test]
fn test_rotation_on_empty_board_uses_no_kick() {
    let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, true, |_| true);
    assert_eq!(result, Some((Rotation::East, 3, 5)));

    let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, false, |_| true);
    assert_eq!(result, Some((Rotation::West, 3, 5)));
}

#[test]
fn test_rotation_accepts_first_valid_kick() {
    // Block one cell of the unkicked East placement at (3, 5): (5, 6).
    let board = {
        let mut b = Board::new();
        b.set(5, 6, Some(PieceKind::Z));
        b
    };
    let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, true, |cells| {
        board.fits(cells)
    });
    // Second candidate (-1, 0) moves left one column.
    assert_eq!(result, Some((Rotation::East, 2, 5)));
}

#[test]
fn test_rotation_kick_row_component_moves_up() {
    // Reject the first two candidates, accept the third: (-1, +1) = one left, one up.
    let calls = Cell::new(0);
    let result = try_rotate(PieceKind::J, Rotation::North, 4, 10, true, |_| {
        calls.set(calls.get() + 1);
        calls.get() == 3
    });
    assert_eq!(result, Some((Rotation::East, 3, 9)));
}

#[test]
fn test_rotation_rejected_when_every_kick_fails() {
    assert_eq!(
        try_rotate(PieceKind::T, Rotation::North, 3, 0, true, |_| false),
        None
    );
    assert_eq!(
        try_rotate(PieceKind::I, Rotation::East, 3, 0, false, |_| false),
        None
    );
}

#[test]
fn test_o_piece_never_rotates() {
    assert_eq!(
        try_rotate(PieceKind::O, Rotation::North, 3, 0, true, |_| true),
        None
    );
}

#[test]
fn test_i_rotation_uses_i_table() {
    // I West at x=-1 stands in column 0. North in place would need column -1,
    // so the (+1, 0) kick wins.
    let board = Board::new();
    let result = try_rotate(PieceKind::I, Rotation::West, -1, 5, true, |cells| {
        board.fits(cells)
    });
    assert_eq!(result, Some((Rotation::North, 0, 5)));
    assert_eq!(kick_offsets(PieceKind::I, Rotation::West, Rotation::North), &I_KICKS[6]);
}

#[test]
fn test_kick_tables_shared_by_jlstz() {
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        assert_eq!(
            kick_offsets(kind, Rotation::East, Rotation::South),
            &JLSTZ_KICKS[2]
        );
    }
    assert_ne!(I_KICKS, JLSTZ_KICKS);
    assert!(kick_offsets(PieceKind::O, Rotation::North, Rotation::East).is_empty());
}

#[test]
fn test_transition_index_only_for_adjacent_states() {
    assert_eq!(transition_index(Rotation::North, Rotation::East), Some(0));
    assert_eq!(transition_index(Rotation::North, Rotation::West), Some(7));
    assert_eq!(transition_index(Rotation::North, Rotation::South), None);
    assert_eq!(transition_index(Rotation::East, Rotation::East), None);
}

#[test]
fn test_rotate_helpers_are_pure() {
    let piece = Tetromino::new(PieceKind::S);
    assert_eq!(piece.rotate_cw(), Rotation::East);
    assert_eq!(piece.rotate_ccw(), Rotation::West);
    assert_eq!(piece.rotation, Rotation::North);
    assert_eq!((piece.x, piece.y), (3, -2));
}
