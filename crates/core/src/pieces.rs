//! Pieces module - tetromino shapes and SRS rotation system
//!
//! Shapes are listed per rotation state as four mino offsets inside the piece's
//! bounding box. Rotation 0 is the spawn state and each following index is one
//! clockwise turn. The O piece has a single state.
//!
//! Kick tables use the board's y-down convention, so a positive `dy` moves the
//! piece towards the floor.

use crate::grid::Grid;
use crate::types::{PieceKind, BOARD_WIDTH, VISIBLE_HEIGHT};

/// Offset of a single mino relative to the piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece origin
pub type PieceShape = [MinoOffset; 4];

/// Number of distinct rotation states.
pub fn rotation_count(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::O => 1,
        _ => 4,
    }
}

/// Edge of the square bounding box the offsets live in.
pub fn box_size(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::I | PieceKind::O => 4,
        _ => 3,
    }
}

/// Spawn anchor: top-centre, just above the visible area.
pub fn spawn_position(kind: PieceKind) -> (i32, i32) {
    let offset = box_size(kind) / 2 + 1;
    (
        BOARD_WIDTH as i32 / 2 - offset,
        VISIBLE_HEIGHT as i32 - offset,
    )
}

/// Get the shape (mino offsets) for a piece kind and rotation.
///
/// Rotation is taken modulo the piece's rotation count.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let r = rotation % rotation_count(kind);
    match kind {
        PieceKind::I => I_SHAPES[r as usize],
        PieceKind::O => [(1, 0), (2, 0), (1, 1), (2, 1)],
        PieceKind::T => T_SHAPES[r as usize],
        PieceKind::S => S_SHAPES[r as usize],
        PieceKind::Z => Z_SHAPES[r as usize],
        PieceKind::J => J_SHAPES[r as usize],
        PieceKind::L => L_SHAPES[r as usize],
    }
}

/// Boolean occupancy mask of one rotation state, `box_size` x `box_size`.
pub fn mask(kind: PieceKind, rotation: u8) -> Grid<bool> {
    let size = box_size(kind) as usize;
    let mut grid = Grid::new(size, size, false);
    for (dx, dy) in get_shape(kind, rotation) {
        grid.set(dx as i32, dy as i32, true);
    }
    grid
}

const I_SHAPES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// SRS wall kick data.
/// Each row is the ordered list of `(dx, dy)` candidates; the first is always `(0, 0)`.
pub type KickTable = [[(i8, i8); 5]; 8];

/// Kick candidates for rotating `kind` from `from` to `to`.
///
/// The table row is `from * 2` for a clockwise turn and `from * 2 + 1` for a
/// counter-clockwise one.
pub fn kick_offsets(kind: PieceKind, from: u8, to: u8) -> &'static [(i8, i8)] {
    if kind == PieceKind::O {
        return &O_KICKS;
    }
    let from = from % 4;
    let to = to % 4;
    let ccw = (from + 3) % 4 == to;
    let row = from as usize * 2 + ccw as usize;
    match kind {
        PieceKind::I => &I_KICKS[row],
        _ => &JLSTZ_KICKS[row],
    }
}

const O_KICKS: [(i8, i8); 1] = [(0, 0)];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->R
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->L
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // R->2
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // R->0
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->L
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->R
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // L->0
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // L->2
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0->R
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->L
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // R->2
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // R->0
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 2->L
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 2->R
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // L->0
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // L->2
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_distinct_minos_in_box() {
        for kind in PieceKind::ALL {
            let size = box_size(kind) as i8;
            for r in 0..rotation_count(kind) {
                let shape = get_shape(kind, r);
                for (i, &(dx, dy)) in shape.iter().enumerate() {
                    assert!((0..size).contains(&dx) && (0..size).contains(&dy));
                    assert!(!shape[i + 1..].contains(&(dx, dy)));
                }
            }
        }
    }

    #[test]
    fn test_mask_matches_shape() {
        let m = mask(PieceKind::T, 0);
        assert_eq!(m.width(), 3);
        assert_eq!(m.cells().iter().filter(|&&c| c).count(), 4);
        assert!(*m.at(1, 0));
        assert!(!*m.at(0, 0));
    }

    #[test]
    fn test_o_piece_single_state() {
        assert_eq!(rotation_count(PieceKind::O), 1);
        assert_eq!(get_shape(PieceKind::O, 3), get_shape(PieceKind::O, 0));
        assert_eq!(kick_offsets(PieceKind::O, 0, 0), &[(0, 0)]);
    }

    #[test]
    fn test_kick_rows_start_with_identity() {
        for kind in [PieceKind::I, PieceKind::T] {
            for from in 0..4u8 {
                let cw = kick_offsets(kind, from, (from + 1) % 4);
                let ccw = kick_offsets(kind, from, (from + 3) % 4);
                assert_eq!(cw.len(), 5);
                assert_eq!(cw[0], (0, 0));
                assert_eq!(ccw[0], (0, 0));
            }
        }
    }

    #[test]
    fn test_kicks_are_inverse_pairs() {
        // Rotating there and back tries mirrored offsets.
        for kind in [PieceKind::I, PieceKind::J] {
            for from in 0..4u8 {
                let to = (from + 1) % 4;
                let there = kick_offsets(kind, from, to);
                let back = kick_offsets(kind, to, from);
                for (a, b) in there.iter().zip(back) {
                    assert_eq!((a.0, a.1), (-b.0, -b.1));
                }
            }
        }
    }

    #[test]
    fn test_spawn_position_centres_piece() {
        assert_eq!(spawn_position(PieceKind::T), (3, 18));
        assert_eq!(spawn_position(PieceKind::I), (2, 17));
        assert_eq!(spawn_position(PieceKind::O), (2, 17));
    }
}
