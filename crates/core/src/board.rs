//! Board module - the playfield grid and its row operations
//!
//! The board is a `Grid<u8>` of `BOARD_WIDTH x BOARD_HEIGHT` cells:
//! `0` is empty, `1..=7` a locked piece colour, `8` garbage.
//! Rows are indexed top-down; the top `BOARD_HEIGHT - VISIBLE_HEIGHT` rows are
//! the spawn buffer.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL, GARBAGE_CELL};

pub type Board = Grid<u8>;

pub fn new_board() -> Board {
    Grid::new(BOARD_WIDTH, BOARD_HEIGHT, EMPTY_CELL)
}

/// Result of a line clear pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedRows {
    /// Indices of removed rows, bottom to top, as they were before the clear.
    pub rows: ArrayVec<usize, BOARD_HEIGHT>,
    /// Full rows that contained at least one garbage cell.
    pub garbage: usize,
    pub non_garbage: usize,
}

impl ClearedRows {
    pub fn total(&self) -> usize {
        self.garbage + self.non_garbage
    }
}

pub fn is_row_full(board: &Board, y: usize) -> bool {
    board.row(y).iter().all(|&c| c != EMPTY_CELL)
}

/// Remove every full row and drop the rows above it.
/// Two-pointer compaction, no allocation.
pub fn clear_full_rows(board: &mut Board) -> ClearedRows {
    let mut out = ClearedRows::default();
    let mut write_y = board.height();

    for read_y in (0..board.height()).rev() {
        if is_row_full(board, read_y) {
            if board.row(read_y).contains(&GARBAGE_CELL) {
                out.garbage += 1;
            } else {
                out.non_garbage += 1;
            }
            out.rows.push(read_y);
        } else {
            write_y -= 1;
            board.copy_row(read_y, write_y);
        }
    }

    for y in 0..write_y {
        board.fill_row(y, EMPTY_CELL);
    }

    out
}

/// Push the stack up by `count` rows and fill the new bottom rows with garbage,
/// leaving `hole` empty. Rows pushed past the top are lost.
pub fn insert_garbage(board: &mut Board, count: usize, hole: usize) {
    let height = board.height();
    let count = count.min(height);
    for y in 0..height - count {
        board.copy_row(y + count, y);
    }
    for y in height - count..height {
        board.fill_row(y, GARBAGE_CELL);
        board[(hole, y)] = EMPTY_CELL;
    }
}

/// Height of the tallest column, measured from the floor.
pub fn stack_height(board: &Board) -> usize {
    (0..board.height())
        .find(|&y| board.row(y).iter().any(|&c| c != EMPTY_CELL))
        .map_or(0, |y| board.height() - y)
}
