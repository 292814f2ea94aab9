use crate::types::{GameOver, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN, NO_PIECE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

/// Shift-mode landing spots of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapSnapshot {
    pub left_x: i32,
    pub left_y: i32,
    pub right_x: i32,
    pub right_y: i32,
}

/// Render-oriented copy of the field state.
///
/// `board` covers the whole grid including the spawn buffer; the active piece
/// is not stamped into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSnapshot {
    pub board: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i32>,
    pub snap: Option<SnapSnapshot>,
    pub shift_mode: bool,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: [PieceKind; NEXT_QUEUE_LEN],
    pub score: i64,
    pub lines: i64,
    pub level: i64,
    pub combo: i64,
    pub piece_count: i64,
    pub frame_count: i64,
    pub started: bool,
    pub game_over: Option<GameOver>,
}

impl FieldSnapshot {
    /// Hold slot in its numeric form: piece identity, or `NO_PIECE` when empty.
    pub fn hold_code(&self) -> u8 {
        self.hold.map_or(NO_PIECE, |k| k.index() as u8)
    }

    pub fn playable(&self) -> bool {
        self.started && self.game_over.is_none()
    }
}

impl Default for FieldSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH]; BOARD_HEIGHT],
            active: None,
            ghost_y: None,
            snap: None,
            shift_mode: false,
            hold: None,
            can_hold: true,
            next_queue: [PieceKind::I; NEXT_QUEUE_LEN],
            score: 0,
            lines: 0,
            level: 0,
            combo: 0,
            piece_count: 0,
            frame_count: 0,
            started: false,
            game_over: None,
        }
    }
}
