//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be shared
//! by the simulation, the objective layer, the replay codec and the terminal front end.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible height**: 20 rows
//! - **Grid height**: 40 rows; the top 20 are a spawn buffer above the visible area
//!
//! Rows are indexed top-down, so the visible play area is rows `20..40`.
//!
//! # Timing
//!
//! The simulation advances in fixed ticks of 1/60 s. All timers are counted in ticks:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAMES_PER_SECOND` | 60 | Ticks per simulated second |
//! | `LOCK_DELAY` | 30 | Ticks a grounded piece waits before locking |
//! | `MAX_MOVE_RESETS` | 15 | Lock-delay re-arms allowed while grounded |
//! | `GRAVITY_UNIT` | 128 | Gravity sub-rows per row (gravity is in 1/128 G) |
//! | `BASE_GRAVITY` | 4 | Level 1 gravity (one row every 32 ticks) |
//! | `BASE_GRAVITY_INCREASE` | 2 | Gravity added per level |
//! | `MAX_GRAVITY` | 2560 | 20G cap |
//!
//! # Examples
//!
//! ```
//! use termblocks_types::{Action, PieceKind, ObjectiveId};
//!
//! assert_eq!(PieceKind::from_index(5), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.cell_value(), 6);
//!
//! assert_eq!(Action::from_code(4), Some(Action::HardDrop));
//! assert_eq!(Action::HardDrop.code(), 4);
//!
//! assert_eq!(ObjectiveId::from_tag(3), Some(ObjectiveId::Cheese));
//! ```

use std::fmt;

/// Board width in cells.
pub const BOARD_WIDTH: usize = 10;

/// Number of rows visible to the player.
pub const VISIBLE_HEIGHT: usize = 20;

/// Total grid height including the spawn buffer.
pub const BOARD_HEIGHT: usize = VISIBLE_HEIGHT * 2;

/// Length of the next-piece lookahead queue.
pub const NEXT_QUEUE_LEN: usize = 5;

/// Simulation ticks per second.
pub const FRAMES_PER_SECOND: i64 = 60;

/// Duration of a single tick in milliseconds (for display maths only).
pub const TICK_MS: f64 = 1000.0 / FRAMES_PER_SECOND as f64;

/// Ticks a grounded piece waits before it locks.
pub const LOCK_DELAY: i64 = 30;

/// Lock-delay re-arms allowed while the piece stays grounded.
pub const MAX_MOVE_RESETS: i64 = 15;

/// Gravity sub-rows per row. Gravity values are expressed in 1/`GRAVITY_UNIT` G.
pub const GRAVITY_UNIT: i64 = 128;

/// Gravity at level 1.
pub const BASE_GRAVITY: i64 = 4;

/// Gravity added per level above 1.
pub const BASE_GRAVITY_INCREASE: i64 = 2;

/// Gravity cap (20 rows per tick).
pub const MAX_GRAVITY: i64 = 20 * GRAVITY_UNIT;

/// Board cell value for an empty cell.
pub const EMPTY_CELL: u8 = 0;

/// Board cell value for garbage.
pub const GARBAGE_CELL: u8 = 8;

/// Hold-slot code meaning "no piece held" (snapshot/wire representation only).
pub const NO_PIECE: u8 = 8;

/// Line clear base scores, multiplied by the current level.
pub const SINGLE_SCORE: i64 = 100;
pub const DOUBLE_SCORE: i64 = 300;
pub const TRIPLE_SCORE: i64 = 500;
pub const TETRIS_SCORE: i64 = 800;

/// Combo bonus base, multiplied by `COMBO_COUNTS[combo]` and the level.
pub const COMBO_BASE_SCORE: i64 = 50;

/// Combo multiplier lookup, indexed by the current combo counter and clamped to the last entry.
pub const COMBO_COUNTS: [i64; 11] = [0, 0, 1, 1, 2, 3, 3, 3, 4, 4, 4];

/// Garbage rows kept on the board by the cheese objective.
pub const MAX_CHEESE_GARBAGE_LINES: i64 = 10;

/// Game-over reason for a spawn collision.
pub const BLOCK_OUT_REASON: &str = "Could not place next piece";

/// Game-over reason for a stack pushed above the visible board.
pub const GARBAGE_OUT_REASON: &str = "Garbage overflowed the game board";

/// The seven piece kinds.
///
/// The discriminant is the piece identity used by the randomizer; board cells
/// store `identity + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    J = 1,
    L = 2,
    O = 3,
    S = 4,
    T = 5,
    Z = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Identity index 0..7.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Value written into the board when this piece locks.
    pub fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`]. Garbage and empty cells return `None`.
    pub fn from_cell(value: u8) -> Option<Self> {
        match value {
            1..=7 => Self::from_index(value as usize - 1),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Discrete input intents.
///
/// The declaration order is the replay wire code, see [`Action::code`].
/// The field engine consumes movement, rotation, drop, hold and shift-mode actions;
/// `Quit`, `Reset`, `Pause` and `MenuConfirm` belong to the enclosing scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Action {
    /// Rotate clockwise (mapped to the up key).
    MoveUp = 0,
    /// Soft drop.
    MoveDown = 1,
    MoveLeft = 2,
    MoveRight = 3,
    HardDrop = 4,
    RotateCw = 5,
    RotateCcw = 6,
    SwapHoldPiece = 7,
    /// Toggle shift/super mode.
    ToggleSuper = 8,
    Quit = 9,
    Reset = 10,
    Pause = 11,
    MenuConfirm = 12,
}

impl Action {
    pub const ALL: [Action; 13] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::HardDrop,
        Action::RotateCw,
        Action::RotateCcw,
        Action::SwapHoldPiece,
        Action::ToggleSuper,
        Action::Quit,
        Action::Reset,
        Action::Pause,
        Action::MenuConfirm,
    ];

    /// Replay wire code.
    pub fn code(self) -> i8 {
        self as i8
    }

    pub fn from_code(code: i8) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// True for actions that drive the field engine and therefore belong in a replay.
    pub fn is_gameplay(self) -> bool {
        !matches!(
            self,
            Action::Quit | Action::Reset | Action::Pause | Action::MenuConfirm
        )
    }

    /// Parse from a camelCase name (case-insensitive).
    ///
    /// ```
    /// use termblocks_types::Action;
    ///
    /// assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
    /// assert_eq!(Action::from_str("rotateccw"), Some(Action::RotateCcw));
    /// assert_eq!(Action::from_str("nope"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().to_lowercase() == lower)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::MoveUp => "moveUp",
            Action::MoveDown => "moveDown",
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::HardDrop => "hardDrop",
            Action::RotateCw => "rotateCw",
            Action::RotateCcw => "rotateCcw",
            Action::SwapHoldPiece => "swapHoldPiece",
            Action::ToggleSuper => "toggleSuper",
            Action::Quit => "quit",
            Action::Reset => "reset",
            Action::Pause => "pause",
            Action::MenuConfirm => "menuConfirm",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied settings, immutable for the duration of a session.
///
/// Serialized in replays as five little-endian `i64` values in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalSettings {
    pub starting_level: i64,
    pub max_resets: i64,
    /// Lock delay in ticks.
    pub lock_delay: i64,
    /// Level 1 gravity in 1/`GRAVITY_UNIT` G.
    pub base_gravity: i64,
    /// Gravity added per level in 1/`GRAVITY_UNIT` G.
    pub gravity_increase: i64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            starting_level: 1,
            max_resets: MAX_MOVE_RESETS,
            lock_delay: LOCK_DELAY,
            base_gravity: BASE_GRAVITY,
            gravity_increase: BASE_GRAVITY_INCREASE,
        }
    }
}

/// Objective identity. The discriminant is the replay wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum ObjectiveId {
    LineClear = 0,
    Survival = 1,
    Endless = 2,
    Cheese = 3,
    ScoreAttack = 4,
}

impl ObjectiveId {
    pub const ALL: [ObjectiveId; 5] = [
        ObjectiveId::LineClear,
        ObjectiveId::Survival,
        ObjectiveId::Endless,
        ObjectiveId::Cheese,
        ObjectiveId::ScoreAttack,
    ];

    pub fn tag(self) -> i8 {
        self as i8
    }

    pub fn from_tag(tag: i8) -> Option<Self> {
        usize::try_from(tag)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectiveId::LineClear => "line-clear",
            ObjectiveId::Survival => "survival",
            ObjectiveId::Endless => "endless",
            ObjectiveId::Cheese => "cheese",
            ObjectiveId::ScoreAttack => "score-attack",
        }
    }
}

/// Terminal state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameOver {
    /// `false` when an objective completed successfully.
    pub failed: bool,
    pub reason: String,
}

impl GameOver {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            failed: true,
            reason: reason.into(),
        }
    }

    pub fn success(reason: impl Into<String>) -> Self {
        Self {
            failed: false,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_has_spawn_buffer() {
        assert!(BOARD_HEIGHT > VISIBLE_HEIGHT);
        assert_eq!(BOARD_HEIGHT - VISIBLE_HEIGHT, 20);
    }

    #[test]
    fn action_codes_follow_declaration_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.code() as usize, i);
            assert_eq!(Action::from_code(i as i8), Some(*action));
        }
        assert_eq!(Action::from_code(13), None);
        assert_eq!(Action::from_code(-1), None);
    }

    #[test]
    fn scene_actions_are_not_gameplay() {
        assert!(Action::HardDrop.is_gameplay());
        assert!(Action::ToggleSuper.is_gameplay());
        assert!(!Action::Reset.is_gameplay());
        assert!(!Action::Pause.is_gameplay());
        assert!(!Action::Quit.is_gameplay());
        assert!(!Action::MenuConfirm.is_gameplay());
    }

    #[test]
    fn piece_cell_values_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_cell(kind.cell_value()), Some(kind));
        }
        assert_eq!(PieceKind::from_cell(EMPTY_CELL), None);
        assert_eq!(PieceKind::from_cell(GARBAGE_CELL), None);
    }

    #[test]
    fn objective_tags() {
        assert_eq!(ObjectiveId::from_tag(0), Some(ObjectiveId::LineClear));
        assert_eq!(ObjectiveId::from_tag(4), Some(ObjectiveId::ScoreAttack));
        assert_eq!(ObjectiveId::from_tag(5), None);
        assert_eq!(ObjectiveId::from_tag(-3), None);
    }

    #[test]
    fn default_settings() {
        let s = GlobalSettings::default();
        assert_eq!(s.starting_level, 1);
        assert_eq!(s.max_resets, 15);
        assert_eq!(s.lock_delay, 30);
    }
}
