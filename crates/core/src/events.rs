use crate::types::{GameOver, PieceKind};

/// Something observable that happened inside the field.
///
/// Events queue up inside the field and are drained by its owner with
/// [`Field::take_events`](crate::field::Field::take_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    PieceSpawned(PieceKind),
    PieceLocked(PieceKind),
    LinesCleared { garbage: usize, non_garbage: usize },
    GarbageInserted { rows: usize, column: usize },
    HoldSwapped,
    GameOver(GameOver),
}

impl FieldEvent {
    /// Total rows removed by a line clear event.
    pub fn cleared_rows(&self) -> usize {
        match self {
            FieldEvent::LinesCleared {
                garbage,
                non_garbage,
            } => garbage + non_garbage,
            _ => 0,
        }
    }
}
