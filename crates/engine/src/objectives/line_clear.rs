use termblocks_core::{Field, FieldEvent};
use termblocks_types::ObjectiveId;

use crate::objective::Objective;
use crate::stats::{self, Stat};

pub const LINE_CLEAR_COMPLETE_REASON: &str = "Cleared all lines";

/// Clear a fixed number of lines.
#[derive(Debug, Clone)]
pub struct LineClear {
    target: i64,
}

impl LineClear {
    pub fn new(target: i64) -> Self {
        Self { target }
    }

    /// Build the objective; a target of zero or less is met before the first piece.
    pub fn init(target: i64, field: &mut Field) -> Self {
        if target <= 0 {
            field.complete(LINE_CLEAR_COMPLETE_REASON);
        }
        Self::new(target)
    }

    pub fn target(&self) -> i64 {
        self.target
    }
}

impl Objective for LineClear {
    fn id(&self) -> ObjectiveId {
        ObjectiveId::LineClear
    }

    fn on_event(&mut self, event: &FieldEvent, field: &mut Field) {
        if matches!(event, FieldEvent::LinesCleared { .. }) && field.lines() >= self.target {
            field.complete(LINE_CLEAR_COMPLETE_REASON);
        }
    }

    fn stats(&self, field: &Field) -> Vec<Stat> {
        vec![
            stats::elapsed_time(field),
            stats::lines(field, Some(self.target)),
            stats::pieces(field),
            stats::score(field),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termblocks_core::{Randomizer, SequenceGenerator};
    use termblocks_types::{GlobalSettings, PieceKind, BOARD_HEIGHT, GARBAGE_CELL};

    /// An I-only field whose bottom row is one flat I away from clearing.
    fn field() -> Field {
        let mut f = Field::with_randomizer(
            1,
            GlobalSettings::default(),
            Randomizer::Sequence(SequenceGenerator::new(vec![PieceKind::I])),
        );
        let bottom = BOARD_HEIGHT as i32 - 1;
        for x in [0, 1, 6, 7, 8, 9] {
            f.board_mut().set(x, bottom, GARBAGE_CELL);
        }
        f.start();
        f
    }

    fn drop_and_pump(objective: &mut LineClear, f: &mut Field) {
        f.hard_drop();
        for event in f.take_events() {
            objective.on_event(&event, f);
        }
    }

    #[test]
    fn test_completes_on_target() {
        let mut f = field();
        let mut objective = LineClear::new(1);
        drop_and_pump(&mut objective, &mut f);
        let over = f.game_over().unwrap();
        assert!(!over.failed);
        assert_eq!(over.reason, LINE_CLEAR_COMPLETE_REASON);
    }

    #[test]
    fn test_keeps_going_below_target() {
        let mut f = field();
        let mut objective = LineClear::new(2);
        drop_and_pump(&mut objective, &mut f);
        assert_eq!(f.lines(), 1);
        assert!(f.is_running());
        assert_eq!(objective.stats(&f)[1].lines[0], "1/2");
    }

    #[test]
    fn test_zero_target_is_met_at_init() {
        let mut f = Field::new(3, GlobalSettings::default());
        let objective = LineClear::init(0, &mut f);
        assert_eq!(objective.target(), 0);
        let over = f.game_over().unwrap();
        assert!(!over.failed);
        assert_eq!(over.reason, LINE_CLEAR_COMPLETE_REASON);

        f.start();
        assert!(f.active().is_none());
    }

    #[test]
    fn test_positive_target_waits_for_clears() {
        let mut f = Field::new(3, GlobalSettings::default());
        LineClear::init(40, &mut f);
        assert!(!f.is_game_over());
    }
}
