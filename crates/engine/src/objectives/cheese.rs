use tracing::debug;

use termblocks_core::{Field, FieldEvent};
use termblocks_types::{ObjectiveId, MAX_CHEESE_GARBAGE_LINES};

use crate::objective::Objective;
use crate::stats::{self, Stat};

pub const CHEESE_COMPLETE_REASON: &str = "Cleared all garbage";

/// Dig out a quota of garbage rows.
///
/// At most `MAX_CHEESE_GARBAGE_LINES` rows are on the board at once; each
/// cleared garbage row is replaced while the quota still exceeds the cap.
#[derive(Debug, Clone)]
pub struct Cheese {
    remaining: i64,
    endless: bool,
}

impl Cheese {
    /// Pre-load the board and build the objective.
    pub fn init(garbage: i64, endless: bool, field: &mut Field) -> Self {
        let preload = if endless {
            MAX_CHEESE_GARBAGE_LINES
        } else {
            garbage.clamp(0, MAX_CHEESE_GARBAGE_LINES)
        };
        for _ in 0..preload {
            field.add_garbage(1);
        }
        if !endless && garbage <= 0 {
            field.complete(CHEESE_COMPLETE_REASON);
        }
        Self {
            remaining: garbage,
            endless,
        }
    }

    /// Garbage rows left to clear, `None` in endless mode.
    pub fn remaining(&self) -> Option<i64> {
        (!self.endless).then_some(self.remaining)
    }
}

impl Objective for Cheese {
    fn id(&self) -> ObjectiveId {
        ObjectiveId::Cheese
    }

    fn on_event(&mut self, event: &FieldEvent, field: &mut Field) {
        let FieldEvent::LinesCleared { garbage, .. } = *event else {
            return;
        };

        for _ in 0..garbage {
            if self.endless {
                field.queue_garbage(1);
                continue;
            }

            self.remaining -= 1;
            if self.remaining <= 0 {
                field.complete(CHEESE_COMPLETE_REASON);
                return;
            }
            if self.remaining >= MAX_CHEESE_GARBAGE_LINES {
                field.queue_garbage(1);
            }
        }
        debug!(remaining = self.remaining, "cheese progress");
    }

    fn stats(&self, field: &Field) -> Vec<Stat> {
        vec![
            stats::elapsed_time(field),
            stats::garbage_remaining(self.remaining()),
            stats::lines(field, None),
            stats::pieces(field),
            stats::score(field),
        ]
    }
}
