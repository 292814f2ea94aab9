use tracing::debug;

use termblocks_core::Field;
use termblocks_types::ObjectiveId;

use crate::objective::Objective;
use crate::stats::{self, Stat};

/// Survive while a garbage row rises every `interval` ticks.
#[derive(Debug, Clone)]
pub struct Survival {
    interval: i64,
    timer: i64,
}

impl Survival {
    /// A non-positive interval never sends garbage.
    pub fn new(interval: i64) -> Self {
        Self {
            interval,
            timer: interval,
        }
    }

    /// Ticks until the next garbage row.
    pub fn timer(&self) -> i64 {
        self.timer
    }
}

impl Objective for Survival {
    fn id(&self) -> ObjectiveId {
        ObjectiveId::Survival
    }

    fn update(&mut self, field: &mut Field) {
        field.tick();
        if !field.is_running() || self.interval <= 0 {
            return;
        }

        self.timer -= 1;
        if self.timer <= 0 {
            self.timer += self.interval;
            debug!(frame = field.frame_count(), "survival garbage");
            field.add_garbage(1);
        }
    }

    fn stats(&self, field: &Field) -> Vec<Stat> {
        vec![
            stats::elapsed_time(field),
            stats::lines(field, None),
            stats::pieces(field),
            stats::score(field),
            stats::level(field),
        ]
    }
}
