use termblocks_core::Field;
use termblocks_types::ObjectiveId;

use crate::objective::Objective;
use crate::stats::{self, Stat};

/// Play until block-out or garbage-out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Endless;

impl Objective for Endless {
    fn id(&self) -> ObjectiveId {
        ObjectiveId::Endless
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
