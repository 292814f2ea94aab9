use termblocks_core::Field;
use termblocks_types::{ObjectiveId, FRAMES_PER_SECOND};

use crate::objective::Objective;
use crate::stats::{self, Stat};

pub const TIME_OUT_REASON: &str = "Time out";

/// Score as much as possible before the clock runs out.
#[derive(Debug, Clone)]
pub struct ScoreAttack {
    duration_secs: i64,
}

impl ScoreAttack {
    pub fn new(duration_secs: i64) -> Self {
        Self { duration_secs }
    }

    pub fn duration_frames(&self) -> i64 {
        self.duration_secs * FRAMES_PER_SECOND
    }
}

impl Objective for ScoreAttack {
    fn id(&self) -> ObjectiveId {
        ObjectiveId::ScoreAttack
    }

    fn update(&mut self, field: &mut Field) {
        field.tick();
        if field.is_running() && field.frame_count() >= self.duration_frames() {
            field.complete(TIME_OUT_REASON);
        }
    }

    fn stats(&self, field: &Field) -> Vec<Stat> {
        vec![
            stats::countdown(field, self.duration_secs),
            stats::lines(field, None),
            stats::pieces(field),
            stats::score(field),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termblocks_types::GlobalSettings;

    #[test]
    fn test_times_out_at_duration() {
        let mut f = Field::new(2, GlobalSettings::default());
        f.start();
        let mut attack = ScoreAttack::new(1);
        assert_eq!(attack.duration_frames(), 60);

        for _ in 0..59 {
            attack.update(&mut f);
        }
        assert!(f.is_running());
        assert_eq!(attack.stats(&f)[0].lines[0], "0:00.016");

        attack.update(&mut f);
        let over = f.game_over().unwrap();
        assert!(!over.failed);
        assert_eq!(over.reason, TIME_OUT_REASON);

        attack.update(&mut f);
        assert_eq!(f.frame_count(), 60);
    }
}
