use termblocks_engine::{ObjectiveSettings, SessionConfig};
use termblocks_types::{Action, GlobalSettings};

/// One input applied at a field frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplayAction {
    pub action: Action,
    pub frame: i64,
}

/// Everything needed to re-run a session: seed, settings, objective and inputs.
///
/// Frames are non-decreasing; [`ReplayRecord::push`] enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayRecord {
    pub seed: i64,
    pub settings: GlobalSettings,
    pub objective: ObjectiveSettings,
    pub actions: Vec<ReplayAction>,
}

impl ReplayRecord {
    pub fn new(seed: i64, settings: GlobalSettings, objective: ObjectiveSettings) -> Self {
        Self {
            seed,
            settings,
            objective,
            actions: Vec::new(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.seed, config.settings, config.objective)
    }

    /// Session configuration this record replays against.
    pub fn session_config(&self, countdown_frames: i64) -> SessionConfig {
        SessionConfig::new(self.seed, self.settings, self.objective).with_countdown(countdown_frames)
    }

    /// Append an action. Panics if `frame` is earlier than the last recorded frame.
    pub fn push(&mut self, action: Action, frame: i64) {
        if let Some(last) = self.actions.last() {
            assert!(
                frame >= last.frame,
                "replay frames must not decrease ({} after {})",
                frame,
                last.frame
            );
        }
        self.actions.push(ReplayAction { action, frame });
    }

    pub fn last_frame(&self) -> Option<i64> {
        self.actions.last().map(|a| a.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut r = ReplayRecord::new(1, GlobalSettings::default(), ObjectiveSettings::Endless);
        r.push(Action::MoveLeft, 0);
        r.push(Action::HardDrop, 0);
        r.push(Action::RotateCw, 12);
        assert_eq!(r.actions.len(), 3);
        assert_eq!(r.last_frame(), Some(12));
    }

    #[test]
    #[should_panic]
    fn test_push_rejects_decreasing_frames() {
        let mut r = ReplayRecord::new(1, GlobalSettings::default(), ObjectiveSettings::Endless);
        r.push(Action::MoveLeft, 5);
        r.push(Action::MoveLeft, 4);
    }
}
