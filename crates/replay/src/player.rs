use tracing::{debug, info};

use termblocks_engine::Session;
use termblocks_types::GameOver;

use crate::record::{ReplayAction, ReplayRecord};

/// Upper bound for headless playback: one hour of frames.
pub const MAX_PLAYBACK_FRAMES: i64 = 60 * 60 * 60;

/// Final counters of a playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub score: i64,
    pub lines: i64,
    pub pieces: i64,
    pub frame: i64,
    pub game_over: Option<GameOver>,
}

impl PlaybackSummary {
    pub fn of(session: &Session) -> Self {
        let field = session.field();
        Self {
            score: field.score(),
            lines: field.lines(),
            pieces: field.piece_count(),
            frame: field.frame_count(),
            game_over: field.game_over().cloned(),
        }
    }
}

/// Re-drives a fresh session from a record.
///
/// Each [`Player::step`] first applies every recorded action due at the
/// current field frame, then advances the session one tick.
#[derive(Debug)]
pub struct Player {
    session: Session,
    actions: Vec<ReplayAction>,
    cursor: usize,
}

impl Player {
    pub fn new(record: &ReplayRecord, countdown_frames: i64) -> Self {
        info!(
            seed = record.seed,
            objective = %record.objective,
            actions = record.actions.len(),
            "replay playback"
        );
        Self {
            session: Session::new(record.session_config(countdown_frames)),
            actions: record.actions.clone(),
            cursor: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Recorded actions not applied yet.
    pub fn pending(&self) -> usize {
        self.actions.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn step(&mut self) {
        if self.session.is_playing() && !self.session.paused() {
            let frame = self.session.field().frame_count();
            while let Some(next) = self.actions.get(self.cursor) {
                if next.frame > frame {
                    break;
                }
                if !self.session.handle_action(next.action) {
                    debug!(action = %next.action, frame, "replayed action had no effect");
                }
                self.cursor += 1;
            }
        }
        self.session.update();
    }

    /// Step until the session finishes or `max_frames` updates have run.
    pub fn run_to_end(&mut self, max_frames: i64) -> PlaybackSummary {
        let mut steps = 0;
        while !self.session.is_finished() && steps < max_frames {
            self.step();
            steps += 1;
        }
        let summary = PlaybackSummary::of(&self.session);
        info!(
            score = summary.score,
            lines = summary.lines,
            frame = summary.frame,
            finished = self.session.is_finished(),
            "playback ended"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use termblocks_engine::{ObjectiveSettings, SessionConfig};
    use termblocks_types::{Action, GlobalSettings};

    /// Drive a live session with a fixed input script. Returns the record,
    /// the number of updates run and the final counters.
    fn play(seed: i64, objective: ObjectiveSettings) -> (ReplayRecord, usize, PlaybackSummary) {
        let mut session = Session::new(
            SessionConfig::new(seed, GlobalSettings::default(), objective).with_countdown(5),
        );
        let mut recorder = Recorder::new(&session);
        let script = [
            Action::MoveLeft,
            Action::RotateCw,
            Action::HardDrop,
            Action::MoveRight,
            Action::SwapHoldPiece,
            Action::MoveDown,
            Action::RotateCcw,
            Action::HardDrop,
        ];
        let mut updates = 0;
        for tick in 0..2000 {
            if session.is_finished() {
                break;
            }
            if tick % 7 == 0 {
                recorder.apply(&mut session, script[(tick / 7) % script.len()]);
            }
            session.update();
            updates += 1;
        }
        let summary = PlaybackSummary::of(&session);
        (recorder.into_record(), updates, summary)
    }

    #[test]
    fn test_playback_reproduces_live_session() {
        for objective in [
            ObjectiveSettings::Endless,
            ObjectiveSettings::Cheese {
                garbage: 12,
                endless: false,
            },
            ObjectiveSettings::Survival {
                garbage_interval: 100,
            },
        ] {
            let (record, updates, live) = play(31, objective);
            assert!(!record.actions.is_empty());

            let mut player = Player::new(&record, 5);
            for _ in 0..updates {
                player.step();
            }
            assert_eq!(player.pending(), 0);
            assert_eq!(PlaybackSummary::of(player.session()), live, "objective {}", objective);
        }
    }

    #[test]
    fn test_run_to_end_stops_at_cap() {
        let record = ReplayRecord::new(3, GlobalSettings::default(), ObjectiveSettings::Endless);
        let mut player = Player::new(&record, 0);
        let summary = player.run_to_end(10);
        assert_eq!(summary.frame, 10);
        assert!(summary.game_over.is_none());
    }
}
