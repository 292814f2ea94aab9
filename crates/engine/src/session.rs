//! Session - a field plus its objective, driven one tick at a time.
//!
//! Phases: `Countdown` (field built, no piece yet) → `Playing` → `Finished`.
//! Pause freezes ticks and gameplay input without leaving the current phase.
//!
//! Field events are routed through the objective as soon as they happen, then
//! kept for the owner until [`Session::take_events`].

use tracing::info;

use termblocks_core::{Field, FieldEvent, SimpleRng};
use termblocks_types::{Action, GameOver, GlobalSettings};

use crate::objective::{Objective, ObjectiveSettings};
use crate::stats::Stat;

/// Frames shown before the first piece spawns.
pub const COUNTDOWN_FRAMES: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: i64,
    pub settings: GlobalSettings,
    pub objective: ObjectiveSettings,
    pub countdown_frames: i64,
}

impl SessionConfig {
    pub fn new(seed: i64, settings: GlobalSettings, objective: ObjectiveSettings) -> Self {
        Self {
            seed,
            settings,
            objective,
            countdown_frames: COUNTDOWN_FRAMES,
        }
    }

    pub fn with_countdown(mut self, frames: i64) -> Self {
        self.countdown_frames = frames.max(0);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Countdown { remaining: i64 },
    Playing,
    Finished,
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    field: Field,
    objective: Box<dyn Objective>,
    phase: Phase,
    paused: bool,
    events: Vec<FieldEvent>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let mut field = Field::new(config.seed, config.settings);
        let objective = config.objective.init(&mut field);
        let mut session = Self {
            config,
            field,
            objective,
            phase: Phase::Countdown {
                remaining: config.countdown_frames,
            },
            paused: false,
            events: Vec::new(),
        };
        info!(
            seed = config.seed,
            objective = %config.objective,
            "session created"
        );
        if config.countdown_frames <= 0 {
            session.begin();
        }
        session.pump_events();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seed(&self) -> i64 {
        self.config.seed
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn objective(&self) -> &dyn Objective {
        self.objective.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.field.game_over()
    }

    /// Frames left in the countdown, 0 once playing.
    pub fn countdown_remaining(&self) -> i64 {
        match self.phase {
            Phase::Countdown { remaining } => remaining,
            _ => 0,
        }
    }

    pub fn stats(&self) -> Vec<Stat> {
        self.objective.stats(&self.field)
    }

    /// Drain field events seen since the last call.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one fixed step.
    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        match self.phase {
            Phase::Countdown { remaining } => {
                if remaining <= 1 {
                    self.begin();
                } else {
                    self.phase = Phase::Countdown {
                        remaining: remaining - 1,
                    };
                }
            }
            Phase::Playing => self.objective.update(&mut self.field),
            Phase::Finished => {}
        }
        self.pump_events();
    }

    /// Route an action. Returns whether it changed anything.
    ///
    /// `Pause` toggles pause, `Reset` restarts with a seed derived from the
    /// current one, `Quit` and `MenuConfirm` are left to the caller.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Pause => self.toggle_pause(),
            Action::Reset => {
                let mut rng = SimpleRng::new(self.config.seed);
                let seed = rng.next_u32() as i64 | ((rng.next_u32() as i64) << 32);
                self.reset(seed);
                true
            }
            Action::Quit | Action::MenuConfirm => false,
            _ => {
                if self.paused || self.phase != Phase::Playing {
                    return false;
                }
                let applied = self.objective.handle_action(action, &mut self.field);
                self.pump_events();
                applied
            }
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.phase == Phase::Finished {
            return false;
        }
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        true
    }

    /// Rebuild field and objective from scratch with `seed`.
    pub fn reset(&mut self, seed: i64) {
        info!(seed, "session reset");
        let config = SessionConfig { seed, ..self.config };
        *self = Session::new(config);
    }

    fn begin(&mut self) {
        self.phase = Phase::Playing;
        self.field.start();
    }

    /// Feed field events to the objective until none are left.
    fn pump_events(&mut self) {
        while self.field.has_events() {
            for event in self.field.take_events() {
                self.objective.on_event(&event, &mut self.field);
                self.events.push(event);
            }
        }
        if self.field.is_game_over() && self.phase != Phase::Finished {
            self.phase = Phase::Finished;
            self.paused = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termblocks_types::ObjectiveId;

    fn config(objective: ObjectiveSettings) -> SessionConfig {
        SessionConfig::new(11, GlobalSettings::default(), objective)
    }

    #[test]
    fn test_countdown_then_spawn() {
        let mut s = Session::new(config(ObjectiveSettings::Endless).with_countdown(3));
        assert_eq!(s.countdown_remaining(), 3);
        assert!(s.field().active().is_none());
        assert!(!s.handle_action(Action::HardDrop));

        s.update();
        s.update();
        assert!(!s.is_playing());
        s.update();
        assert!(s.is_playing());
        assert!(s.field().active().is_some());
        assert_eq!(s.field().frame_count(), 0);
    }

    #[test]
    fn test_zero_countdown_starts_immediately() {
        let s = Session::new(config(ObjectiveSettings::Endless).with_countdown(0));
        assert!(s.is_playing());
    }

    #[test]
    fn test_pause_freezes_ticks_and_input() {
        let mut s = Session::new(config(ObjectiveSettings::Endless).with_countdown(0));
        s.update();
        assert!(s.handle_action(Action::Pause));
        s.update();
        assert_eq!(s.field().frame_count(), 1);
        assert!(!s.handle_action(Action::HardDrop));
        s.handle_action(Action::Pause);
        assert!(s.handle_action(Action::HardDrop));
    }

    #[test]
    fn test_reset_rebuilds_with_new_seed() {
        let mut s = Session::new(config(ObjectiveSettings::Endless).with_countdown(0));
        s.handle_action(Action::HardDrop);
        s.reset(99);
        assert_eq!(s.seed(), 99);
        assert_eq!(s.field().piece_count(), 0);
        assert!(s.is_playing());

        assert!(s.handle_action(Action::Reset));
        assert_ne!(s.seed(), 99);
    }

    #[test]
    fn test_scene_actions_are_not_consumed() {
        let mut s = Session::new(config(ObjectiveSettings::Endless).with_countdown(0));
        assert!(!s.handle_action(Action::Quit));
        assert!(!s.handle_action(Action::MenuConfirm));
    }

    #[test]
    fn test_events_are_drained() {
        let mut s = Session::new(config(ObjectiveSettings::Endless).with_countdown(0));
        s.take_events();
        s.handle_action(Action::HardDrop);
        let events = s.take_events();
        assert!(events.iter().any(|e| matches!(e, FieldEvent::PieceLocked(_))));
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_score_attack_times_out() {
        let mut s = Session::new(
            config(ObjectiveSettings::ScoreAttack { duration_secs: 1 }).with_countdown(0),
        );
        assert_eq!(s.objective().id(), ObjectiveId::ScoreAttack);
        for _ in 0..60 {
            s.update();
        }
        assert!(s.is_finished());
        let over = s.game_over().cloned().unwrap();
        assert!(!over.failed);
        assert_eq!(over.reason, "Time out");
        assert_eq!(s.field().frame_count(), 60);
    }
}
