//! Objective layer - win/loss policies wrapped around a field.
//!
//! [`ObjectiveSettings`] is the closed set of variants. Its [`ObjectiveSettings::id`]
//! is the replay wire tag, so adding a variant forces the codec to handle it.
//! [`ObjectiveSettings::init`] prepares the field (e.g. pre-loaded garbage) and
//! returns the running objective.

use std::fmt;

use termblocks_core::{Field, FieldEvent};
use termblocks_types::{Action, ObjectiveId};

use crate::objectives::{Cheese, Endless, LineClear, ScoreAttack, Survival};
use crate::stats::Stat;

pub const DEFAULT_LINE_TARGET: i64 = 40;
pub const DEFAULT_GARBAGE_INTERVAL: i64 = 300;
pub const DEFAULT_CHEESE_GARBAGE: i64 = 18;
pub const DEFAULT_SCORE_ATTACK_SECS: i64 = 120;

/// Behaviour shared by every objective.
///
/// The default methods forward straight to the field; variants override the
/// hooks they care about. Once the field reports game over, `update` and
/// `handle_action` have no effect because the field ignores them.
pub trait Objective: fmt::Debug {
    fn id(&self) -> ObjectiveId;

    /// Advance one tick.
    fn update(&mut self, field: &mut Field) {
        field.tick();
    }

    fn handle_action(&mut self, action: Action, field: &mut Field) -> bool {
        field.apply_action(action)
    }

    /// Called for every event the field emits, in order.
    fn on_event(&mut self, _event: &FieldEvent, _field: &mut Field) {}

    /// Display-only statistics.
    fn stats(&self, field: &Field) -> Vec<Stat>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveSettings {
    /// Clear `lines` lines.
    LineClear { lines: i64 },
    /// One garbage row every `garbage_interval` ticks.
    Survival { garbage_interval: i64 },
    Endless,
    /// Dig through `garbage` rows; `endless` keeps the garbage coming forever.
    Cheese { garbage: i64, endless: bool },
    /// Score as much as possible in `duration_secs` seconds.
    ScoreAttack { duration_secs: i64 },
}

impl ObjectiveSettings {
    pub fn id(&self) -> ObjectiveId {
        match self {
            ObjectiveSettings::LineClear { .. } => ObjectiveId::LineClear,
            ObjectiveSettings::Survival { .. } => ObjectiveId::Survival,
            ObjectiveSettings::Endless => ObjectiveId::Endless,
            ObjectiveSettings::Cheese { .. } => ObjectiveId::Cheese,
            ObjectiveSettings::ScoreAttack { .. } => ObjectiveId::ScoreAttack,
        }
    }

    pub fn default_for(id: ObjectiveId) -> Self {
        match id {
            ObjectiveId::LineClear => ObjectiveSettings::LineClear {
                lines: DEFAULT_LINE_TARGET,
            },
            ObjectiveId::Survival => ObjectiveSettings::Survival {
                garbage_interval: DEFAULT_GARBAGE_INTERVAL,
            },
            ObjectiveId::Endless => ObjectiveSettings::Endless,
            ObjectiveId::Cheese => ObjectiveSettings::Cheese {
                garbage: DEFAULT_CHEESE_GARBAGE,
                endless: false,
            },
            ObjectiveId::ScoreAttack => ObjectiveSettings::ScoreAttack {
                duration_secs: DEFAULT_SCORE_ATTACK_SECS,
            },
        }
    }

    /// Build the running objective and apply any start-of-game setup to `field`.
    pub fn init(&self, field: &mut Field) -> Box<dyn Objective> {
        match *self {
            ObjectiveSettings::LineClear { lines } => Box::new(LineClear::init(lines, field)),
            ObjectiveSettings::Survival { garbage_interval } => {
                Box::new(Survival::new(garbage_interval))
            }
            ObjectiveSettings::Endless => Box::new(Endless),
            ObjectiveSettings::Cheese { garbage, endless } => {
                Box::new(Cheese::init(garbage, endless, field))
            }
            ObjectiveSettings::ScoreAttack { duration_secs } => {
                Box::new(ScoreAttack::new(duration_secs))
            }
        }
    }
}

impl Default for ObjectiveSettings {
    fn default() -> Self {
        ObjectiveSettings::Endless
    }
}

impl fmt::Display for ObjectiveSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveSettings::LineClear { lines } => write!(f, "line-clear ({} lines)", lines),
            ObjectiveSettings::Survival { garbage_interval } => {
                write!(f, "survival (garbage every {} frames)", garbage_interval)
            }
            ObjectiveSettings::Endless => f.write_str("endless"),
            ObjectiveSettings::Cheese { garbage, endless } => {
                if *endless {
                    f.write_str("cheese (endless)")
                } else {
                    write!(f, "cheese ({} rows)", garbage)
                }
            }
            ObjectiveSettings::ScoreAttack { duration_secs } => {
                write!(f, "score-attack ({}s)", duration_secs)
            }
        }
    }
}
