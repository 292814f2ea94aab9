//! Game engine module - objectives, sessions and the fixed-timestep driver
//!
//! A [`Session`] owns a [`Field`](termblocks_core::Field) and the
//! [`Objective`] deciding when the game ends. Drivers call
//! [`Session::update`] once per tick (see [`FixedTimestep`]) and forward input
//! through [`Session::handle_action`].
//!
//! # Objectives
//!
//! | Variant | Ends when |
//! |---------|-----------|
//! | LineClear | total lines reach the target ("Cleared all lines") |
//! | Survival | never by itself; a garbage row rises every interval |
//! | Endless | never by itself |
//! | Cheese | the garbage quota is dug out ("Cleared all garbage") |
//! | ScoreAttack | the duration elapses ("Time out") |
//!
//! Every variant also ends on block-out or garbage-out.
//!
//! # Example
//!
//! ```
//! use termblocks_engine::{ObjectiveSettings, Session, SessionConfig};
//! use termblocks_types::{Action, GlobalSettings};
//!
//! let config = SessionConfig::new(7, GlobalSettings::default(), ObjectiveSettings::Endless)
//!     .with_countdown(0);
//! let mut session = Session::new(config);
//! session.handle_action(Action::HardDrop);
//! session.update();
//! assert_eq!(session.field().piece_count(), 1);
//! ```

pub mod clock;
pub mod objective;
pub mod objectives;
pub mod session;
pub mod stats;

pub use termblocks_core as core;
pub use termblocks_types as types;

pub use clock::{FixedTimestep, TICK};
pub use objective::{Objective, ObjectiveSettings};
pub use session::{Phase, Session, SessionConfig, COUNTDOWN_FRAMES};
pub use stats::Stat;
