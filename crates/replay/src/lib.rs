//! Replays: a seed, the session settings and a frame-stamped action log.
//!
//! A session is fully determined by its [`SessionConfig`](termblocks_engine::SessionConfig)
//! and the gameplay actions applied to it, so that is all a replay stores.
//! [`Recorder`] captures the log while playing, [`codec`] turns it into bytes,
//! [`text`] wraps the bytes as (optionally gzipped) base64, and [`Player`]
//! re-drives a fresh session from it.
//!
//! ```
//! use termblocks_engine::{ObjectiveSettings, Session, SessionConfig};
//! use termblocks_replay::{from_base64_gzip, to_base64_gzip, Player, Recorder};
//! use termblocks_types::{Action, GlobalSettings};
//!
//! let config = SessionConfig::new(9, GlobalSettings::default(), ObjectiveSettings::Endless)
//!     .with_countdown(0);
//! let mut session = Session::new(config);
//! let mut recorder = Recorder::new(&session);
//! recorder.apply(&mut session, Action::HardDrop);
//! session.update();
//!
//! let text = to_base64_gzip(recorder.record()).unwrap();
//! let record = from_base64_gzip(&text).unwrap();
//!
//! let mut player = Player::new(&record, 0);
//! player.step();
//! assert_eq!(player.session().field().score(), session.field().score());
//! ```

pub mod codec;
mod error;
mod player;
mod record;
mod recorder;
pub mod text;

pub use codec::{decode, encode};
pub use error::ReplayError;
pub use player::{PlaybackSummary, Player, MAX_PLAYBACK_FRAMES};
pub use record::{ReplayAction, ReplayRecord};
pub use recorder::Recorder;
pub use text::{from_base64, from_base64_gzip, to_base64, to_base64_gzip};
