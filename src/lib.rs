//! termblocks (workspace facade crate).
//!
//! Re-exports the member crates under short names so binaries, integration
//! tests and benches can write `termblocks::core::Field` and friends.

pub mod config;

pub use termblocks_core as core;
pub use termblocks_engine as engine;
pub use termblocks_input as input;
pub use termblocks_replay as replay;
pub use termblocks_term as term;
pub use termblocks_types as types;

pub use config::AppConfig;
