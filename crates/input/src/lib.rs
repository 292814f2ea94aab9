//! Terminal input.
//!
//! Maps `crossterm` key events to [`Action`](termblocks_types::Action)s. There
//! is no key-repeat handling of its own: terminal auto-repeat (`Repeat` events)
//! maps like a fresh press, key releases are dropped.

pub mod map;

pub use termblocks_types as types;

pub use map::{handle_key_event, is_quit};
