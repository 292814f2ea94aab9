//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules and the field state machine.
//! It has **no dependencies** on terminal, file or clock I/O, which makes it:
//!
//! - **Deterministic**: the same seed and the same tick/action sequence produce
//!   the same game, which is what replays rely on
//! - **Testable**: every rule is reachable from plain unit tests
//! - **Portable**: runs headless (replay verification) or behind a terminal UI
//!
//! # Module Structure
//!
//! - [`grid`]: generic 2D cell container
//! - [`board`]: 10x40 board with line clearing and garbage insertion
//! - [`pieces`]: tetromino shapes and SRS wall kick tables
//! - [`rng`]: seeded LCG plus uniform, bag and scripted piece generators
//! - [`scoring`]: line clear, combo, level and gravity formulas
//! - [`particles`]: fixed-capacity ring buffer of fading trail particles
//! - [`field`]: the field engine (active piece, hold, next queue, timers, garbage)
//! - [`events`]: events the field queues for its owner
//! - [`snapshot`]: render-oriented copies of field state
//!
//! # Example
//!
//! ```
//! use termblocks_core::Field;
//! use termblocks_types::{Action, GlobalSettings};
//!
//! let mut field = Field::new(12345, GlobalSettings::default());
//! field.start();
//!
//! field.apply_action(Action::MoveRight);
//! field.apply_action(Action::RotateCw);
//! field.apply_action(Action::HardDrop);
//!
//! assert_eq!(field.piece_count(), 1);
//! assert!(field.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! One call to [`Field::tick`](field::Field::tick) is one 1/60 s frame. Gravity
//! is measured in 1/128 rows per frame, lock delay in frames.

pub mod board;
pub mod events;
pub mod field;
pub mod grid;
pub mod particles;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use termblocks_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use events::FieldEvent;
pub use field::{ActivePiece, Field};
pub use grid::Grid;
pub use particles::{Particle, ParticleSystem};
pub use pieces::{get_shape, kick_offsets, mask};
pub use rng::{
    BagRandomizer, PieceGenerator, Randomizer, SequenceGenerator, SimpleRng, UniformGenerator,
};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, FieldSnapshot, SnapSnapshot};
