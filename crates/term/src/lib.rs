//! Terminal rendering.
//!
//! Not a widget toolkit: a [`FieldView`] paints the game into a plain
//! [`FrameBuffer`], and the [`TerminalRenderer`] sends the difference from
//! the previous frame to the terminal.
//!
//! - Board cells are 2 columns by 1 row by default to keep them roughly square
//! - Only the 20 visible rows are drawn; the spawn buffer above stays hidden
//! - Rendering never touches the simulation, it reads snapshots

pub mod fb;
pub mod field_view;
pub mod renderer;

pub use termblocks_core as core;
pub use termblocks_engine as engine;
pub use termblocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use field_view::{FieldView, Overlay, ViewState, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
