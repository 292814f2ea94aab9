//! The five objective variants.

mod cheese;
mod endless;
mod line_clear;
mod score_attack;
mod survival;

pub use cheese::{Cheese, CHEESE_COMPLETE_REASON};
pub use endless::Endless;
pub use line_clear::{LineClear, LINE_CLEAR_COMPLETE_REASON};
pub use score_attack::{ScoreAttack, TIME_OUT_REASON};
pub use survival::Survival;
