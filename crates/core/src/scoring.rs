//! Scoring module - line clear, combo and gravity rules
//!
//! - Line clears score 100/300/500/800 for 1/2/3/4+ rows, times the level.
//! - The combo bonus is `50 x COMBO_COUNTS[combo] x level`, where `combo` is the
//!   counter *after* this clear was counted, clamped to the table.
//! - Level is `lines / 10 + starting_level`.

use crate::types::{
    GlobalSettings, COMBO_BASE_SCORE, COMBO_COUNTS, DOUBLE_SCORE, MAX_GRAVITY, SINGLE_SCORE,
    TETRIS_SCORE, TRIPLE_SCORE,
};

/// Base points for clearing `rows` rows at `level`.
pub fn line_clear_score(rows: usize, level: i64) -> i64 {
    let base = match rows {
        0 => 0,
        1 => SINGLE_SCORE,
        2 => DOUBLE_SCORE,
        3 => TRIPLE_SCORE,
        _ => TETRIS_SCORE,
    };
    base * level
}

/// Combo bonus for the current combo counter.
pub fn combo_bonus(combo: i64, level: i64) -> i64 {
    let idx = combo.clamp(0, COMBO_COUNTS.len() as i64 - 1) as usize;
    COMBO_BASE_SCORE * COMBO_COUNTS[idx] * level
}

pub fn level_for_lines(lines: i64, starting_level: i64) -> i64 {
    lines / 10 + starting_level
}

/// Gravity for `level` in 1/`GRAVITY_UNIT` rows per tick.
pub fn fall_rate(settings: &GlobalSettings, level: i64) -> i64 {
    let rate = settings.base_gravity + settings.gravity_increase * (level - 1);
    rate.clamp(0, MAX_GRAVITY)
}

/// Hard drop: 2 points per row.
pub fn hard_drop_score(rows: i64) -> i64 {
    2 * rows.max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub line_clear_score: i64,
    pub combo_bonus: i64,
    pub total: i64,
}

/// Score a lock that cleared `rows` rows with the combo counter already updated.
pub fn calculate_score(rows: usize, level: i64, combo: i64) -> ScoreResult {
    if rows == 0 {
        return ScoreResult::default();
    }
    let line_clear_score = line_clear_score(rows, level);
    let combo_bonus = combo_bonus(combo, level);
    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score + combo_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRAVITY_UNIT;

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 2), 1000);
        assert_eq!(line_clear_score(4, 3), 2400);
        assert_eq!(line_clear_score(0, 5), 0);
    }

    #[test]
    fn test_first_tetris_has_no_combo_bonus() {
        let r = calculate_score(4, 1, 1);
        assert_eq!(r.total, 800);
        assert_eq!(r.combo_bonus, 0);
    }

    #[test]
    fn test_combo_table_is_clamped() {
        assert_eq!(combo_bonus(2, 1), 50);
        assert_eq!(combo_bonus(4, 2), 200);
        assert_eq!(combo_bonus(10, 1), 200);
        assert_eq!(combo_bonus(500, 1), 200);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(level_for_lines(0, 1), 1);
        assert_eq!(level_for_lines(9, 1), 1);
        assert_eq!(level_for_lines(10, 1), 2);
        assert_eq!(level_for_lines(25, 3), 5);
    }

    #[test]
    fn test_fall_rate_is_clamped() {
        let s = GlobalSettings::default();
        assert_eq!(fall_rate(&s, 1), 4);
        assert_eq!(fall_rate(&s, 3), 8);
        assert_eq!(fall_rate(&s, 100_000), 20 * GRAVITY_UNIT);
    }
}
