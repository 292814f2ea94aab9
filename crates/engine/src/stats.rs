//! Display statistics derived from field counters.
//!
//! Nothing here feeds back into the simulation.

use termblocks_core::Field;
use termblocks_types::FRAMES_PER_SECOND;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub name: &'static str,
    pub lines: Vec<String>,
}

impl Stat {
    fn new(name: &'static str, lines: Vec<String>) -> Self {
        Self { name, lines }
    }
}

/// `m:ss.mmm` for a frame count. Negative values print as zero.
pub fn format_time(frames: i64) -> String {
    let millis = frames.max(0) * 1000 / FRAMES_PER_SECOND;
    format!(
        "{}:{:02}.{:03}",
        millis / 60_000,
        (millis / 1000) % 60,
        millis % 1000
    )
}

/// `count` per `unit_frames` of elapsed time, zero before the first frame.
fn rate(count: i64, frames: i64, unit_frames: i64) -> f64 {
    if frames <= 0 {
        return 0.0;
    }
    count as f64 * unit_frames as f64 / frames as f64
}

pub fn elapsed_time(field: &Field) -> Stat {
    Stat::new("TIME", vec![format_time(field.frame_count())])
}

pub fn countdown(field: &Field, duration_secs: i64) -> Stat {
    let remaining = duration_secs * FRAMES_PER_SECOND - field.frame_count();
    Stat::new("TIME", vec![format_time(remaining)])
}

pub fn lines(field: &Field, target: Option<i64>) -> Stat {
    let count = match target {
        Some(t) => format!("{}/{}", field.lines(), t),
        None => field.lines().to_string(),
    };
    let lpm = rate(field.lines(), field.frame_count(), 60 * FRAMES_PER_SECOND);
    Stat::new("LINES", vec![count, format!("{:.2} l/m", lpm)])
}

pub fn pieces(field: &Field) -> Stat {
    let pps = rate(field.piece_count(), field.frame_count(), FRAMES_PER_SECOND);
    Stat::new(
        "PIECES",
        vec![field.piece_count().to_string(), format!("{:.2} p/s", pps)],
    )
}

pub fn garbage_remaining(remaining: Option<i64>) -> Stat {
    let value = remaining.map_or_else(|| "-".to_string(), |r| r.max(0).to_string());
    Stat::new("GARBAGE", vec![value])
}

pub fn score(field: &Field) -> Stat {
    Stat::new("SCORE", vec![field.score().to_string()])
}

pub fn level(field: &Field) -> Stat {
    Stat::new("LEVEL", vec![field.level().to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use termblocks_types::GlobalSettings;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00.000");
        assert_eq!(format_time(30), "0:00.500");
        assert_eq!(format_time(3600), "1:00.000");
        assert_eq!(format_time(3661), "1:01.016");
        assert_eq!(format_time(-10), "0:00.000");
    }

    #[test]
    fn test_rates_before_first_frame_are_zero() {
        let field = Field::new(1, GlobalSettings::default());
        assert_eq!(lines(&field, None).lines[1], "0.00 l/m");
        assert_eq!(pieces(&field).lines[1], "0.00 p/s");
        assert_eq!(lines(&field, Some(40)).lines[0], "0/40");
    }

    #[test]
    fn test_countdown_starts_at_duration() {
        let field = Field::new(1, GlobalSettings::default());
        assert_eq!(countdown(&field, 90).lines[0], "1:30.000");
    }

    #[test]
    fn test_garbage_remaining() {
        assert_eq!(garbage_remaining(Some(7)).lines[0], "7");
        assert_eq!(garbage_remaining(None).lines[0], "-");
    }
}
