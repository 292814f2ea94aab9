//! Process configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TERMBLOCKS_LOG_FILE` | `termblocks.log` |
//! | `TERMBLOCKS_REPLAY_DIR` | `replays` |
//! | `TERMBLOCKS_COUNTDOWN_FRAMES` | 180 |
//!
//! Log filtering itself goes through `RUST_LOG`.

use std::path::{Path, PathBuf};

use tracing::warn;

use termblocks_engine::COUNTDOWN_FRAMES;

pub const LOG_FILE_VAR: &str = "TERMBLOCKS_LOG_FILE";
pub const REPLAY_DIR_VAR: &str = "TERMBLOCKS_REPLAY_DIR";
pub const COUNTDOWN_VAR: &str = "TERMBLOCKS_COUNTDOWN_FRAMES";

pub const REPLAY_EXTENSION: &str = "replay";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_file: PathBuf,
    pub replay_dir: PathBuf,
    pub countdown_frames: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("termblocks.log"),
            replay_dir: PathBuf::from("replays"),
            countdown_frames: COUNTDOWN_FRAMES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(LOG_FILE_VAR) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(dir) = get(REPLAY_DIR_VAR) {
            config.replay_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(COUNTDOWN_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(frames) if frames >= 0 => config.countdown_frames = frames,
                _ => warn!(
                    value = %raw,
                    default = config.countdown_frames,
                    "ignoring invalid {}",
                    COUNTDOWN_VAR
                ),
            }
        }
        config
    }

    /// `<replay_dir>/<objective>-<seed>-<stamp>.replay`
    pub fn replay_path(&self, objective: &str, seed: i64, stamp: u64) -> PathBuf {
        self.replay_dir
            .join(format!("{}-{}-{}.{}", objective, seed, stamp, REPLAY_EXTENSION))
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (LOG_FILE_VAR, "/tmp/tb.log"),
            (REPLAY_DIR_VAR, "/tmp/replays"),
            (COUNTDOWN_VAR, " 0 "),
        ]));
        assert_eq!(config.log_file, PathBuf::from("/tmp/tb.log"));
        assert_eq!(config.replay_dir, PathBuf::from("/tmp/replays"));
        assert_eq!(config.countdown_frames, 0);
    }

    #[test]
    fn test_invalid_countdown_keeps_default() {
        for bad in ["soon", "-5", "1.5"] {
            let config = AppConfig::from_lookup(lookup(&[(COUNTDOWN_VAR, bad)]));
            assert_eq!(config.countdown_frames, COUNTDOWN_FRAMES);
        }
    }

    #[test]
    fn test_replay_path() {
        let config = AppConfig::default();
        assert_eq!(
            config.replay_path("cheese", -3, 1700000000),
            PathBuf::from("replays/cheese--3-1700000000.replay")
        );
    }
}
