//! Command-line interface.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand, ValueEnum};

use termblocks::engine::ObjectiveSettings;
use termblocks::types::{GlobalSettings, ObjectiveId};

/// Deterministic falling-block puzzle game for the terminal
#[derive(Parser, Debug)]
#[command(name = "termblocks")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Defaults to `play` with default options
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a live game; the replay is saved on exit
    Play(PlayArgs),

    /// Watch a saved replay
    Replay {
        /// Replay file (gzip+base64 or plain base64)
        file: PathBuf,
    },

    /// Re-simulate a replay headless and print the result
    Verify {
        /// Replay file (gzip+base64 or plain base64)
        file: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ObjectiveArg {
    LineClear,
    Survival,
    #[default]
    Endless,
    Cheese,
    ScoreAttack,
}

impl From<ObjectiveArg> for ObjectiveId {
    fn from(arg: ObjectiveArg) -> Self {
        match arg {
            ObjectiveArg::LineClear => ObjectiveId::LineClear,
            ObjectiveArg::Survival => ObjectiveId::Survival,
            ObjectiveArg::Endless => ObjectiveId::Endless,
            ObjectiveArg::Cheese => ObjectiveId::Cheese,
            ObjectiveArg::ScoreAttack => ObjectiveId::ScoreAttack,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// RNG seed (random when omitted)
    #[arg(long)]
    pub seed: Option<i64>,

    #[arg(short, long, value_enum, default_value_t = ObjectiveArg::Endless)]
    pub objective: ObjectiveArg,

    /// Line-clear target
    #[arg(long)]
    pub lines: Option<i64>,

    /// Survival: ticks between garbage rows
    #[arg(long)]
    pub garbage_interval: Option<i64>,

    /// Cheese: garbage rows to dig
    #[arg(long)]
    pub garbage: Option<i64>,

    /// Cheese: never run out of garbage
    #[arg(long)]
    pub endless: bool,

    /// Score attack length in seconds
    #[arg(long)]
    pub duration: Option<i64>,

    #[arg(long)]
    pub level: Option<i64>,

    /// Lock-delay resets per piece
    #[arg(long)]
    pub max_resets: Option<i64>,

    /// Lock delay in ticks
    #[arg(long)]
    pub lock_delay: Option<i64>,

    /// Level 1 gravity in 1/128 rows per tick
    #[arg(long)]
    pub gravity: Option<i64>,

    /// Gravity added per level in 1/128 rows per tick
    #[arg(long)]
    pub gravity_increase: Option<i64>,
}

impl PlayArgs {
    pub fn seed(&self) -> i64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos() as i64)
        })
    }

    pub fn settings(&self) -> GlobalSettings {
        let mut s = GlobalSettings::default();
        if let Some(v) = self.level {
            s.starting_level = v;
        }
        if let Some(v) = self.max_resets {
            s.max_resets = v;
        }
        if let Some(v) = self.lock_delay {
            s.lock_delay = v;
        }
        if let Some(v) = self.gravity {
            s.base_gravity = v;
        }
        if let Some(v) = self.gravity_increase {
            s.gravity_increase = v;
        }
        s
    }

    pub fn objective(&self) -> ObjectiveSettings {
        let id = ObjectiveId::from(self.objective);
        match ObjectiveSettings::default_for(id) {
            ObjectiveSettings::LineClear { lines } => ObjectiveSettings::LineClear {
                lines: self.lines.unwrap_or(lines),
            },
            ObjectiveSettings::Survival { garbage_interval } => ObjectiveSettings::Survival {
                garbage_interval: self.garbage_interval.unwrap_or(garbage_interval),
            },
            ObjectiveSettings::Endless => ObjectiveSettings::Endless,
            ObjectiveSettings::Cheese { garbage, endless } => ObjectiveSettings::Cheese {
                garbage: self.garbage.unwrap_or(garbage),
                endless: self.endless || endless,
            },
            ObjectiveSettings::ScoreAttack { duration_secs } => ObjectiveSettings::ScoreAttack {
                duration_secs: self.duration.unwrap_or(duration_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("termblocks").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_subcommand() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn test_play_flags() {
        let cli = parse(&[
            "play",
            "--seed",
            "42",
            "--objective",
            "cheese",
            "--garbage",
            "6",
            "--lock-delay",
            "20",
        ]);
        let Some(Command::Play(args)) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.seed(), 42);
        assert_eq!(
            args.objective(),
            ObjectiveSettings::Cheese {
                garbage: 6,
                endless: false
            }
        );
        assert_eq!(args.settings().lock_delay, 20);
        assert_eq!(args.settings().max_resets, GlobalSettings::default().max_resets);
    }

    #[test]
    fn test_objective_defaults() {
        let cli = parse(&["play", "-o", "line-clear"]);
        let Some(Command::Play(args)) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.objective(), ObjectiveSettings::LineClear { lines: 40 });
    }

    #[test]
    fn test_verify_takes_file() {
        let cli = parse(&["verify", "run.replay"]);
        assert!(matches!(cli.command, Some(Command::Verify { file }) if file == PathBuf::from("run.replay")));
    }
}
