//! termblocks runner.
//!
//! `play` and `replay` draw to the terminal in raw mode, so their logs go to
//! a file; `verify` is headless and logs to stderr.

mod app;
mod cli;

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use termblocks::engine::SessionConfig;
use termblocks::replay::{Player, MAX_PLAYBACK_FRAMES};
use termblocks::term::TerminalRenderer;
use termblocks::AppConfig;

use cli::{Cli, Command, PlayArgs};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_file_logging(config: &AppConfig) -> Result<()> {
    let file = File::create(config.log_file())
        .with_context(|| format!("creating log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(args) => {
            init_file_logging(&config)?;
            let session = SessionConfig::new(args.seed(), args.settings(), args.objective())
                .with_countdown(config.countdown_frames);
            info!(seed = session.seed, objective = %session.objective, "starting game");
            with_terminal(|term| app::play(term, &config, session))
        }
        Command::Replay { file } => {
            init_file_logging(&config)?;
            let record = app::read_replay(&file)?;
            with_terminal(|term| app::watch(term, &config, &record))
        }
        Command::Verify { file } => {
            init_stderr_logging();
            let record = app::read_replay(&file)?;
            let mut player = Player::new(&record, 0);
            let summary = player.run_to_end(MAX_PLAYBACK_FRAMES);

            println!("seed      {}", record.seed);
            println!("objective {}", record.objective);
            println!("actions   {}", record.actions.len());
            println!("score     {}", summary.score);
            println!("lines     {}", summary.lines);
            println!("pieces    {}", summary.pieces);
            println!("frame     {}", summary.frame);
            match &summary.game_over {
                Some(over) if over.failed => println!("result    failed: {}", over.reason),
                Some(over) => println!("result    completed: {}", over.reason),
                None => println!("result    unfinished after {} frames", summary.frame),
            }
            if player.pending() > 0 {
                println!("warning   {} actions never applied", player.pending());
            }
            Ok(())
        }
    }
}

/// Run `f` with the terminal in game mode, restoring it whatever `f` returns.
fn with_terminal(f: impl FnOnce(&mut TerminalRenderer) -> Result<()>) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = f(&mut term);
    let _ = term.exit();
    result
}
