//! Live play and visual replay loops.
//!
//! Both loops draw once per iteration, wait for input until the next tick is
//! due, then run every tick the fixed timestep has accumulated.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};

use termblocks::core::FieldSnapshot;
use termblocks::engine::{FixedTimestep, Session, SessionConfig};
use termblocks::input::handle_key_event;
use termblocks::replay::{
    from_base64, from_base64_gzip, to_base64_gzip, Player, Recorder, ReplayRecord,
};
use termblocks::term::{FieldView, FrameBuffer, Overlay, TerminalRenderer, ViewState, Viewport};
use termblocks::types::Action;
use termblocks::AppConfig;

/// Reusable per-frame drawing state.
struct Screen {
    view: FieldView,
    fb: FrameBuffer,
    snapshot: FieldSnapshot,
}

impl Screen {
    fn new() -> Self {
        Self {
            view: FieldView::default(),
            fb: FrameBuffer::new(0, 0),
            snapshot: FieldSnapshot::default(),
        }
    }

    fn draw(&mut self, term: &mut TerminalRenderer, session: &Session, banner: Option<&str>) -> Result<()> {
        session.field().snapshot_into(&mut self.snapshot);
        let stats = session.stats();
        let overlay = Overlay::for_session(session);
        let state = ViewState {
            snapshot: &self.snapshot,
            particles: Some(session.field().particles()),
            stats: &stats,
            overlay: &overlay,
            banner,
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(&state, Viewport::new(w, h), &mut self.fb);
        term.draw_swap(&mut self.fb)
    }
}

/// Next action from the terminal, waiting at most `timeout`.
fn poll_action(term: &mut TerminalRenderer, timeout: Duration) -> Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(handle_key_event(key)),
        Event::Resize(..) => {
            term.invalidate();
            Ok(None)
        }
        _ => Ok(None),
    }
}

pub fn play(term: &mut TerminalRenderer, app: &AppConfig, config: SessionConfig) -> Result<()> {
    let mut session = Session::new(config);
    let mut recorder = Recorder::new(&session);
    let mut screen = Screen::new();
    let mut clock = FixedTimestep::default();
    let mut last = Instant::now();

    loop {
        screen.draw(term, &session, None)?;

        if let Some(action) = poll_action(term, clock.until_next())? {
            match action {
                Action::Quit => break,
                // Confirm only means something on the result screen.
                Action::MenuConfirm if !session.is_finished() => {}
                Action::Reset | Action::MenuConfirm => {
                    save_replay(app, recorder.record());
                    recorder.apply(&mut session, Action::Reset);
                }
                _ => {
                    recorder.apply(&mut session, action);
                }
            }
        }

        let now = Instant::now();
        for _ in 0..clock.advance(now - last) {
            session.update();
        }
        last = now;
    }

    save_replay(app, recorder.record());
    Ok(())
}

pub fn watch(term: &mut TerminalRenderer, app: &AppConfig, record: &ReplayRecord) -> Result<()> {
    let mut player = Player::new(record, app.countdown_frames);
    let mut screen = Screen::new();
    let mut clock = FixedTimestep::default();
    let mut last = Instant::now();

    loop {
        screen.draw(term, player.session(), Some("REPLAY"))?;

        match poll_action(term, clock.until_next())? {
            Some(Action::Quit) => break,
            Some(Action::Pause) => {
                player.session_mut().toggle_pause();
            }
            _ => {}
        }

        let now = Instant::now();
        for _ in 0..clock.advance(now - last) {
            player.step();
        }
        last = now;
    }
    Ok(())
}

/// Write the record as gzip+base64. Failures are logged, not returned.
fn save_replay(app: &AppConfig, record: &ReplayRecord) {
    if record.actions.is_empty() {
        return;
    }
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    let path = app.replay_path(record.objective.id().as_str(), record.seed, stamp);
    match write_replay(&path, record) {
        Ok(()) => info!(path = %path.display(), actions = record.actions.len(), "replay saved"),
        Err(err) => warn!(path = %path.display(), "failed to save replay: {:#}", err),
    }
}

fn write_replay(path: &Path, record: &ReplayRecord) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut text = to_base64_gzip(record)?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read a replay file, accepting gzip+base64 or plain base64.
pub fn read_replay(path: &Path) -> Result<ReplayRecord> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match from_base64_gzip(&text) {
        Ok(record) => Ok(record),
        Err(gzip_err) => from_base64(&text)
            .with_context(|| format!("{} is not a replay (gzip: {})", path.display(), gzip_err)),
    }
}
