//! FieldView: draws a field snapshot, its particles and the session stats into
//! a framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{get_shape, FieldSnapshot, ParticleSystem};
use crate::engine::{Phase, Session, Stat};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{
    GameOver, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FRAMES_PER_SECOND, GARBAGE_CELL,
    VISIBLE_HEIGHT,
};

/// First board row shown on screen.
const FIRST_VISIBLE_ROW: i32 = (BOARD_HEIGHT - VISIBLE_HEIGHT) as i32;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_WIDTH: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Text drawn over the well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Frames left before the first piece.
    Countdown(i64),
    Paused,
    Finished(GameOver),
}

impl Overlay {
    pub fn for_session(session: &Session) -> Self {
        if session.paused() {
            return Overlay::Paused;
        }
        match session.phase() {
            Phase::Countdown { remaining } => Overlay::Countdown(remaining),
            Phase::Playing => Overlay::None,
            Phase::Finished => session
                .game_over()
                .cloned()
                .map_or(Overlay::None, Overlay::Finished),
        }
    }
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub snapshot: &'a FieldSnapshot,
    pub particles: Option<&'a ParticleSystem>,
    pub stats: &'a [Stat],
    pub overlay: &'a Overlay,
    /// Extra line under the panel, e.g. "REPLAY".
    pub banner: Option<&'a str>,
}

pub struct FieldView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for FieldView {
    fn default() -> Self {
        // 2x1 roughly squares the cells in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl FieldView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, state: &ViewState<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let well_w = BOARD_WIDTH as u16 * self.cell_w;
        let well_h = VISIBLE_HEIGHT as u16 * self.cell_h;
        let frame_w = well_w + 2;
        let frame_h = well_h + 2;

        let origin_x = viewport.width.saturating_sub(frame_w + 2 + PANEL_WIDTH) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;
        let well = Well {
            x: origin_x + 1,
            y: origin_y + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        };

        fb.fill_rect(well.x, well.y, well_w, well_h, ' ', CellStyle::default().on(WELL_BG));
        draw_border(
            fb,
            origin_x,
            origin_y,
            frame_w,
            frame_h,
            CellStyle::fg(Rgb::new(200, 200, 200)),
        );

        let snap = state.snapshot;
        for (row, cells) in snap.board.iter().enumerate().skip(FIRST_VISIBLE_ROW as usize) {
            for (x, &value) in cells.iter().enumerate() {
                let vy = row as i32 - FIRST_VISIBLE_ROW;
                match cell_color(value) {
                    Some(fg) => well.fill(fb, x as i32, vy, '█', CellStyle::fg(fg).on(WELL_BG)),
                    None => well.fill(
                        fb,
                        x as i32,
                        vy,
                        '·',
                        CellStyle::fg(Rgb::new(90, 90, 100)).on(WELL_BG).dim(),
                    ),
                }
            }
        }

        if let Some(particles) = state.particles {
            for p in particles.iter() {
                let empty = snap
                    .board
                    .get((p.y + FIRST_VISIBLE_ROW) as usize)
                    .and_then(|row| row.get(p.x as usize))
                    .map_or(false, |&c| c == 0);
                if empty {
                    let style = CellStyle::fg(piece_color(p.kind)).on(WELL_BG).dim();
                    well.fill(fb, p.x, p.y, p.glyph(), style);
                }
            }
        }

        if let Some(active) = snap.active {
            let shape = get_shape(active.kind, active.rotation);
            let ghost = CellStyle::fg(Rgb::new(140, 140, 140)).on(WELL_BG).dim();
            if let Some(s) = snap.snap {
                for &(dx, dy) in shape.iter() {
                    let (dx, dy) = (dx as i32, dy as i32);
                    well.fill(fb, s.left_x + dx, s.left_y + dy - FIRST_VISIBLE_ROW, '▒', ghost);
                    well.fill(fb, s.right_x + dx, s.right_y + dy - FIRST_VISIBLE_ROW, '▒', ghost);
                }
            }
            if let Some(ghost_y) = snap.ghost_y {
                for &(dx, dy) in shape.iter() {
                    let y = ghost_y + dy as i32 - FIRST_VISIBLE_ROW;
                    well.fill(fb, active.x + dx as i32, y, '░', ghost);
                }
            }
            let style = CellStyle::fg(piece_color(active.kind)).on(WELL_BG).bold();
            for &(dx, dy) in shape.iter() {
                let y = active.y + dy as i32 - FIRST_VISIBLE_ROW;
                well.fill(fb, active.x + dx as i32, y, '█', style);
            }
        }

        self.draw_panel(fb, state, viewport, origin_x + frame_w + 2, origin_y);

        match state.overlay {
            Overlay::None => {}
            Overlay::Countdown(frames) => {
                let secs = (frames + FRAMES_PER_SECOND - 1) / FRAMES_PER_SECOND;
                draw_centered(fb, origin_x, origin_y + frame_h / 2, frame_w, &secs.to_string());
            }
            Overlay::Paused => draw_centered(fb, origin_x, origin_y + frame_h / 2, frame_w, "PAUSED"),
            Overlay::Finished(over) => {
                let title = if over.failed { "GAME OVER" } else { "COMPLETE" };
                let mid = origin_y + frame_h / 2;
                draw_centered(fb, origin_x, mid, frame_w, title);
                draw_centered(fb, origin_x, mid + 1, frame_w, &over.reason);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &ViewState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, state: &ViewState<'_>, viewport: Viewport, x: u16, top: u16) {
        if x >= viewport.width {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let snap = state.snapshot;

        let mut y = top;
        fb.put_str(x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                let style = if snap.can_hold { value } else { value.dim() };
                fb.put_str(x, y, kind.as_str(), style);
            }
            None => fb.put_str(x, y, "-", value),
        }
        y += 2;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        for kind in snap.next_queue.iter() {
            fb.put_str(x, y, kind.as_str(), CellStyle::fg(piece_color(*kind)));
            y += 1;
        }
        y += 1;

        for stat in state.stats {
            fb.put_str(x, y, stat.name, label);
            y += 1;
            for line in &stat.lines {
                fb.put_str(x, y, line, value);
                y += 1;
            }
            y += 1;
        }

        if snap.shift_mode {
            fb.put_str(x, y, "SHIFT", CellStyle::fg(Rgb::new(240, 220, 80)).bold());
            y += 1;
        }
        if let Some(banner) = state.banner {
            fb.put_str(x, y, banner, value.dim());
        }
    }
}

/// Maps board cells to framebuffer cells.
struct Well {
    x: u16,
    y: u16,
    cell_w: u16,
    cell_h: u16,
}

impl Well {
    /// Fill board cell `(x, vy)` (visible coordinates); off-well cells are skipped.
    fn fill(&self, fb: &mut FrameBuffer, x: i32, vy: i32, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i32 || vy < 0 || vy >= VISIBLE_HEIGHT as i32 {
            return;
        }
        let px = self.x + x as u16 * self.cell_w;
        let py = self.y + vy as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let cx = x.saturating_add(w.saturating_sub(text_w) / 2);
    fb.put_str(cx, y, text, CellStyle::fg(Rgb::new(255, 255, 255)).bold());
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

fn cell_color(value: u8) -> Option<Rgb> {
    if value == GARBAGE_CELL {
        return Some(Rgb::new(130, 130, 130));
    }
    PieceKind::from_cell(value).map(piece_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Field;
    use crate::types::GlobalSettings;

    fn render(snap: &FieldSnapshot, overlay: Overlay) -> FrameBuffer {
        let state = ViewState {
            snapshot: snap,
            particles: None,
            stats: &[],
            overlay: &overlay,
            banner: None,
        };
        FieldView::default().render(&state, Viewport::new(60, 24))
    }

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
    }

    #[test]
    fn test_border_and_well_size() {
        let fb = render(&FieldSnapshot::default(), Overlay::None);
        // 60 - (22 + 2 + 16) = 20 → origin x 10; 24 - 22 = 2 → origin y 1.
        assert_eq!(fb.get(10, 1).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(31, 1).map(|c| c.ch), Some('┐'));
        assert_eq!(fb.get(10, 22).map(|c| c.ch), Some('└'));
    }

    #[test]
    fn test_bottom_row_cells_are_drawn() {
        let mut snap = FieldSnapshot::default();
        snap.board[BOARD_HEIGHT - 1][0] = GARBAGE_CELL;
        let fb = render(&snap, Overlay::None);
        let cell = fb.get(11, 21).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::new(130, 130, 130));
        assert_eq!(fb.get(13, 21).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn test_active_piece_and_panel() {
        let mut field = Field::new(8, GlobalSettings::default());
        field.start();
        let snap = field.snapshot();
        let fb = render(&snap, Overlay::None);
        let text = screen(&fb);
        assert!(text.contains("HOLD"));
        assert!(text.contains("NEXT"));
        assert!(text.contains('░'));
    }

    #[test]
    fn test_overlays() {
        let snap = FieldSnapshot::default();
        assert!(screen(&render(&snap, Overlay::Paused)).contains("PAUSED"));
        // Overlay text sits on the middle row of the frame.
        assert!(render(&snap, Overlay::Countdown(150)).row_text(12).contains('3'));
        let over = render(&snap, Overlay::Finished(GameOver::failure("Could not place next piece")));
        let text = screen(&over);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Could not place next piece"));
    }
}
