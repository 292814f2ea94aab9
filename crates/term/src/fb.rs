//! Framebuffer and style types for terminal rendering.

use crate::core::Grid;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }

    pub const fn on(self, bg: Rgb) -> Self {
        Self { bg, ..self }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::fg(Rgb::new(220, 220, 220))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Styled character cells, addressed in terminal columns/rows.
///
/// Writes outside the buffer are clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    cells: Grid<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: Grid::new(width as usize, height as usize, Cell::default()),
        }
    }

    pub fn width(&self) -> u16 {
        self.cells.width() as u16
    }

    pub fn height(&self) -> u16 {
        self.cells.height() as u16
    }

    /// Resize, resetting every cell when the size changes.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width() == width && self.height() == height {
            return;
        }
        *self = Self::new(width, height);
    }

    pub fn cells(&self) -> &[Cell] {
        self.cells.cells()
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.cells.get(x as i32, y as i32).copied()
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        self.cells.set(x as i32, y as i32, cell);
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x as usize + i;
            if cx >= self.width() as usize {
                break;
            }
            self.put_char(cx as u16, y, ch, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Row `y` as a string, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height() {
            return String::new();
        }
        self.cells.row(y as usize).iter().map(|c| c.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(fb.row_text(0), "  ab");
        fb.put_str(0, 5, "zz", CellStyle::default());
        assert_eq!(fb.row_text(1), "    ");
    }

    #[test]
    fn test_resize_resets() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_char(0, 0, 'x', CellStyle::default());
        fb.resize(2, 2);
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('x'));
        fb.resize(3, 1);
        assert_eq!(fb.width(), 3);
        assert_eq!(fb.get(0, 0), Some(Cell::default()));
        assert_eq!(fb.get(0, 1), None);
    }
}
