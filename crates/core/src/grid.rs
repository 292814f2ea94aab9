//! Grid module - dense 2D cell storage
//!
//! A `Grid<T>` is a width x height array stored row-major in one flat `Vec`
//! for cache locality. Coordinates are `(x, y)` with `x` growing right and `y`
//! growing down.
//!
//! Two access styles are provided:
//! - `get`/`get_mut`/`set` take signed coordinates and return `None`/`false`
//!   outside the grid. Collision checks rely on this.
//! - `at`/`at_mut` and `Index<(usize, usize)>` are for callers that already
//!   guarantee the bounds; out-of-range access panics.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        for cell in &mut self.cells {
            *cell = value.clone();
        }
    }

    /// Set every cell of row `y` to `value`.
    pub fn fill_row(&mut self, y: usize, value: T) {
        for cell in self.row_mut(y) {
            *cell = value.clone();
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index for `(x, y)`, or `None` outside the grid.
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write `value` at `(x, y)`. Returns false (and drops the value) outside the grid.
    pub fn set(&mut self, x: i32, y: i32, value: T) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Unchecked-by-contract access. Panics when `(x, y)` is outside the grid.
    #[inline(always)]
    pub fn at(&self, x: usize, y: usize) -> &T {
        assert!(x < self.width, "x {} out of range {}", x, self.width);
        &self.cells[y * self.width + x]
    }

    #[inline(always)]
    pub fn at_mut(&mut self, x: usize, y: usize) -> &mut T {
        assert!(x < self.width, "x {} out of range {}", x, self.width);
        &mut self.cells[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

impl<T: Copy> Grid<T> {
    /// Copy row `src` over row `dst` (overlap-safe, no allocation).
    pub fn copy_row(&mut self, src: usize, dst: usize) {
        assert!(src < self.height && dst < self.height);
        if src == dst {
            return;
        }
        let w = self.width;
        self.cells.copy_within(src * w..src * w + w, dst * w);
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        self.at(x, y)
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        self.at_mut(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_filled() {
        let g = Grid::new(4, 3, 7u8);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert!(g.cells().iter().all(|&c| c == 7));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let g = Grid::new(10, 40, 0u8);
        assert_eq!(g.get(0, 0), Some(&0));
        assert_eq!(g.get(9, 39), Some(&0));
        assert_eq!(g.get(-1, 0), None);
        assert_eq!(g.get(10, 0), None);
        assert_eq!(g.get(0, 40), None);
        assert_eq!(g.get(0, -1), None);
    }

    #[test]
    fn test_set_and_index() {
        let mut g = Grid::new(3, 3, 0u8);
        assert!(g.set(1, 2, 5));
        assert!(!g.set(3, 0, 5));
        assert_eq!(g[(1, 2)], 5);
        assert_eq!(*g.at(1, 2), 5);
        g[(0, 0)] = 9;
        assert_eq!(g.get(0, 0), Some(&9));
    }

    #[test]
    #[should_panic]
    fn test_at_panics_outside() {
        let g = Grid::new(3, 3, 0u8);
        let _ = g.at(3, 0);
    }

    #[test]
    fn test_row_major_layout() {
        let mut g = Grid::new(3, 2, 0u8);
        g.set(2, 0, 1);
        g.set(0, 1, 2);
        assert_eq!(g.cells(), &[0, 0, 1, 2, 0, 0]);
        assert_eq!(g.row(1), &[2, 0, 0]);
    }

    #[test]
    fn test_copy_and_fill_row() {
        let mut g = Grid::new(2, 3, 0u8);
        g.fill_row(2, 4);
        g.copy_row(2, 0);
        assert_eq!(g.row(0), &[4, 4]);
        assert_eq!(g.row(1), &[0, 0]);
        g.fill(1);
        assert!(g.rows().all(|r| r == [1, 1]));
    }
}
