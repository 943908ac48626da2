//! Buffer: a row-major grid of cells covering the terminal.

use super::cell::{Cell, Modifiers, Rgb};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;

/// A grid of cells representing the terminal screen.
///
/// Cells are stored contiguously: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// Create a buffer filled with empty cells.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        Self {
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Buffer width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full area as a rectangle.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Linear index of `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// The cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Replace the cell at `(x, y)`. Returns `false` when out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.index_of(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Write a run of text starting at `(x, y)`, clipped to `clip`.
    ///
    /// Wide graphemes take two columns. Returns the number of columns
    /// written.
    pub fn put_str(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        style: (Rgb, Rgb, Modifiers),
        clip: Rect,
    ) -> u16 {
        let (fg, bg, modifiers) = style;
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let Some(cell) = Cell::from_grapheme(grapheme) else {
                continue;
            };
            let width = u16::from(cell.display_width().max(1));
            if !clip.contains(col, y) || col + width > clip.right() {
                break;
            }
            self.set(col, y, cell.with_fg(fg).with_bg(bg).with_modifiers(modifiers));
            if width == 2 {
                self.set(col + 1, y, Cell::wide_continuation().with_bg(bg));
            }
            col += width;
        }
        col - x
    }

    /// Fill a rectangle with copies of `cell`.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let clipped = rect.intersection(&self.area());
        for row in clipped.y..clipped.bottom() {
            let start = usize::from(row) * usize::from(self.width);
            let from = start + usize::from(clipped.x);
            let to = start + usize::from(clipped.right());
            self.cells[from..to].fill(cell);
        }
    }

    /// Fill the whole buffer with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.fill(Cell::EMPTY);
    }

    /// Resize, keeping the overlapping top-left content.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }

        let mut cells = vec![Cell::EMPTY; usize::from(width) * usize::from(height)];
        let copy_width = usize::from(self.width.min(width));
        for y in 0..usize::from(self.height.min(height)) {
            let old = y * usize::from(self.width);
            let new = y * usize::from(width);
            cells[new..new + copy_width].copy_from_slice(&self.cells[old..old + copy_width]);
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
    }

    /// Copy content from a buffer of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// The text of one row, wide-character continuations skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.width);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .filter(|cell| !cell.is_wide_continuation())
            .map(Cell::grapheme)
            .collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: (Rgb, Rgb, Modifiers) = (Rgb::WHITE, Rgb::BLACK, Modifiers::empty());

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(40, 20);
        assert_eq!(buffer.width(), 40);
        assert_eq!(buffer.height(), 20);
        assert_eq!(buffer.cells().len(), 800);
    }

    #[test]
    #[should_panic]
    fn test_buffer_zero_width() {
        Buffer::new(0, 20);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = Buffer::new(10, 5);
        assert!(buffer.set(9, 4, Cell::new('X')));
        assert!(!buffer.set(10, 4, Cell::new('X')));
        assert!(buffer.get(9, 5).is_none());
        assert_eq!(buffer.index_of(3, 2), Some(23));
    }

    #[test]
    fn test_put_str_clips() {
        let mut buffer = Buffer::new(10, 2);
        let written = buffer.put_str(6, 0, "12345", PLAIN, buffer.area());
        assert_eq!(written, 4);
        assert_eq!(buffer.row_text(0), "      1234");
    }

    #[test]
    fn test_put_str_operator_glyphs() {
        let mut buffer = Buffer::new(6, 1);
        buffer.put_str(0, 0, "1÷2×3", PLAIN, buffer.area());
        assert_eq!(buffer.row_text(0), "1÷2×3 ");
    }

    #[test]
    fn test_put_str_wide() {
        let mut buffer = Buffer::new(4, 1);
        let written = buffer.put_str(0, 0, "日本", PLAIN, buffer.area());
        assert_eq!(written, 4);
        assert!(buffer.get(1, 0).is_some_and(Cell::is_wide_continuation));
        assert_eq!(buffer.row_text(0), "日本");
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut buffer = Buffer::new(10, 5);
        buffer.fill_rect(Rect::new(8, 3, 5, 5), Cell::new('#'));
        assert_eq!(buffer.get(9, 4).map(Cell::grapheme), Some("#"));
        assert_eq!(buffer.get(7, 4).map(Cell::grapheme), Some(" "));
    }

    #[test]
    fn test_resize_keeps_content() {
        let mut buffer = Buffer::new(10, 5);
        buffer.set(2, 2, Cell::new('X'));
        buffer.resize(20, 8);
        assert_eq!(buffer.get(2, 2).map(Cell::grapheme), Some("X"));
        buffer.resize(3, 3);
        assert_eq!(buffer.get(2, 2).map(Cell::grapheme), Some("X"));
        assert!(buffer.get(5, 5).is_none());
    }
}
