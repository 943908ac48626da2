//! Status bar widget: the hint line under the keys.
//!
//! Three sections: left-aligned, centered and right-aligned. Each section
//! gets at most a third of the width.

use super::traits::Widget;
use crate::actor::InputEvent;
use crate::buffer::{Buffer, Cell, Modifiers, Rgb};
use crate::calc::Key;
use crate::layout::Rect;

/// Colors of the status bar.
#[derive(Debug, Clone, Copy)]
pub struct StatusBarStyle {
    /// Background color.
    pub bg: Rgb,
    /// Text color.
    pub fg: Rgb,
}

/// A three-section status line.
#[derive(Debug)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    bounds: Rect,
    style: StatusBarStyle,
    dirty: bool,
}

impl StatusBar {
    /// An empty status bar.
    pub const fn new(bounds: Rect, style: StatusBarStyle) -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            bounds,
            style,
            dirty: true,
        }
    }

    /// Replace all three sections.
    pub fn set_all(&mut self, left: impl Into<String>, center: impl Into<String>, right: impl Into<String>) {
        let (left, center, right) = (left.into(), center.into(), right.into());
        if left != self.left || center != self.center || right != self.right {
            self.left = left;
            self.center = center;
            self.right = right;
            self.dirty = true;
        }
    }

    /// Left section.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Center section.
    pub fn center(&self) -> &str {
        &self.center
    }

    /// Right section.
    pub fn right(&self) -> &str {
        &self.right
    }

    fn section(text: &str, max: usize) -> (String, u16) {
        let clipped: String = text.chars().take(max).collect();
        let width = u16::try_from(unicode_width::UnicodeWidthStr::width(clipped.as_str())).unwrap_or(0);
        (clipped, width)
    }
}

impl Widget for StatusBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        let StatusBarStyle { bg, fg } = self.style;
        buffer.fill_rect(self.bounds, Cell::EMPTY.with_bg(bg));
        if self.bounds.is_empty() {
            return;
        }
        let (x, y, width) = (self.bounds.x, self.bounds.y, self.bounds.width);
        let third = usize::from(width / 3);
        let style = (fg, bg, Modifiers::DIM);

        let (left, _) = Self::section(&self.left, third);
        buffer.put_str(x, y, &left, style, self.bounds);

        let (center, center_width) = Self::section(&self.center, third);
        buffer.put_str(x + (width - center_width) / 2, y, &center, style, self.bounds);

        let (right, right_width) = Self::section(&self.right, third);
        buffer.put_str(x + width - right_width, y, &right, style, self.bounds);
    }

    fn handle_input(&mut self, _event: &InputEvent) -> Option<Key> {
        None
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: StatusBarStyle = StatusBarStyle {
        bg: Rgb::BLACK,
        fg: Rgb::WHITE,
    };

    #[test]
    fn test_sections_are_aligned() {
        let mut bar = StatusBar::new(Rect::new(0, 0, 30, 1), STYLE);
        bar.set_all("iCalci", "q", "immediate");
        let mut buffer = Buffer::new(30, 1);
        bar.render(&mut buffer);
        assert_eq!(buffer.row_text(0), "iCalci        q      immediate");
    }

    #[test]
    fn test_sections_are_clipped() {
        let mut bar = StatusBar::new(Rect::new(0, 0, 9, 1), STYLE);
        bar.set_all("abcdef", "", "uvwxyz");
        let mut buffer = Buffer::new(9, 1);
        bar.render(&mut buffer);
        assert_eq!(buffer.row_text(0), "abc   uvw");
    }

    #[test]
    fn test_set_all_marks_dirty_on_change() {
        let mut bar = StatusBar::new(Rect::new(0, 0, 30, 1), STYLE);
        bar.set_all("a", "b", "c");
        bar.clear_redraw();
        bar.set_all("a", "b", "c");
        assert!(!bar.needs_redraw());
        bar.set_all("a", "b", "d");
        assert!(bar.needs_redraw());
        assert_eq!((bar.left(), bar.center(), bar.right()), ("a", "b", "d"));
    }
}
