//! Display widget: the right-aligned value above the keys.
//!
//! Short values are drawn as three-row segment glyphs, medium ones as bold
//! letter-spaced text, long ones as plain text. A tier that does not fit
//! the width falls back to the next smaller one.

use super::traits::Widget;
use crate::actor::InputEvent;
use crate::buffer::{Buffer, Cell, Modifiers};
use crate::calc::{Calculator, DisplayScale, Key};
use crate::config::Theme;
use crate::layout::Rect;

/// Columns left free at the right edge.
const RIGHT_PADDING: u16 = 1;

/// Rows of a segment glyph.
const GLYPH_ROWS: usize = 3;

/// Segment glyph for a display character, top row first.
fn glyph(c: char) -> Option<[&'static str; GLYPH_ROWS]> {
    Some(match c {
        '0' => [" _ ", "| |", "|_|"],
        '1' => ["   ", "  |", "  |"],
        '2' => [" _ ", " _|", "|_ "],
        '3' => [" _ ", " _|", " _|"],
        '4' => ["   ", "|_|", "  |"],
        '5' => [" _ ", "|_ ", " _|"],
        '6' => [" _ ", "|_ ", "|_|"],
        '7' => [" _ ", "  |", "  |"],
        '8' => [" _ ", "|_|", "|_|"],
        '9' => [" _ ", "|_|", " _|"],
        '-' => ["   ", " _ ", "   "],
        '.' => [" ", " ", "."],
        ',' => [" ", " ", ","],
        _ => return None,
    })
}

/// Segment rendering of `text`, one string per row, or `None` when a
/// character has no glyph.
fn segment_rows(text: &str) -> Option<[String; GLYPH_ROWS]> {
    let mut rows: [String; GLYPH_ROWS] = Default::default();
    for (i, c) in text.chars().enumerate() {
        let parts = glyph(c)?;
        for (row, part) in rows.iter_mut().zip(parts) {
            if i > 0 {
                row.push(' ');
            }
            row.push_str(part);
        }
    }
    Some(rows)
}

/// `1,234` becomes `1 , 2 3 4`.
fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn columns(text: &str) -> u16 {
    u16::try_from(unicode_width::UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

/// Shows the calculator's display string.
#[derive(Debug)]
pub struct DisplayWidget {
    text: String,
    scale: DisplayScale,
    bounds: Rect,
    theme: Theme,
    dirty: bool,
}

impl DisplayWidget {
    /// A display showing `0`.
    pub fn new(bounds: Rect, theme: Theme) -> Self {
        Self {
            text: String::from("0"),
            scale: DisplayScale::Large,
            bounds,
            theme,
            dirty: true,
        }
    }

    /// Pick up the calculator's current display.
    pub fn update(&mut self, calculator: &Calculator) {
        let text = calculator.display();
        let scale = calculator.display_scale();
        if text != self.text || scale != self.scale {
            self.text = text;
            self.scale = scale;
            self.dirty = true;
        }
    }

    /// The text being shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The size tier being shown.
    pub const fn scale(&self) -> DisplayScale {
        self.scale
    }

    fn right_edge(&self) -> u16 {
        self.bounds.right().saturating_sub(RIGHT_PADDING)
    }

    fn usable_width(&self) -> u16 {
        self.bounds.width.saturating_sub(RIGHT_PADDING)
    }

    /// Right-align one line of text on `row`, keeping its tail when it is
    /// too wide.
    fn put_line(&self, buffer: &mut Buffer, row: u16, text: &str, modifiers: Modifiers) {
        let available = usize::from(self.usable_width());
        let chars: Vec<char> = text.chars().collect();
        let skip = chars.len().saturating_sub(available);
        let visible: String = chars[skip..].iter().collect();
        let x = self.right_edge().saturating_sub(columns(&visible));
        buffer.put_str(
            x,
            row,
            &visible,
            (self.theme.display_fg, self.theme.background, modifiers),
            self.bounds,
        );
    }

    fn render_segments(&self, buffer: &mut Buffer, rows: &[String; GLYPH_ROWS]) {
        let top = self.bounds.bottom().saturating_sub(3);
        for (offset, line) in (0u16..).zip(rows) {
            self.put_line(buffer, top + offset, line, Modifiers::BOLD);
        }
    }
}

impl Widget for DisplayWidget {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        buffer.fill_rect(self.bounds, Cell::EMPTY.with_bg(self.theme.background));
        if self.bounds.is_empty() {
            return;
        }
        let bottom = self.bounds.bottom() - 1;
        let width = self.usable_width();

        if self.scale == DisplayScale::Large && self.bounds.height >= 3 {
            if let Some(rows) = segment_rows(&self.text) {
                if columns(&rows[0]) <= width {
                    self.render_segments(buffer, &rows);
                    return;
                }
            }
        }
        if self.scale != DisplayScale::Small {
            let text = spaced(&self.text);
            if columns(&text) <= width {
                self.put_line(buffer, bottom, &text, Modifiers::BOLD);
                return;
            }
        }
        self.put_line(buffer, bottom, &self.text, Modifiers::empty());
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

    fn rendered(calculator: &Calculator, width: u16) -> Buffer {
        let mut widget = DisplayWidget::new(Rect::new(0, 0, width, 4), Theme::default());
        widget.update(calculator);
        let mut buffer = Buffer::new(width, 4);
        widget.render(&mut buffer);
        buffer
    }

    fn typed(keys: &str) -> Calculator {
        let mut calculator = Calculator::new();
        for key in keys.chars().filter_map(Key::from_char) {
            calculator.press(key);
        }
        calculator
    }

    #[test]
    fn test_segment_rows() {
        let rows = segment_rows("-1.5").unwrap();
        assert_eq!(rows[0], "           _ ");
        assert_eq!(rows[1], " _    |   |_ ");
        assert_eq!(rows[2], "      | .  _|");
        assert!(segment_rows("1e+7").is_none());
    }

    #[test]
    fn test_large_value_uses_segments() {
        let buffer = rendered(&typed("42"), 24);
        assert_eq!(buffer.row_text(1), "                     _  ");
        assert_eq!(buffer.row_text(2), "                |_|  _| ");
        assert_eq!(buffer.row_text(3), "                  | |_  ");
    }

    #[test]
    fn test_medium_value_is_spaced() {
        let buffer = rendered(&typed("123456"), 24);
        assert_eq!(buffer.row_text(3).trim_end(), "          1 2 3 , 4 5 6");
        assert_eq!(buffer.get(10, 3).map(|c| c.modifiers()), Some(Modifiers::BOLD));
    }

    #[test]
    fn test_small_value_is_plain() {
        let buffer = rendered(&typed("123456789"), 24);
        assert_eq!(buffer.row_text(3), "            123,456,789 ");
        assert!(buffer.row_text(2).trim().is_empty());
    }

    #[test]
    fn test_falls_back_when_narrow() {
        // segment glyphs for 1,234 need 17 columns
        let buffer = rendered(&typed("1234"), 12);
        assert_eq!(buffer.row_text(3), "  1 , 2 3 4 ");
    }

    #[test]
    fn test_update_marks_dirty_only_on_change() {
        let mut widget = DisplayWidget::new(Rect::new(0, 0, 20, 4), Theme::default());
        widget.clear_redraw();
        widget.update(&Calculator::new());
        assert!(!widget.needs_redraw());
        widget.update(&typed("7"));
        assert!(widget.needs_redraw());
        assert_eq!(widget.text(), "7");
    }
}
