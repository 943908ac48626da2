//! Diffing engine: minimal ANSI output between two frames.
//!
//! A key press usually changes the display strip and, at most, two key
//! faces (the operator highlight moving). Diffing keeps the bytes written
//! per key press proportional to that, instead of repainting the panel.
//!
//! All output is accumulated in one `Vec<u8>` and flushed with one write.

use super::{Buffer, Cell, Modifiers, Rgb};
use crate::layout::Rect;
use std::io::Write;

/// What the terminal is believed to have: cursor position and SGR state.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl DiffState {
    /// State with the cursor at the origin and unknown colors.
    pub const fn new() -> Self {
        Self {
            cursor: Some((0, 0)),
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything, e.g. after a full redraw.
    pub const fn reset(&mut self) {
        self.cursor = None;
        self.fg = None;
        self.bg = None;
        self.modifiers = None;
    }
}

/// Counters from one diff pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Cells that differed.
    pub cells_changed: usize,
    /// Cursor positioning sequences emitted.
    pub cursor_moves: usize,
    /// Color sequences emitted.
    pub color_changes: usize,
}

/// Write the ANSI needed to turn `current` into `next`.
///
/// Only cells inside `dirty` are compared; an empty slice means the whole
/// screen.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    dirty: &[Rect],
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let full = next.area();
    let regions = if dirty.is_empty() {
        std::slice::from_ref(&full)
    } else {
        dirty
    };

    for region in regions {
        let region = region.intersection(&full);
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                let (Some(before), Some(after)) = (current.get(x, y), next.get(x, y)) else {
                    continue;
                };
                if before == after || after.is_wide_continuation() {
                    continue;
                }
                result.cells_changed += 1;

                if state.cursor != Some((x, y)) {
                    emit_cursor_move(output, x, y);
                    result.cursor_moves += 1;
                }
                emit_style(output, after, state, &mut result);
                output.extend_from_slice(after.grapheme().as_bytes());

                let advance = u16::from(after.display_width().max(1));
                state.cursor = Some((x + advance, y));
            }
        }
    }

    result
}

/// Repaint every cell, assuming nothing about the terminal.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>) {
    let mut state = DiffState::new();
    let mut result = DiffResult::default();

    output.extend_from_slice(b"\x1b[?25l\x1b[0m\x1b[H");
    for (y, row) in (0..buffer.height()).zip(buffer.cells().chunks(usize::from(buffer.width()))) {
        if y > 0 {
            emit_cursor_move(output, 0, y);
        }
        for cell in row.iter().filter(|cell| !cell.is_wide_continuation()) {
            emit_style(output, cell, &mut state, &mut result);
            output.extend_from_slice(cell.grapheme().as_bytes());
        }
    }
    output.extend_from_slice(b"\x1b[0m");
}

/// Emit SGR sequences so the terminal matches `cell`'s style.
fn emit_style(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState, result: &mut DiffResult) {
    let wanted = cell.modifiers();
    let active = state.modifiers.unwrap_or_else(Modifiers::empty);

    // Turning a modifier off needs a full reset, which drops colors too.
    if state.modifiers.is_none() || !active.difference(wanted).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        emit_modifier_set(output, wanted);
    } else {
        emit_modifier_set(output, wanted.difference(active));
    }
    state.modifiers = Some(wanted);

    if state.fg != Some(cell.fg()) {
        let Rgb { r, g, b } = cell.fg();
        let _ = write!(output, "\x1b[38;2;{r};{g};{b}m");
        state.fg = Some(cell.fg());
        result.color_changes += 1;
    }
    if state.bg != Some(cell.bg()) {
        let Rgb { r, g, b } = cell.bg();
        let _ = write!(output, "\x1b[48;2;{r};{g};{b}m");
        state.bg = Some(cell.bg());
        result.color_changes += 1;
    }
}

/// Emit a cursor move (1-indexed on the wire).
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    match (x, y) {
        (0, 0) => output.extend_from_slice(b"\x1b[H"),
        (0, row) => {
            let _ = write!(output, "\x1b[{}H", row + 1);
        }
        (col, row) => {
            let _ = write!(output, "\x1b[{};{}H", row + 1, col + 1);
        }
    }
}

fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    const CODES: [(Modifiers, &[u8]); 5] = [
        (Modifiers::BOLD, b"\x1b[1m"),
        (Modifiers::DIM, b"\x1b[2m"),
        (Modifiers::ITALIC, b"\x1b[3m"),
        (Modifiers::UNDERLINE, b"\x1b[4m"),
        (Modifiers::REVERSED, b"\x1b[7m"),
    ];
    for (flag, code) in CODES {
        if modifiers.contains(flag) {
            output.extend_from_slice(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_buffers_emit_nothing() {
        let a = Buffer::new(10, 5);
        let b = a.clone();
        let mut output = Vec::new();
        let result = render_diff(&a, &b, &[], &mut output, &mut DiffState::new());
        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_single_change() {
        let a = Buffer::new(10, 5);
        let mut b = a.clone();
        b.set(5, 2, Cell::new('7'));

        let mut output = Vec::new();
        let result = render_diff(&a, &b, &[], &mut output, &mut DiffState::new());

        assert_eq!(result.cells_changed, 1);
        assert_eq!(result.cursor_moves, 1);
        let text = String::from_utf8_lossy(&output);
        assert!(text.starts_with("\x1b[3;6H"));
        assert!(text.ends_with('7'));
    }

    #[test]
    fn test_adjacent_cells_share_cursor_move() {
        let a = Buffer::new(10, 5);
        let mut b = a.clone();
        b.set(3, 1, Cell::new('4'));
        b.set(4, 1, Cell::new('2'));

        let mut state = DiffState::new();
        let mut output = Vec::new();
        let result = render_diff(&a, &b, &[], &mut output, &mut state);

        assert_eq!(result.cells_changed, 2);
        assert_eq!(result.cursor_moves, 1);
        // fg and bg once, then reused for the second cell
        assert_eq!(result.color_changes, 2);
    }

    #[test]
    fn test_dirty_region_limits_diff() {
        let a = Buffer::new(20, 10);
        let mut b = a.clone();
        b.set(0, 0, Cell::new('X'));
        b.set(10, 5, Cell::new('Y'));

        let mut output = Vec::new();
        let dirty = [Rect::new(8, 4, 5, 3)];
        let result = render_diff(&a, &b, &dirty, &mut output, &mut DiffState::new());
        assert_eq!(result.cells_changed, 1);
        assert!(!String::from_utf8_lossy(&output).contains('X'));
    }

    #[test]
    fn test_removed_modifier_resets() {
        let mut a = Buffer::new(4, 1);
        a.set(0, 0, Cell::new('A').with_modifiers(Modifiers::BOLD));
        let mut b = a.clone();
        b.set(0, 0, Cell::new('A'));

        let mut state = DiffState::new();
        state.modifiers = Some(Modifiers::BOLD);
        let mut output = Vec::new();
        render_diff(&a, &b, &[], &mut output, &mut state);
        assert!(String::from_utf8_lossy(&output).contains("\x1b[0m"));
        assert_eq!(state.modifiers, Some(Modifiers::empty()));
    }

    #[test]
    fn test_cursor_move_forms() {
        let mut output = Vec::new();
        emit_cursor_move(&mut output, 0, 0);
        assert_eq!(output, b"\x1b[H");
        output.clear();
        emit_cursor_move(&mut output, 0, 5);
        assert_eq!(output, b"\x1b[6H");
        output.clear();
        emit_cursor_move(&mut output, 10, 5);
        assert_eq!(output, b"\x1b[6;11H");
    }

    #[test]
    fn test_render_full() {
        let mut buffer = Buffer::new(3, 2);
        buffer.put_str(0, 0, "1÷2", (Rgb::WHITE, Rgb::BLACK, Modifiers::empty()), buffer.area());

        let mut output = Vec::new();
        render_full(&buffer, &mut output);
        let text = String::from_utf8_lossy(&output);
        assert!(text.starts_with("\x1b[?25l\x1b[0m\x1b[H"));
        assert!(text.contains("1÷2"));
        assert!(text.contains("\x1b[2H"));
        assert!(text.ends_with("\x1b[0m"));
    }
}
