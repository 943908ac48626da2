//! Keypad layout: display strip, 5×4 key grid and hint line.
//!
//! ```text
//! ┌───────────────────────────┐
//! │                      1,234│  display (4 rows)
//! │ AC    ±     %     ÷       │
//! │ 7     8     9     ×       │
//! │ 4     5     6     −       │  key grid (5 rows of keys)
//! │ 1     2     3     +       │
//! │ 0 ─────────  .     =      │
//! │ iCalci           q to quit│  hint (1 row)
//! └───────────────────────────┘
//! ```
//!
//! The layout is recomputed only on resize; rendering and mouse hit
//! testing read the precomputed rectangles.

use super::rect::Rect;
use crate::calc::{Key, Operation};
use crate::error::{Error, Result};

/// Rows reserved for the display.
pub const DISPLAY_ROWS: u16 = 4;
/// Rows reserved for the hint line.
pub const HINT_ROWS: u16 = 1;
/// Height of a key in rows.
pub const KEY_HEIGHT: u16 = 3;
/// Narrowest key face.
pub const MIN_KEY_WIDTH: u16 = 5;
/// Widest key face.
pub const MAX_KEY_WIDTH: u16 = 9;
/// Columns between neighbouring keys.
pub const KEY_GAP: u16 = 1;
/// Columns kept free on each side.
pub const MARGIN: u16 = 1;

const GRID_COLUMNS: u16 = 4;
const GRID_ROWS: u16 = 5;

/// Smallest terminal width the keypad fits in.
pub const MIN_WIDTH: u16 = GRID_COLUMNS * MIN_KEY_WIDTH + (GRID_COLUMNS - 1) * KEY_GAP + 2 * MARGIN;
/// Smallest terminal height the keypad fits in.
pub const MIN_HEIGHT: u16 = DISPLAY_ROWS + GRID_ROWS * KEY_HEIGHT + HINT_ROWS;

/// Key placement: `(key, column, row, column span)`.
const GRID: [(Key, u16, u16, u16); 19] = [
    (Key::Clear, 0, 0, 1),
    (Key::ToggleSign, 1, 0, 1),
    (Key::Percent, 2, 0, 1),
    (Key::Operation(Operation::Divide), 3, 0, 1),
    (Key::Digit(7), 0, 1, 1),
    (Key::Digit(8), 1, 1, 1),
    (Key::Digit(9), 2, 1, 1),
    (Key::Operation(Operation::Multiply), 3, 1, 1),
    (Key::Digit(4), 0, 2, 1),
    (Key::Digit(5), 1, 2, 1),
    (Key::Digit(6), 2, 2, 1),
    (Key::Operation(Operation::Subtract), 3, 2, 1),
    (Key::Digit(1), 0, 3, 1),
    (Key::Digit(2), 1, 3, 1),
    (Key::Digit(3), 2, 3, 1),
    (Key::Operation(Operation::Add), 3, 3, 1),
    (Key::Digit(0), 0, 4, 2),
    (Key::DecimalPoint, 2, 4, 1),
    (Key::Equals, 3, 4, 1),
];

/// Precomputed screen regions for the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadLayout {
    /// Everything the calculator occupies.
    pub panel: Rect,
    /// Where the value is shown.
    pub display: Rect,
    /// The key grid.
    pub keypad: Rect,
    /// The hint line under the keys.
    pub hint: Rect,
    keys: Vec<(Key, Rect)>,
}

impl KeypadLayout {
    /// Lay the calculator out inside `area`.
    ///
    /// Keys grow with the terminal up to [`MAX_KEY_WIDTH`]; rows get a
    /// spacer line when there is height to spare.
    pub fn compute(area: Rect) -> Result<Self> {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return Err(Error::TerminalTooSmall {
                width: area.width,
                height: area.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }

        let usable = area.width - 2 * MARGIN - (GRID_COLUMNS - 1) * KEY_GAP;
        let key_width = (usable / GRID_COLUMNS).clamp(MIN_KEY_WIDTH, MAX_KEY_WIDTH);
        let row_gap = u16::from(area.height >= MIN_HEIGHT + GRID_ROWS - 1);

        let grid_width = GRID_COLUMNS * key_width + (GRID_COLUMNS - 1) * KEY_GAP;
        let grid_height = GRID_ROWS * KEY_HEIGHT + (GRID_ROWS - 1) * row_gap;
        let panel = area.centered(grid_width, DISPLAY_ROWS + grid_height + HINT_ROWS);

        let (display, rest) = panel.split_top(DISPLAY_ROWS);
        let (keypad, hint) = rest.split_bottom(HINT_ROWS);

        let keys = GRID
            .iter()
            .map(|&(key, col, row, span)| {
                let rect = Rect::new(
                    keypad.x + col * (key_width + KEY_GAP),
                    keypad.y + row * (KEY_HEIGHT + row_gap),
                    span * key_width + (span - 1) * KEY_GAP,
                    KEY_HEIGHT,
                );
                (key, rect)
            })
            .collect();

        tracing::debug!(?area, ?panel, key_width, row_gap, "keypad layout computed");

        Ok(Self {
            panel,
            display,
            keypad,
            hint,
            keys,
        })
    }

    /// Every key with its rectangle, in reading order.
    pub fn keys(&self) -> &[(Key, Rect)] {
        &self.keys
    }

    /// The rectangle of a key.
    pub fn rect_of(&self, key: Key) -> Option<Rect> {
        self.keys.iter().find(|(k, _)| *k == key).map(|&(_, rect)| rect)
    }

    /// The key under a screen position, if any.
    pub fn key_at(&self, x: u16, y: u16) -> Option<Key> {
        self.keys
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|&(key, _)| key)
    }
}
