//! Keypad widget: the 5×4 grid of key faces.

use super::traits::Widget;
use crate::actor::InputEvent;
use crate::buffer::{Buffer, Cell, Modifiers, Rgb};
use crate::calc::{Calculator, Key, Operation};
use crate::config::Theme;
use crate::layout::{KeypadLayout, Rect};

/// Color family of a key face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVariant {
    /// Digits and the decimal point.
    Number,
    /// `AC`, `±` and `%`.
    Function,
    /// The four operators and `=`.
    Operator,
}

impl KeyVariant {
    /// The family a key belongs to.
    pub const fn of(key: Key) -> Self {
        match key {
            Key::Digit(_) | Key::DecimalPoint => Self::Number,
            Key::Clear | Key::ToggleSign | Key::Percent => Self::Function,
            Key::Operation(_) | Key::Equals => Self::Operator,
        }
    }
}

/// Draws the keys and maps clicks to them.
#[derive(Debug)]
pub struct KeypadWidget {
    keys: Vec<(Key, Rect)>,
    bounds: Rect,
    theme: Theme,
    clear_label: &'static str,
    highlighted: Option<Operation>,
    dirty: bool,
}

impl KeypadWidget {
    /// A keypad with no keys placed yet; see [`set_layout`](Self::set_layout).
    pub const fn new(theme: Theme) -> Self {
        Self {
            keys: Vec::new(),
            bounds: Rect::ZERO,
            theme,
            clear_label: "AC",
            highlighted: None,
            dirty: true,
        }
    }

    /// Place the keys, e.g. after a resize.
    pub fn set_layout(&mut self, layout: &KeypadLayout) {
        self.keys = layout.keys().to_vec();
        self.set_bounds(layout.keypad);
    }

    /// Pick up the clear key face and the lit operator.
    pub fn update(&mut self, calculator: &Calculator) {
        let clear_label = calculator.clear_label();
        let highlighted = calculator.highlighted_operation();
        if clear_label != self.clear_label || highlighted != self.highlighted {
            self.clear_label = clear_label;
            self.highlighted = highlighted;
            self.dirty = true;
        }
    }

    /// The operator drawn lit.
    pub const fn highlighted(&self) -> Option<Operation> {
        self.highlighted
    }

    /// The key under a screen position.
    pub fn key_at(&self, x: u16, y: u16) -> Option<Key> {
        self.keys
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|&(key, _)| key)
    }

    /// Face colors `(fg, bg)` for a key.
    pub fn colors(&self, key: Key) -> (Rgb, Rgb) {
        let theme = &self.theme;
        match key {
            Key::Operation(op) if self.highlighted == Some(op) => {
                (theme.highlight_fg, theme.highlight_bg)
            }
            _ => match KeyVariant::of(key) {
                KeyVariant::Number => (theme.number_fg, theme.number_bg),
                KeyVariant::Function => (theme.function_fg, theme.function_bg),
                KeyVariant::Operator => (theme.operator_fg, theme.operator_bg),
            },
        }
    }

    fn label(&self, key: Key) -> String {
        match key {
            Key::Clear => String::from(self.clear_label),
            _ => key.label(),
        }
    }

    fn render_key(&self, buffer: &mut Buffer, key: Key, rect: Rect) {
        let (fg, bg) = self.colors(key);
        buffer.fill_rect(rect, Cell::EMPTY.with_bg(bg));

        // Corners in the panel color give the face rounded edges.
        if rect.width >= 2 && rect.height >= 2 {
            let corner = |c: char| Cell::new(c).with_fg(bg).with_bg(self.theme.background);
            let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
            buffer.set(rect.x, rect.y, corner('▗'));
            buffer.set(right, rect.y, corner('▖'));
            buffer.set(rect.x, bottom, corner('▝'));
            buffer.set(right, bottom, corner('▘'));
        }

        let label = self.label(key);
        let width = u16::try_from(unicode_width::UnicodeWidthStr::width(label.as_str())).unwrap_or(rect.width);
        // The wide zero key keeps its label over its first column.
        let face = match key {
            Key::Digit(0) => Rect::new(rect.x, rect.y, rect.width.saturating_sub(1) / 2, rect.height),
            _ => rect,
        };
        let x = face.x + face.width.saturating_sub(width) / 2;
        let y = rect.y + rect.height / 2;
        buffer.put_str(x, y, &label, (fg, bg, Modifiers::BOLD), rect);
    }
}

impl Widget for KeypadWidget {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        buffer.fill_rect(self.bounds, Cell::EMPTY.with_bg(self.theme.background));
        for &(key, rect) in &self.keys {
            self.render_key(buffer, key, rect);
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> Option<Key> {
        match *event {
            InputEvent::MouseDown { x, y } => self.key_at(x, y),
            _ => None,
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
