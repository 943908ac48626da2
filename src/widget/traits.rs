//! The `Widget` trait shared by the display, keypad and hint line.

use crate::actor::InputEvent;
use crate::buffer::Buffer;
use crate::calc::Key;
use crate::layout::Rect;

/// A region of the calculator that paints itself into a buffer.
///
/// Widgets hold only what they need to paint; the calculator state stays
/// in the app and is pushed into widgets after each key press.
pub trait Widget {
    /// Where the widget paints.
    fn bounds(&self) -> Rect;

    /// Move the widget, e.g. after a resize.
    fn set_bounds(&mut self, bounds: Rect);

    /// Paint into `buffer`, staying inside [`bounds`](Widget::bounds).
    fn render(&self, buffer: &mut Buffer);

    /// Translate an input event into a calculator key, if this widget
    /// owns it.
    fn handle_input(&mut self, event: &InputEvent) -> Option<Key>;

    /// Whether the widget changed since it was last painted.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after painting.
    fn clear_redraw(&mut self);
}
