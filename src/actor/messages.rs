//! Message types for actor communication.

use crate::buffer::Buffer;
use crate::layout::Rect;

/// Key codes the calculator reacts to.
///
/// A subset of crossterm's `KeyCode`; everything else is dropped by the
/// input thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Only Control held.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during the press.
        modifiers: KeyModifiers,
    },

    /// Left mouse button pressed at a cell.
    MouseDown {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Reading the terminal failed.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// A key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

/// Commands sent to the render thread.
#[derive(Debug)]
pub enum RenderCommand {
    /// Repaint every cell of this frame.
    FullRedraw(Box<Buffer>),

    /// Show this frame, diffing only the given regions.
    ///
    /// An empty region list diffs the whole screen.
    Update {
        /// The new frame.
        frame: Box<Buffer>,
        /// Regions that may have changed.
        dirty: Vec<Rect>,
    },

    /// Resize the buffers; the next frame is painted in full.
    Resize {
        /// New width.
        width: u16,
        /// New height.
        height: u16,
    },

    /// Stop the render thread.
    Shutdown,
}
