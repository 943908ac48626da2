//! Buffer module: the double-buffered screen model.
//!
//! - [`Cell`]: one character position with colors and style
//! - [`Buffer`]: a grid of cells covering the terminal
//! - [`diff`]: turns the difference between two buffers into ANSI output

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, CellFlags, Modifiers, Rgb};
pub use buffer::Buffer;
