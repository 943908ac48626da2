//! Layout module: screen regions for the calculator.
//!
//! Regions are computed once at startup and again on terminal resize.
//! Rendering and hit testing only read the precomputed rectangles.

mod keypad;
mod rect;

pub use keypad::{KeypadLayout, MIN_HEIGHT, MIN_WIDTH};
pub use rect::Rect;
