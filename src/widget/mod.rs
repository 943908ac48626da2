//! Widgets: the display, the keypad and the hint line.
//!
//! Each widget paints one region of the panel and tracks whether it
//! changed, so the app can hand only dirty regions to the diff renderer.

mod display;
mod keypad;
mod status_bar;
mod traits;

pub use display::DisplayWidget;
pub use keypad::{KeyVariant, KeypadWidget};
pub use status_bar::{StatusBar, StatusBarStyle};
pub use traits::Widget;
