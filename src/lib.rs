//! # Calci
//!
//! A phone-style keypad calculator for the terminal.
//!
//! The [`calc`] module is the whole calculator: a small state machine fed
//! one [`Key`] at a time, plus the number formatting that turns its state
//! into the string on the display. It has no I/O and never fails.
//!
//! Everything else is the terminal front end, built around a
//! double-buffered diff renderer:
//!
//! - **Actor model**: input polling and terminal writes run on their own
//!   threads, the calculator stays on the app thread
//! - **Dirty regions**: a key press repaints the display and at most the
//!   keys whose face changed
//!
//! ## Example
//!
//! ```rust
//! use calci::{Calculator, Key, Operation};
//!
//! let mut calculator = Calculator::new();
//! calculator.press(Key::Digit(1));
//! calculator.press(Key::Digit(2));
//! calculator.press(Key::Operation(Operation::Add));
//! calculator.press(Key::Digit(3));
//! calculator.press(Key::Digit(0));
//! calculator.press(Key::Equals);
//! assert_eq!(calculator.display(), "42");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod calc;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod widget;

// Re-exports for convenience
pub use app::{evaluate, App};
pub use buffer::{Buffer, Cell, Modifiers, Rgb};
pub use calc::{Calculator, ChainMode, DisplayScale, Key, Operation};
pub use config::{AppConfig, Cli};
pub use error::{Error, Result};
pub use layout::{KeypadLayout, Rect};
