//! Calculator engine: keypad state machine and number formatting.
//!
//! This module has no terminal or I/O dependencies. The front end feeds
//! it [`Key`]s and paints whatever [`Calculator::display`] returns.
//!
//! ```text
//! ┌──────────┐   Key    ┌────────────┐  display()  ┌──────────┐
//! │  Keypad  │ ───────▶ │ Calculator │ ──────────▶ │ Display  │
//! └──────────┘          └────────────┘             └──────────┘
//! ```

mod key;
mod operation;
mod state;
pub mod format;

pub use key::Key;
pub use operation::Operation;
pub use state::{Calculator, ChainMode, DisplayScale, MAX_INPUT_DIGITS};
