//! Calculator: the keypad state machine.
//!
//! The calculator holds three pieces of state:
//!
//! - `total`: the accumulated result as a decimal string (`"0"` means
//!   nothing has been accumulated yet)
//! - `input`: the literal being typed, absent between entries
//! - `operation`: the operator waiting for its second operand
//!
//! Every handler is total. Keys that make no sense in the current state
//! (a second decimal point, a tenth digit, an operator before any number)
//! are ignored and reported as `false`.
//!
//! ```text
//!   digit/./±/%          operator              =
//! ┌────────────┐     ┌──────────────┐     ┌──────────┐
//! │ input grows│ ──▶ │ total ⊕ input│ ──▶ │ commit   │
//! └────────────┘     │ op pending   │     │ op clear │
//!                    └──────────────┘     └──────────┘
//! ```

use super::format::{
    format_for_display, format_input, format_plain, number_to_string, parse_number,
    MAX_FRACTION_DIGITS,
};
use super::key::Key;
use super::operation::Operation;
use std::fmt;
use std::str::FromStr;

/// Maximum characters of `input`, not counting the decimal point.
pub const MAX_INPUT_DIGITS: usize = 9;

/// How an operator key combines a running total with the new input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainMode {
    /// Apply the operator just pressed, keeping it pending for the next
    /// combination as well.
    ///
    /// `2 + 3 × 4 =` gives `24`.
    #[default]
    Immediate,
    /// Apply the operator that was pending before this key press, or the
    /// one just pressed when nothing was pending.
    ///
    /// `2 + 3 × 4 =` gives `20`.
    Deferred,
}

impl FromStr for ChainMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deferred" => Ok(Self::Deferred),
            "immediate" => Ok(Self::Immediate),
            other => Err(format!(
                "unknown chain mode '{other}' (expected 'deferred' or 'immediate')"
            )),
        }
    }
}

impl fmt::Display for ChainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Deferred => "deferred",
            Self::Immediate => "immediate",
        })
    }
}

/// Font tier hint for the display, chosen by displayed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayScale {
    /// Up to five characters.
    Large,
    /// Six or seven characters.
    Medium,
    /// More than seven characters.
    Small,
}

impl DisplayScale {
    /// Pick the tier for a display length.
    pub const fn for_len(len: usize) -> Self {
        if len > 7 {
            Self::Small
        } else if len > 5 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// The calculator state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    total: String,
    input: Option<String>,
    operation: Option<Operation>,
    chain: ChainMode,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// A calculator in the idle all-clear state.
    pub fn new() -> Self {
        Self::with_chain(ChainMode::default())
    }

    /// A calculator using the given chaining rule.
    pub fn with_chain(chain: ChainMode) -> Self {
        Self {
            total: String::from("0"),
            input: None,
            operation: None,
            chain,
        }
    }

    /// The accumulated total as a decimal string.
    pub fn total(&self) -> &str {
        &self.total
    }

    /// The literal being typed, if any.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// The operator awaiting its second operand.
    pub const fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// The chaining rule in effect.
    pub const fn chain(&self) -> ChainMode {
        self.chain
    }

    /// Change the chaining rule. State is left untouched.
    pub fn set_chain(&mut self, chain: ChainMode) {
        self.chain = chain;
    }

    /// Whether the calculator is in the idle all-clear state: no entry,
    /// nothing accumulated and no operator pending.
    pub fn is_idle(&self) -> bool {
        self.input.is_none() && self.total == "0" && self.operation.is_none()
    }

    /// Whether nothing meaningful has been typed since the last commit.
    pub fn is_input_empty(&self) -> bool {
        matches!(self.input.as_deref(), None | Some("0"))
    }

    /// Apply one key press. Returns `true` if the state changed.
    pub fn press(&mut self, key: Key) -> bool {
        let changed = match key {
            Key::Digit(d) => self.digit(d),
            Key::DecimalPoint => self.decimal_point(),
            Key::Clear => self.clear(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.percent(),
            Key::Operation(op) => self.apply_operation(op),
            Key::Equals => self.equals(),
        };

        if changed {
            tracing::debug!(
                ?key,
                total = %self.total,
                input = ?self.input,
                operation = ?self.operation,
                "key applied"
            );
        } else {
            tracing::trace!(?key, "key ignored");
        }
        changed
    }

    /// Type a digit. Values above 9 are ignored.
    pub fn digit(&mut self, digit: u8) -> bool {
        match char::from_digit(u32::from(digit), 10) {
            Some(c) => self.push_char(c),
            None => false,
        }
    }

    /// Type a decimal point.
    pub fn decimal_point(&mut self) -> bool {
        self.push_char('.')
    }

    fn push_char(&mut self, c: char) -> bool {
        if self.is_input_empty() {
            // A lone zero may be entered as an operand, but never repeated.
            if c == '0' && self.input.is_some() {
                return false;
            }
            self.input = Some(if c == '.' {
                String::from("0.")
            } else {
                c.to_string()
            });
            return true;
        }

        let Some(input) = self.input.as_mut() else {
            return false;
        };
        if input.chars().filter(|&ch| ch != '.').count() >= MAX_INPUT_DIGITS {
            return false;
        }
        if c == '.' && input.contains('.') {
            return false;
        }
        input.push(c);
        true
    }

    /// The `AC`/`C` key.
    ///
    /// With an entry in progress and an operator pending, only the entry
    /// is cleared (to `0`). Otherwise everything is reset.
    pub fn clear(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }

        let has_entry = matches!(self.input.as_deref(), Some(input) if input != "0");
        if has_entry && self.operation.is_some() {
            self.input = Some(String::from("0"));
        } else {
            self.reset();
        }
        true
    }

    /// Reset to the idle state, keeping the chaining rule.
    pub fn reset(&mut self) {
        self.total = String::from("0");
        self.input = None;
        self.operation = None;
    }

    /// The `±` key: negate the entry.
    pub fn toggle_sign(&mut self) -> bool {
        match self.input.as_mut() {
            Some(input) => {
                *input = number_to_string(-parse_number(input));
                true
            }
            None => false,
        }
    }

    /// The `%` key: divide the entry by 100.
    pub fn percent(&mut self) -> bool {
        match self.input.as_mut() {
            Some(input) if input != "0" => {
                *input = format_plain(parse_number(input) / 100.0, MAX_FRACTION_DIGITS);
                true
            }
            _ => false,
        }
    }

    /// An operator key.
    ///
    /// The first operand is captured into the total as typed. Later
    /// operands are combined into the total according to the
    /// [`ChainMode`].
    pub fn apply_operation(&mut self, op: Operation) -> bool {
        if self.is_idle() {
            return false;
        }

        let previous = self.operation.replace(op);
        let Some(input) = self.input.take() else {
            // Switching operators between operands.
            return previous != Some(op);
        };

        if self.total == "0" {
            self.total = input;
        } else {
            let a = parse_number(&self.total);
            let b = parse_number(&input);
            let result = match self.chain {
                ChainMode::Deferred => previous.unwrap_or(op).apply(a, b),
                ChainMode::Immediate => op.apply(a, b),
            };
            self.total = number_to_string(result);
        }
        true
    }

    /// The `=` key.
    pub fn equals(&mut self) -> bool {
        let (Some(op), Some(input)) = (self.operation, self.input.as_deref()) else {
            return false;
        };

        let result = op.apply(parse_number(&self.total), parse_number(input));
        self.total = number_to_string(result);
        self.operation = None;
        self.input = None;
        true
    }

    /// The text the display shows.
    pub fn display(&self) -> String {
        match self.input.as_deref() {
            Some(input) => format_input(input),
            None => format_for_display(&self.total),
        }
    }

    /// Length hint for display sizing: the raw entry while typing,
    /// otherwise the formatted total.
    pub fn display_len(&self) -> usize {
        match self.input.as_deref() {
            Some(input) => input.chars().count(),
            None => format_for_display(&self.total).chars().count(),
        }
    }

    /// Font tier for the current display.
    pub fn display_scale(&self) -> DisplayScale {
        DisplayScale::for_len(self.display_len())
    }

    /// The operator key to highlight: the pending one, until an entry
    /// starts.
    pub fn highlighted_operation(&self) -> Option<Operation> {
        if self.is_input_empty() {
            self.operation
        } else {
            None
        }
    }

    /// Face of the clear key: `AC` when idle, `C` otherwise.
    pub fn clear_label(&self) -> &'static str {
        if self.is_idle() {
            "AC"
        } else {
            "C"
        }
    }
}
