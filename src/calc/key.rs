//! Keypad events.

use super::operation::Operation;

/// A discrete key press forwarded from the keypad to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A digit key, `0` through `9`.
    Digit(u8),
    /// The `.` key.
    DecimalPoint,
    /// The `AC`/`C` key.
    Clear,
    /// The `±` key.
    ToggleSign,
    /// The `%` key.
    Percent,
    /// One of the four operator keys.
    Operation(Operation),
    /// The `=` key.
    Equals,
}

impl Key {
    /// Map a typed character to a key.
    ///
    /// Besides the obvious glyphs, `c` clears, `n`/`_` flips the sign and
    /// `,` doubles as a decimal point.
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            #[allow(clippy::cast_possible_truncation)]
            return Some(Self::Digit(d as u8));
        }
        if let Some(op) = Operation::from_char(c) {
            return Some(Self::Operation(op));
        }
        Some(match c {
            '.' | ',' => Self::DecimalPoint,
            '=' | '\n' | '\r' => Self::Equals,
            '%' => Self::Percent,
            'c' | 'C' => Self::Clear,
            'n' | 'N' | '_' | '±' => Self::ToggleSign,
            _ => return None,
        })
    }

    /// Text printed on the key face.
    ///
    /// The clear key's face depends on calculator state; see
    /// [`Calculator::clear_label`](super::Calculator::clear_label).
    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => String::from("."),
            Self::Clear => String::from("AC"),
            Self::ToggleSign => String::from("±"),
            Self::Percent => String::from("%"),
            Self::Operation(op) => op.symbol().to_string(),
            Self::Equals => String::from("="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char_digits() {
        for d in 0..=9u8 {
            let c = char::from(b'0' + d);
            assert_eq!(Key::from_char(c), Some(Key::Digit(d)));
        }
    }

    #[test]
    fn test_from_char_symbols() {
        assert_eq!(Key::from_char('.'), Some(Key::DecimalPoint));
        assert_eq!(Key::from_char('='), Some(Key::Equals));
        assert_eq!(Key::from_char('\r'), Some(Key::Equals));
        assert_eq!(Key::from_char('%'), Some(Key::Percent));
        assert_eq!(Key::from_char('c'), Some(Key::Clear));
        assert_eq!(Key::from_char('n'), Some(Key::ToggleSign));
        assert_eq!(Key::from_char('*'), Some(Key::Operation(Operation::Multiply)));
        assert_eq!(Key::from_char('q'), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Key::Digit(7).label(), "7");
        assert_eq!(Key::Operation(Operation::Divide).label(), "÷");
        assert_eq!(Key::ToggleSign.label(), "±");
    }
}
