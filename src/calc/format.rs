//! Number parsing and display formatting.
//!
//! Values travel through the calculator as decimal strings. These helpers
//! convert between those strings and `f64`, and produce the text the
//! display shows: en-US digit grouping, at most seven fractional digits,
//! and exponential notation once a value no longer fits.

/// Maximum fractional digits shown for a formatted value.
pub const MAX_FRACTION_DIGITS: usize = 7;

/// Formatted values this long (or longer) switch to exponential notation.
pub const EXPONENTIAL_THRESHOLD: usize = 10;

/// Fractional digits used in exponential notation.
pub const EXPONENTIAL_DIGITS: usize = 6;

/// Parse a decimal string into a number.
///
/// Accepts partial literals such as `"5."` and `"0."`. Anything
/// unparseable reads as zero.
pub fn parse_number(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

/// Render a number as the shortest decimal string that parses back to it.
///
/// Negative zero becomes `"0"`; non-finite values use `Infinity`/`NaN`,
/// which [`parse_number`] reads back.
pub fn number_to_string(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    value.to_string()
}

/// Round to at most `max_fraction` digits and drop trailing zeros.
///
/// Rounding works on the shortest decimal form of the value, half away
/// from zero, so `1.00000005` becomes `1.0000001` even though its binary
/// value sits just below the tie. No grouping separators are inserted, so
/// the result is still a parseable literal. A negative value that rounds
/// to zero keeps its sign (`-0`).
pub fn format_plain(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }
    // `Display` for f64 never switches to exponent notation.
    let mut digits = round_half_up(&value.abs().to_string(), max_fraction);
    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(trimmed);
    }
    if value < 0.0 {
        digits.insert(0, '-');
    }
    digits
}

/// Round an unsigned decimal literal to `max_fraction` fractional digits,
/// ties going up.
fn round_half_up(literal: &str, max_fraction: usize) -> String {
    let Some((integer, fraction)) = literal.split_once('.') else {
        return literal.to_owned();
    };
    if fraction.len() <= max_fraction {
        return literal.to_owned();
    }

    let mut kept: Vec<u8> = integer.bytes().collect();
    if max_fraction > 0 {
        kept.push(b'.');
        kept.extend_from_slice(&fraction.as_bytes()[..max_fraction]);
    }
    if fraction.as_bytes()[max_fraction] >= b'5' {
        let mut carry = true;
        for byte in kept.iter_mut().rev().filter(|b| **b != b'.') {
            if *byte == b'9' {
                *byte = b'0';
            } else {
                *byte += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }
    kept.into_iter().map(char::from).collect()
}

/// Insert `,` between every group of three integer digits.
///
/// A leading sign is kept in front of the grouped digits.
pub fn group_integer(integer: &str) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(integer.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format the value being typed.
///
/// The integer part is grouped; the fractional part is shown verbatim,
/// including a trailing point (`"1234."` shows as `"1,234."`).
pub fn format_input(value: &str) -> String {
    match value.split_once('.') {
        Some((integer, fraction)) => format!("{}.{fraction}", group_integer(integer)),
        None => group_integer(value),
    }
}

/// Render a number in exponential notation, e.g. `1.234568e+7`.
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    let raw = format!("{:.*e}", fraction_digits, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}

/// The fractional tail of a literal, if the literal ends in `.digits`.
fn fractional_tail(value: &str) -> Option<&str> {
    let (_, tail) = value.split_once('.')?;
    tail.bytes().all(|b| b.is_ascii_digit()).then_some(tail)
}

/// Format a committed value for the display.
///
/// Zeros typed at the end of the literal survive rounding: `"1.50"` shows
/// as `1.50` and `"2.000"` as `2.000`. Results of ten or more characters
/// are shown in exponential form with six fractional digits.
pub fn format_for_display(value: &str) -> String {
    let number = parse_number(value);
    if number.is_nan() {
        return String::from("NaN");
    }
    if number.is_infinite() {
        return String::from(if number > 0.0 { "∞" } else { "-∞" });
    }

    let plain = format_plain(number, MAX_FRACTION_DIGITS);
    let mut formatted = format_input(&plain);

    if let Some(tail) = fractional_tail(value) {
        if tail.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            let zeros = tail.len() - tail.trim_end_matches('0').len();
            formatted.extend(std::iter::repeat('0').take(zeros));
        } else {
            formatted.push('.');
            formatted.push_str(tail);
        }
    }

    if formatted.chars().count() >= EXPONENTIAL_THRESHOLD {
        to_exponential(number, EXPONENTIAL_DIGITS)
    } else {
        formatted
    }
}
