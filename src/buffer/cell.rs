//! Cell: one character position on the keypad screen.
//!
//! A cell stores its grapheme inline. Everything the calculator draws
//! (digits, `÷ × − ±`, `∞`, segment glyphs) encodes in at most four UTF-8
//! bytes, so there is no out-of-line storage.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g. `0xFB923C`).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors
        const REVERSED = 0b0001_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level flags.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Right half of a double-width character.
        const WIDE_CONTINUATION = 0b0000_0001;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single screen cell: grapheme, colors and style.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    grapheme: [u8; 4],
    grapheme_len: u8,
    display_width: u8,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
    flags: CellFlags,
}

const _: () = assert!(std::mem::size_of::<Cell>() <= 16);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A space on a black background.
    pub const EMPTY: Self = Self {
        grapheme: [b' ', 0, 0, 0],
        grapheme_len: 1,
        display_width: 1,
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        modifiers: Modifiers::empty(),
        flags: CellFlags::empty(),
    };

    /// Create a cell holding a single character.
    #[inline]
    pub fn new(c: char) -> Self {
        let mut grapheme = [0u8; 4];
        let len = c.encode_utf8(&mut grapheme).len();
        let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        Self {
            grapheme,
            grapheme_len: u8::try_from(len).unwrap_or(4),
            display_width: u8::try_from(width).unwrap_or(1),
            ..Self::EMPTY
        }
    }

    /// Create a cell from a grapheme cluster.
    ///
    /// Returns `None` if the cluster needs more than four bytes.
    pub fn from_grapheme(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 {
            return None;
        }
        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);
        let width = unicode_width::UnicodeWidthStr::width(s);
        Some(Self {
            grapheme,
            grapheme_len: u8::try_from(bytes.len()).ok()?,
            display_width: u8::try_from(width).unwrap_or(1),
            ..Self::EMPTY
        })
    }

    /// Placeholder for the right half of a wide character.
    #[inline]
    pub const fn wide_continuation() -> Self {
        Self {
            grapheme: [0; 4],
            grapheme_len: 0,
            display_width: 0,
            flags: CellFlags::WIDE_CONTINUATION,
            ..Self::EMPTY
        }
    }

    /// The grapheme as a string slice.
    #[inline]
    pub fn grapheme(&self) -> &str {
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).unwrap_or(" ")
    }

    /// Whether this is the right half of a wide character.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Display width in columns (0, 1 or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Style modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("grapheme", &self.grapheme())
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        let orange: Rgb = 0xFB923C.into();
        assert_eq!(orange, Rgb::new(0xFB, 0x92, 0x3C));
    }

    #[test]
    fn test_cell_new_keypad_glyphs() {
        for c in ['7', '÷', '×', '−', '±', '∞'] {
            let cell = Cell::new(c);
            assert_eq!(cell.grapheme(), c.to_string());
            assert_eq!(cell.display_width(), 1);
        }
    }

    #[test]
    fn test_cell_wide_char() {
        let cell = Cell::new('日');
        assert_eq!(cell.display_width(), 2);
    }

    #[test]
    fn test_from_grapheme_too_long() {
        assert!(Cell::from_grapheme("👨‍👩‍👧").is_none());
        assert!(Cell::from_grapheme("").is_none());
        assert_eq!(Cell::from_grapheme("é").map(|c| c.display_width()), Some(1));
    }

    #[test]
    fn test_cell_builder_and_equality() {
        let a = Cell::new('5')
            .with_fg(Rgb::WHITE)
            .with_bg(Rgb::from_u32(0x525252))
            .with_modifiers(Modifiers::BOLD);
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, a.with_bg(Rgb::BLACK));
        assert!(a.modifiers().contains(Modifiers::BOLD));
    }

    #[test]
    fn test_wide_continuation() {
        let cont = Cell::wide_continuation();
        assert!(cont.is_wide_continuation());
        assert_eq!(cont.display_width(), 0);
        assert_eq!(cont.grapheme(), "");
    }
}
