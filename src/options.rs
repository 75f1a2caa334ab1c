#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::round::Rounding;

// ============================================================================
// Separator
// ============================================================================

/// Byte appended after a formatted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Separator {
    /// Append nothing after the number.
    #[default]
    None,
    /// Append this byte after the number.
    Byte(u8),
}

impl Separator {
    pub const TAB: Self = Self::Byte(b'\t');
    pub const COMMA: Self = Self::Byte(b',');
    pub const SPACE: Self = Self::Byte(b' ');
    pub const NEWLINE: Self = Self::Byte(b'\n');
    pub const SEMICOLON: Self = Self::Byte(b';');

    /// Appends the separator, if any, to `buf`.
    #[inline(always)]
    pub fn push_to(self, buf: &mut alloc::vec::Vec<u8>) {
        if let Self::Byte(b) = self {
            buf.push(b);
        }
    }
}

impl From<u8> for Separator {
    fn from(b: u8) -> Self {
        Self::Byte(b)
    }
}

impl From<Option<u8>> for Separator {
    fn from(b: Option<u8>) -> Self {
        b.map_or(Self::None, Self::Byte)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Per-call settings for float formatting.
///
/// Everything a caller may want to tweak lives here instead of in global
/// state, so one process can write differently shaped output from several
/// threads at once.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Byte between the integer and fractional digits.
    pub decimal_separator: u8,
    /// Byte appended after the number.
    pub separator: Separator,
    /// Strip trailing `0`s from the fraction, keeping one digit after the
    /// decimal separator.
    pub trim_trailing_zeros: bool,
    /// Byte written before non-negative numbers, e.g. `b' '` to line up
    /// with negative ones.
    pub positive_sign: Option<u8>,
    pub rounding: Rounding,
    /// Literal `0`s the integral path appends for dropped digits before it
    /// switches to `e+N`.
    pub max_trailing_zeros: u32,
}

impl FormatOptions {
    pub const DEFAULT: Self = Self {
        decimal_separator: b'.',
        separator: Separator::None,
        trim_trailing_zeros: false,
        positive_sign: None,
        rounding: Rounding::COMPAT,
        max_trailing_zeros: 5,
    };

    pub const fn new() -> Self {
        Self::DEFAULT
    }

    pub const fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub const fn with_decimal_separator(mut self, decimal_separator: u8) -> Self {
        self.decimal_separator = decimal_separator;
        self
    }

    pub const fn with_trim_trailing_zeros(mut self, trim: bool) -> Self {
        self.trim_trailing_zeros = trim;
        self
    }

    pub const fn with_positive_sign(mut self, sign: Option<u8>) -> Self {
        self.positive_sign = sign;
        self
    }

    pub const fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub const fn with_max_trailing_zeros(mut self, zeros: u32) -> Self {
        self.max_trailing_zeros = zeros;
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// What to strip around the text before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Whitespace {
    /// Surrounding whitespace is a syntax error.
    #[default]
    Strict,
    /// Strip every byte `<= b' '`, control characters included.
    Trim,
    /// Strip only ASCII whitespace as `u8::is_ascii_whitespace` defines it.
    TrimAscii,
}

/// Where text goes when it does not fit the fast parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fallback {
    /// Long numbers go to the pure-float parser; malformed text is an error.
    Float,
    /// Long or malformed text goes to the general parser, which also
    /// accepts exponents, `inf` and `NaN`.
    #[default]
    General,
}

/// Per-call settings for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    pub whitespace: Whitespace,
    pub fallback: Fallback,
}

impl ParseOptions {
    pub const DEFAULT: Self = Self {
        whitespace: Whitespace::Strict,
        fallback: Fallback::General,
    };

    /// Fast path plus pure-float parser only; never calls the general parser.
    pub const FAST: Self = Self {
        whitespace: Whitespace::Strict,
        fallback: Fallback::Float,
    };

    pub const fn new() -> Self {
        Self::DEFAULT
    }

    pub const fn with_whitespace(mut self, whitespace: Whitespace) -> Self {
        self.whitespace = whitespace;
        self
    }

    pub const fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_push() {
        let mut buf = alloc::vec::Vec::new();
        Separator::None.push_to(&mut buf);
        assert!(buf.is_empty());
        Separator::TAB.push_to(&mut buf);
        Separator::from(b'|').push_to(&mut buf);
        assert_eq!(buf, b"\t|");
    }

    #[test]
    fn test_separator_from_option() {
        assert_eq!(Separator::from(None), Separator::None);
        assert_eq!(Separator::from(Some(b',')), Separator::COMMA);
    }

    #[test]
    fn test_format_options_builder() {
        let opts = FormatOptions::new()
            .with_separator(Separator::SEMICOLON)
            .with_decimal_separator(b',')
            .with_trim_trailing_zeros(true)
            .with_positive_sign(Some(b'+'))
            .with_rounding(Rounding::HALF)
            .with_max_trailing_zeros(0);
        assert_eq!(opts.separator, Separator::Byte(b';'));
        assert_eq!(opts.decimal_separator, b',');
        assert!(opts.trim_trailing_zeros);
        assert_eq!(opts.positive_sign, Some(b'+'));
        assert_eq!(opts.rounding, Rounding::HALF);
        assert_eq!(opts.max_trailing_zeros, 0);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(FormatOptions::default(), FormatOptions::DEFAULT);
        assert_eq!(FormatOptions::default().decimal_separator, b'.');
        assert_eq!(ParseOptions::default().whitespace, Whitespace::Strict);
        assert_eq!(ParseOptions::default().fallback, Fallback::General);
        assert_eq!(ParseOptions::FAST.fallback, Fallback::Float);
    }
}
