use crate::magic::POW10_F64;
use crate::options::{Fallback, ParseOptions, Whitespace};
use crate::trim::{trim, trim_ascii};
use crate::{NumError, Result};

/// Longest unsigned text the integer accumulator takes: 19 digits always
/// fit a `u64`, so 20 bytes are fine as long as one of them is the dot.
const MAX_FAST_LEN: usize = 20;

/// Longest digit run the pure-float parser reads; 10^308 < f64::MAX < 10^309.
const MAX_FLOAT_LEN: usize = 309;

// ============================================================================
// Scanning
// ============================================================================

/// An exactly accumulated `[sign] digits [. digits]` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    magnitude: u64,
    fraction_digits: usize,
}

impl Decimal {
    /// One division of exact values, so at most one rounding when the
    /// magnitude fits in 53 bits.
    #[inline(always)]
    fn to_f64(self) -> f64 {
        let f = self.magnitude as f64 / POW10_F64[self.fraction_digits];
        if self.negative { -f } else { f }
    }
}

/// Splits off a leading `+`/`-` if a digit or dot follows it.
#[inline(always)]
fn split_sign(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes {
        [sign @ (b'-' | b'+'), next, ..] if next.is_ascii_digit() || *next == b'.' => {
            (*sign == b'-', &bytes[1..])
        }
        _ => (false, bytes),
    }
}

/// Left-to-right scan of unsigned text.
///
/// Returns `Ok(None)` when the text is too long for the `u64` accumulator,
/// which is the caller's cue to hand it to a fallback parser.
fn scan(digits: &[u8]) -> Result<Option<(u64, usize)>> {
    if digits.len() > MAX_FAST_LEN {
        return Ok(None);
    }

    let mut magnitude = 0u64;
    let mut fraction_digits = None;
    for (i, &c) in digits.iter().enumerate() {
        let d = c.wrapping_sub(b'0');
        if d <= 9 {
            magnitude = magnitude.wrapping_mul(10).wrapping_add(d as u64);
        } else if c == b'.' && fraction_digits.is_none() && digits.len() > 1 {
            fraction_digits = Some(digits.len() - 1 - i);
        } else {
            return Err(NumError::InvalidSyntax(c));
        }
    }

    match fraction_digits {
        // Twenty digits may have wrapped.
        None if digits.len() == MAX_FAST_LEN => Ok(None),
        _ => Ok(Some((magnitude, fraction_digits.unwrap_or(0)))),
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Parses `xsd:decimal` style text: `123.456`, `+1234.5`, `-.456`, `-456`,
/// `0.`, `-.0`.
///
/// Text too long for the integer fast path goes to [`atof_float`].
/// Surrounding whitespace, exponents and a bare sign or dot are rejected.
/// Up to 15 significant digits the result matches a correctly rounded
/// parser; past that it may be the adjacent double.
///
/// # Errors
/// [`NumError::EmptyInput`] for empty text, [`NumError::InvalidSyntax`] with
/// the first unexpected byte otherwise.
///
/// ```
/// use fastdec::{NumError, atof};
///
/// assert_eq!(atof(b"-.456").unwrap(), -0.456);
/// assert_eq!(atof(b"12.34.56"), Err(NumError::InvalidSyntax(b'.')));
/// ```
pub fn atof(bytes: &[u8]) -> Result<f64> {
    parse_with(bytes, &ParseOptions::FAST)
}

/// [`atof`], but anything the fast path cannot take (long, malformed, or
/// using exponents, `inf` or `NaN`) goes to a correctly rounding general
/// parser.
///
/// # Errors
/// [`NumError::EmptyInput`] for empty text, [`NumError::Fallback`] with the
/// general parser's error otherwise.
///
/// ```
/// use fastdec::parse_float;
///
/// assert_eq!(parse_float(b"1.25").unwrap(), 1.25);
/// assert_eq!(parse_float(b"-2.5e-3").unwrap(), -0.0025);
/// ```
pub fn parse_float(bytes: &[u8]) -> Result<f64> {
    parse_with(bytes, &ParseOptions::DEFAULT)
}

/// Parses with the whitespace handling and fallback chosen in `opts`.
pub fn parse_with(bytes: &[u8], opts: &ParseOptions) -> Result<f64> {
    let text = match opts.whitespace {
        Whitespace::Strict => bytes,
        Whitespace::Trim => trim(bytes),
        Whitespace::TrimAscii => trim_ascii(bytes),
    };
    if text.is_empty() {
        return Err(NumError::EmptyInput);
    }

    let (negative, digits) = split_sign(text);
    match (scan(digits), opts.fallback) {
        (Ok(Some((magnitude, fraction_digits))), _) => Ok(Decimal {
            negative,
            magnitude,
            fraction_digits,
        }
        .to_f64()),
        (Ok(None), Fallback::Float) => atof_float(text),
        (Err(e), Fallback::Float) => Err(e),
        (_, Fallback::General) => parse_general(text),
    }
}

/// Parses with floating point arithmetic only, digit by digit from the
/// right.
///
/// Takes the same syntax as [`atof`] at any length. Exact up to 15
/// significant decimal digits and 16 digit integers; beyond that results
/// may be one or two doubles off. At most 309 digits are read; a longer
/// integer part overflows to infinity.
///
/// # Errors
/// Same as [`atof`].
pub fn atof_float(bytes: &[u8]) -> Result<f64> {
    if bytes.is_empty() {
        return Err(NumError::EmptyInput);
    }

    let (negative, mut digits) = split_sign(bytes);
    while digits.len() > 2 && digits[0] == b'0' {
        digits = &digits[1..];
    }
    let truncated = digits.len() > MAX_FLOAT_LEN;
    if truncated {
        digits = &digits[..MAX_FLOAT_LEN];
    }

    let mut f = 0.0f64;
    let mut weight = 1.0f64;
    let mut fraction_weight = None;
    for &c in digits.iter().rev() {
        let d = c.wrapping_sub(b'0');
        if d <= 9 {
            f += weight * d as f64;
            weight *= 10.0;
        } else if c == b'.' && fraction_weight.is_none() && digits.len() > 1 {
            fraction_weight = Some(weight);
        } else {
            return Err(NumError::InvalidSyntax(c));
        }
    }

    let f = match fraction_weight {
        Some(w) => f / w,
        // Integer part longer than any double: push it to infinity.
        None if truncated => f * 10.0,
        None => f,
    };
    Ok(if negative { -f } else { f })
}

#[inline(never)]
fn parse_general(text: &[u8]) -> Result<f64> {
    lexical_core::parse::<f64>(text).map_err(NumError::Fallback)
}




// Property-based testing
#[cfg(test)]
mod atof_property_tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_atof_matches_std_15_digits(int in 0u64..10_000_000, frac in "[0-9]{0,8}", neg in any::<bool>()) {
            let sign = if neg { "-" } else { "" };
            let text = if frac.is_empty() {
                format!("{sign}{int}")
            } else {
                format!("{sign}{int}.{frac}")
            };
            let expected: f64 = text.parse().unwrap();
            prop_assert_eq!(atof(text.as_bytes()).unwrap(), expected);
        }

        #[test]
        fn prop_parse_float_matches_std(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
            let text = format!("{f:e}");
            prop_assert_eq!(parse_float(text.as_bytes()).unwrap(), f);
        }

        #[test]
        fn prop_atof_float_agrees_on_short(text in "[0-9]{1,7}\\.[0-9]{1,7}") {
            prop_assert_eq!(atof_float(text.as_bytes()).unwrap(), atof(text.as_bytes()).unwrap());
        }

        #[test]
        fn prop_garbage_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..40)) {
            let _ = atof(&bytes);
            let _ = atof_float(&bytes);
            let _ = parse_float(&bytes);
        }
    }
}
