use alloc::vec::Vec;

use crate::itoa::{append_zeros, write_u64, write_u64_packed};
use crate::magic::{self, F64_NEG_POW10, F64_POW10, MAX_F64_POW10, POW10_F64};
use crate::options::{FormatOptions, Separator};
use crate::round::{NOISE_FREE_BOUND, drop_noise_digits, snap_fraction};
use crate::trim::trim_trailing_zeros;
use crate::{NumError, Result};

/// Most decimals a caller can ask for; a double carries no more.
pub const MAX_DECIMALS: u32 = 17;

/// Values below this with few enough decimals take the fast path.
const FAST_LIMIT: f64 = 1e8;
const FAST_MAX_DECIMALS: u32 = 8;

/// Full-precision digits for values below one.
const SMALL_FULL_DIGITS: u32 = 17;
const SMALL_FULL_LIMIT: u64 = 100_000_000_000_000_000;

// ============================================================================
// Precision
// ============================================================================

/// Requested number of decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Exactly this many decimals, zero padded (at most [`MAX_DECIMALS`]).
    Fixed(u32),
    /// As many decimals as the double really carries, without the
    /// conversion noise and without trailing zeros.
    Full,
}

impl Precision {
    /// Negative counts mean [`Precision::Full`]; large ones are clamped to
    /// [`MAX_DECIMALS`].
    pub const fn from_decimals(decimals: i32) -> Self {
        if decimals < 0 {
            Self::Full
        } else if decimals as u32 > MAX_DECIMALS {
            Self::Fixed(MAX_DECIMALS)
        } else {
            Self::Fixed(decimals as u32)
        }
    }
}

impl From<i32> for Precision {
    fn from(decimals: i32) -> Self {
        Self::from_decimals(decimals)
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Appends `f` with `decimals` decimal places, then `sep`.
///
/// A negative `decimals` selects full precision. Rounding is half away from
/// zero, see [`Rounding`](crate::Rounding). `-0.0` prints without a sign.
///
/// # Errors
/// Returns [`NumError::NotFinite`] for NaN and infinities; nothing is
/// appended in that case.
///
/// ```
/// use fastdec::{Separator, ftoa};
///
/// let mut buf = Vec::new();
/// ftoa(&mut buf, -3.5, 0, Separator::COMMA).unwrap();
/// ftoa(&mut buf, 12.3456, 2, Separator::COMMA).unwrap();
/// ftoa(&mut buf, 2.5e-5, -1, Separator::None).unwrap();
/// assert_eq!(buf, b"-4,12.35,0.000025");
/// ```
pub fn ftoa(buf: &mut Vec<u8>, f: f64, decimals: i32, sep: Separator) -> Result<()> {
    ftoa_with(buf, f, decimals, &FormatOptions::DEFAULT.with_separator(sep))
}

/// [`ftoa`] with every knob in `opts`.
pub fn ftoa_with(buf: &mut Vec<u8>, f: f64, decimals: i32, opts: &FormatOptions) -> Result<()> {
    if !f.is_finite() {
        return Err(NumError::NotFinite);
    }

    let start = buf.len();
    let f = write_sign(buf, f, opts);

    match Precision::from_decimals(decimals) {
        Precision::Fixed(dec) if f < FAST_LIMIT && dec <= FAST_MAX_DECIMALS => {
            write_fast(buf, f, dec, opts)
        }
        Precision::Fixed(dec) => write_general(buf, f, dec, opts),
        Precision::Full if f < 1.0 => write_small_full(buf, f, opts),
        Precision::Full => write_full(buf, f, opts),
    }

    if opts.trim_trailing_zeros {
        let kept = trim_trailing_zeros(&buf[start..], opts.decimal_separator).len();
        buf.truncate(start + kept);
    }
    opts.separator.push_to(buf);
    Ok(())
}

/// Fast formatter for a decimal count fixed at compile time.
///
/// Values at or above 10^8 go through [`ftoa`].
///
/// ```
/// use fastdec::{Separator, ftoa_fixed};
///
/// let mut buf = Vec::new();
/// ftoa_fixed::<2>(&mut buf, 19.999, Separator::TAB).unwrap();
/// assert_eq!(buf, b"20.00\t");
/// ```
#[inline]
pub fn ftoa_fixed<const D: u32>(buf: &mut Vec<u8>, f: f64, sep: Separator) -> Result<()> {
    const { assert!(D <= FAST_MAX_DECIMALS, "ftoa_fixed supports at most 8 decimals") };

    if !f.is_finite() {
        return Err(NumError::NotFinite);
    }
    let magnitude = if f < 0.0 { -f } else { f };
    if magnitude >= FAST_LIMIT {
        return ftoa(buf, f, D as i32, sep);
    }
    if f < 0.0 {
        buf.push(b'-');
    }
    write_fast(buf, magnitude, D, &FormatOptions::DEFAULT);
    sep.push_to(buf);
    Ok(())
}

// ============================================================================
// Paths
// ============================================================================

/// Writes the sign and returns the magnitude.
#[inline(always)]
fn write_sign(buf: &mut Vec<u8>, f: f64, opts: &FormatOptions) -> f64 {
    if f < 0.0 {
        buf.push(b'-');
        -f
    } else {
        if let Some(sign) = opts.positive_sign {
            buf.push(sign);
        }
        f
    }
}

/// `f < 10^8`, `dec <= 8`: one rounding, one multiply-shift split.
#[inline(always)]
fn write_fast(buf: &mut Vec<u8>, f: f64, dec: u32, opts: &FormatOptions) {
    debug_assert!(f < FAST_LIMIT && dec <= FAST_MAX_DECIMALS);

    let n = opts.rounding.round(f * POW10_F64[dec as usize]);
    match magic::for_power(dec) {
        None => write_u64(buf, n, 0),
        Some(divisor) => {
            // n can reach 10^16, past the multiply-shift bound.
            let (int, frac) = divisor.divmod_guarded(n);
            write_u64(buf, int, 0);
            buf.push(opts.decimal_separator);
            write_u64_packed(buf, frac, dec);
        }
    }
}

/// Large values or many decimals: drop noise decimals, then split.
fn write_general(buf: &mut Vec<u8>, f: f64, dec: u32, opts: &FormatOptions) {
    if f > NOISE_FREE_BOUND || dec == 0 {
        return write_integral(buf, f, opts);
    }

    let scaled = drop_noise_digits(f, dec, opts.rounding);
    let (int, frac) = scaled.split();
    write_u64(buf, int, 0);
    if scaled.decimals > 0 {
        buf.push(opts.decimal_separator);
        write_u64(buf, frac, scaled.decimals);
    }
}

/// Full precision for `f >= 1`.
fn write_full(buf: &mut Vec<u8>, f: f64, opts: &FormatOptions) {
    if f > NOISE_FREE_BOUND {
        return write_integral(buf, f, opts);
    }

    let scaled = drop_noise_digits(f, MAX_DECIMALS, opts.rounding);
    let (int, frac) = scaled.split();
    write_u64(buf, int, 0);
    buf.push(opts.decimal_separator);

    let (frac, dec) = snap_fraction(frac, scaled.decimals);
    if frac == 0 {
        buf.push(b'0');
    } else {
        write_u64(buf, frac, dec);
    }
}

/// Full precision for `0 <= f < 1`: leading zeros, then 17 significant
/// digits.
fn write_small_full(buf: &mut Vec<u8>, f: f64, opts: &FormatOptions) {
    buf.push(b'0');
    buf.push(opts.decimal_separator);
    if f == 0.0 {
        buf.push(b'0');
        return;
    }

    // 10^-(zeros + 1) <= f < 10^-zeros
    let mut zeros = F64_NEG_POW10.partition_point(|&p| f < p) - 1;
    let power = zeros + SMALL_FULL_DIGITS as usize;
    let scaled = match F64_POW10.get(power) {
        Some(&p) => f * p,
        None => f * F64_POW10[power - MAX_F64_POW10] * F64_POW10[MAX_F64_POW10],
    };

    let mut n = opts.rounding.round(scaled);
    if n >= SMALL_FULL_LIMIT && zeros > 0 {
        zeros -= 1;
        n /= 10;
    }
    append_zeros(buf, zeros);
    let (n, _) = snap_fraction(n, SMALL_FULL_DIGITS);
    write_u64(buf, n, 0);
}

/// Rounded integer with no fraction. Digits past [`NOISE_FREE_BOUND`] are
/// written as `0`s, or as `e+N` when there are more than
/// `opts.max_trailing_zeros` of them.
fn write_integral(buf: &mut Vec<u8>, mut f: f64, opts: &FormatOptions) {
    let mut zeros = 0u32;
    while f > NOISE_FREE_BOUND {
        f /= 10.0;
        zeros += 1;
    }
    write_u64(buf, opts.rounding.round(f), 0);
    if zeros > opts.max_trailing_zeros {
        buf.extend_from_slice(b"e+");
        write_u64(buf, zeros as u64, 0);
    } else {
        append_zeros(buf, zeros as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn fmt(f: f64, decimals: i32) -> String {
        let mut buf = Vec::new();
        ftoa(&mut buf, f, decimals, Separator::None).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_fixed_basic() {
        assert_eq!(fmt(3.14159, 2), "3.14");
        assert_eq!(fmt(3.14159, 3), "3.142");
        assert_eq!(fmt(12.34, 2), "12.34");
        assert_eq!(fmt(1234.5678, 4), "1234.5678");
        assert_eq!(fmt(5.0, 3), "5.000");
        assert_eq!(fmt(42.0, 8), "42.00000000");
        assert_eq!(fmt(7.0, 0), "7");
    }

    #[test]
    fn test_fixed_small_fractions() {
        assert_eq!(fmt(0.005, 2), "0.01");
        assert_eq!(fmt(1e-7, 8), "0.00000010");
        assert_eq!(fmt(0.0, 3), "0.000");
    }

    #[test]
    fn test_fixed_carry_into_integer() {
        assert_eq!(fmt(99.999, 2), "100.00");
        assert_eq!(fmt(0.999, 2), "1.00");
    }

    #[test]
    fn test_binary_representation_below_half() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(fmt(1.005, 2), "1.00");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(fmt(2.5, 0), "3");
        assert_eq!(fmt(0.5, 0), "1");
        assert_eq!(fmt(-1.25, 1), "-1.3");
        assert_eq!(fmt(-3.5, 0), "-4");
    }

    #[test]
    fn test_negative_zero() {
        let mut buf = Vec::new();
        ftoa(&mut buf, -0.0, 2, Separator::COMMA).unwrap();
        assert_eq!(buf, b"0.00,");
        assert_eq!(fmt(-0.0, -1), "0.0");
    }

    #[test]
    fn test_negative_rounds_away() {
        let mut buf = Vec::new();
        ftoa(&mut buf, -3.5, 0, Separator::None).unwrap();
        assert_eq!(buf, b"-4");
    }

    #[test]
    fn test_clamp_decimals() {
        assert_eq!(fmt(0.1, 20), "0.10000000000000000");
        assert_eq!(fmt(0.1, 20), fmt(0.1, MAX_DECIMALS as i32));
    }

    #[test]
    fn test_general_many_decimals() {
        assert_eq!(fmt(1.1, 16), "1.1000000000000000");
        assert_eq!(fmt(0.3, 17), "0.30000000000000000");
        assert_eq!(fmt(123456.7, 10), "123456.7000000000");
    }

    #[test]
    fn test_general_large_magnitude() {
        assert_eq!(fmt(123456789.123, 2), "123456789.12");
        assert_eq!(fmt(123456789012.345, 3), "123456789012.345");
        assert_eq!(fmt(1e8, 2), "100000000.00");
        assert_eq!(fmt(123456789.5, 0), "123456790");
    }

    #[test]
    fn test_general_drops_all_decimals() {
        // 10^17 has no room for any decimal.
        assert_eq!(fmt(1e17, 3), "100000000000000000");
    }

    #[test]
    fn test_integral_trailing_zeros() {
        assert_eq!(fmt(1.2e17, 3), "120000000000000000");
        assert_eq!(fmt(1e20, 2), "100000000000000000000");
        assert_eq!(fmt(1e22, 0), "10000000000000000000000");
        assert_eq!(fmt(1.5e18, 0), "1500000000000000000");
    }

    #[test]
    fn test_integral_exponent() {
        assert_eq!(fmt(1e25, 2), "100000000000000000e+8");
        assert!(fmt(f64::MAX, 0).contains("e+"));
    }

    #[test]
    fn test_not_finite() {
        let mut buf = Vec::new();
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(ftoa(&mut buf, f, 2, Separator::COMMA), Err(NumError::NotFinite));
            assert_eq!(ftoa(&mut buf, f, -1, Separator::COMMA), Err(NumError::NotFinite));
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn test_separator_appended_last() {
        let mut buf = Vec::new();
        ftoa(&mut buf, 1.5, 1, Separator::TAB).unwrap();
        ftoa(&mut buf, -2.25, 2, Separator::NEWLINE).unwrap();
        ftoa(&mut buf, 1e25, 0, Separator::SPACE).unwrap();
        assert_eq!(buf, b"1.5\t-2.25\n100000000000000000e+8 ");
    }

    #[test]
    fn test_precision_from_decimals() {
        assert_eq!(Precision::from_decimals(-1), Precision::Full);
        assert_eq!(Precision::from_decimals(i32::MIN), Precision::Full);
        assert_eq!(Precision::from_decimals(0), Precision::Fixed(0));
        assert_eq!(Precision::from(8), Precision::Fixed(8));
        assert_eq!(Precision::from(i32::MAX), Precision::Fixed(MAX_DECIMALS));
    }
}




#[cfg(test)]
mod fixed_tests {
    use super::*;

    fn fixed<const D: u32>(f: f64) -> Vec<u8> {
        let mut buf = Vec::new();
        ftoa_fixed::<D>(&mut buf, f, Separator::None).unwrap();
        buf
    }

    #[test]
    fn test_fixed_counts() {
        assert_eq!(fixed::<0>(2.5), b"3");
        assert_eq!(fixed::<1>(0.25), b"0.3");
        assert_eq!(fixed::<2>(3.14159), b"3.14");
        assert_eq!(fixed::<3>(-0.5), b"-0.500");
        assert_eq!(fixed::<8>(1.0 / 3.0), b"0.33333333");
    }

    #[test]
    fn test_fixed_falls_back_for_large() {
        assert_eq!(fixed::<2>(1e9), b"1000000000.00");
        assert_eq!(fixed::<0>(-1e20), b"-100000000000000000000");
    }

    #[test]
    fn test_fixed_matches_ftoa() {
        for f in [0.0, -0.0, 1.005, 12.5, -7.125, 99999999.99] {
            let mut expected = Vec::new();
            ftoa(&mut expected, f, 2, Separator::COMMA).unwrap();
            let mut buf = Vec::new();
            ftoa_fixed::<2>(&mut buf, f, Separator::COMMA).unwrap();
            assert_eq!(buf, expected, "f = {f}");
        }
    }

    #[test]
    fn test_fixed_not_finite() {
        let mut buf = Vec::new();
        assert_eq!(
            ftoa_fixed::<2>(&mut buf, f64::NAN, Separator::None),
            Err(NumError::NotFinite)
        );
        assert!(buf.is_empty());
    }
}
