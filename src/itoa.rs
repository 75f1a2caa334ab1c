use alloc::vec::Vec;

use crate::magic::DIV10;
use crate::options::Separator;

/// Integers below this are packed in one register by [`write_u64_packed`].
pub(crate) const PACKED_LIMIT: u64 = 100_000_000;

/// Digit lanes a packed write can fill.
pub(crate) const PACKED_WIDTH: u32 = 8;

/// Decimal digits in `u64::MAX`.
const MAX_U64_DIGITS: usize = 20;

/// `b'0'` in each of the eight byte lanes.
const ASCII_ZEROS: u64 = 0x3030_3030_3030_3030;

// ============================================================================
// Packed encoder (n < 10^8)
// ============================================================================

/// Appends `n < 10^8` as ASCII digits, left padded with `0` to `min_width`
/// (at most 8) digits.
///
/// Digits are peeled off with the multiply-shift divisor for 10 and shifted
/// into the byte lanes of a `u64`, most significant digit ending up in the
/// lowest byte. One addition turns all lanes into ASCII at once and the
/// register is stored little-endian, truncated to the digit count.
#[inline]
pub(crate) fn write_u64_packed(buf: &mut Vec<u8>, mut n: u64, min_width: u32) {
    debug_assert!(n < PACKED_LIMIT, "packed encoder needs n < 10^8, got {n}");
    debug_assert!(min_width <= PACKED_WIDTH);

    let mut lanes = 0u64;
    let mut digits = 1usize;
    let mut width = min_width;
    while n >= 10 || width > 1 {
        let (q, r) = DIV10.divmod(n);
        lanes = (lanes + r) << 8;
        n = q;
        digits += 1;
        width = width.saturating_sub(1);
    }
    lanes += n + ASCII_ZEROS;
    buf.extend_from_slice(&lanes.to_le_bytes()[..digits]);
}

// ============================================================================
// Wide encoder (any u64)
// ============================================================================

/// Appends any `n` as ASCII digits, left padded with `0` to `min_width`.
pub(crate) fn write_u64_wide(buf: &mut Vec<u8>, mut n: u64, min_width: u32) {
    let mut width = min_width as usize;
    if width > MAX_U64_DIGITS {
        append_zeros(buf, width - MAX_U64_DIGITS);
        width = MAX_U64_DIGITS;
    }

    let mut tmp = [0u8; MAX_U64_DIGITS];
    let mut i = MAX_U64_DIGITS - 1;
    while n >= 10 || width > 1 {
        let q = n / 10;
        tmp[i] = b'0' + (n - q * 10) as u8;
        n = q;
        width = width.saturating_sub(1);
        i -= 1;
    }
    tmp[i] = b'0' + n as u8;
    buf.extend_from_slice(&tmp[i..]);
}

// ============================================================================
// Dispatch
// ============================================================================

/// Appends `n` zero padded to `min_width`, picking the packed encoder
/// whenever its bounds hold.
#[inline(always)]
pub(crate) fn write_u64(buf: &mut Vec<u8>, n: u64, min_width: u32) {
    if n < PACKED_LIMIT && min_width <= PACKED_WIDTH {
        write_u64_packed(buf, n, min_width);
    } else {
        write_u64_wide(buf, n, min_width);
    }
}

/// Appends `count` literal `0` bytes.
#[inline]
pub(crate) fn append_zeros(buf: &mut Vec<u8>, count: usize) {
    buf.resize(buf.len() + count, b'0');
}

// ============================================================================
// Public API
// ============================================================================

/// Appends `n` as decimal ASCII, then `sep`.
///
/// ```
/// use fastdec::{Separator, itoa};
///
/// let mut buf = Vec::new();
/// itoa(&mut buf, -9_007_199_254_740_993, Separator::COMMA);
/// assert_eq!(buf, b"-9007199254740993,");
/// ```
pub fn itoa(buf: &mut Vec<u8>, n: i64, sep: Separator) {
    if n < 0 {
        buf.push(b'-');
    }
    write_u64(buf, n.unsigned_abs(), 0);
    sep.push_to(buf);
}

/// Appends `n` as decimal ASCII, then `sep`.
pub fn utoa(buf: &mut Vec<u8>, n: u64, sep: Separator) {
    write_u64(buf, n, 0);
    sep.push_to(buf);
}

/// Appends `n` as decimal ASCII, then `sep`, using only the packed encoder.
///
/// # Panics
/// Panics if `n >= 10^8`.
pub fn utoa8(buf: &mut Vec<u8>, n: u64, sep: Separator) {
    assert!(n < PACKED_LIMIT, "utoa8 needs n < 10^8, got {n}");
    write_u64_packed(buf, n, 0);
    sep.push_to(buf);
}



// Property-based testing
#[cfg(test)]
mod itoa_property_tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_packed_matches_std(n in 0u64..PACKED_LIMIT, width in 0u32..=PACKED_WIDTH) {
            let mut buf = Vec::new();
            write_u64_packed(&mut buf, n, width);
            let expected = format!("{:0width$}", n, width = width as usize);
            prop_assert_eq!(buf, expected.into_bytes());
        }

        #[test]
        fn prop_wide_matches_std(n in any::<u64>(), width in 0u32..=20) {
            let mut buf = Vec::new();
            write_u64_wide(&mut buf, n, width);
            let expected = format!("{:0width$}", n, width = width as usize);
            prop_assert_eq!(buf, expected.into_bytes());
        }

        #[test]
        fn prop_itoa_matches_std(n in any::<i64>()) {
            let mut buf = Vec::new();
            itoa(&mut buf, n, Separator::None);
            prop_assert_eq!(buf, n.to_string().into_bytes());
        }
    }
}
