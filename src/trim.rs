/// Strips leading and trailing bytes `<= b' '`.
///
/// That covers ASCII whitespace and every other control character, which
/// is what fixed-width and XML text fields tend to be padded with.
#[inline]
pub fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b > b' ').unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| b > b' ').map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Strips leading and trailing ASCII whitespace only.
#[inline]
pub fn trim_ascii(bytes: &[u8]) -> &[u8] {
    bytes.trim_ascii()
}

/// Drops trailing `0`s from the fraction of a formatted number, keeping at
/// least one digit after `decimal_separator`.
///
/// Numbers without a decimal separator come back unchanged, so integers
/// and `e+N` forms keep their zeros.
///
/// ```
/// use fastdec::trim_trailing_zeros;
///
/// assert_eq!(trim_trailing_zeros(b"1.2500", b'.'), b"1.25");
/// assert_eq!(trim_trailing_zeros(b"3.000", b'.'), b"3.0");
/// assert_eq!(trim_trailing_zeros(b"1200", b'.'), b"1200");
/// ```
pub fn trim_trailing_zeros(number: &[u8], decimal_separator: u8) -> &[u8] {
    let Some(dot) = number.iter().rposition(|&b| b == decimal_separator) else {
        return number;
    };
    let keep = dot + 2;
    let mut end = number.len();
    while end > keep && number[end - 1] == b'0' {
        end -= 1;
    }
    &number[..end]
}
