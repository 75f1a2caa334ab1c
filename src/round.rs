#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::magic::{POW10_F64, POW10_U64};

/// Largest scaled value whose rounding still carries real digits.
///
/// A double holds about 15.95 significant decimal digits; scaling past
/// 10^17 only adds digits produced by the binary-to-decimal conversion.
pub const NOISE_FREE_BOUND: f64 = 1e17;

/// How far (in units of the last digit) a fraction may sit from a round
/// boundary and still be snapped to it.
pub const SNAP_TOLERANCE: u64 = 18;

/// Fractions at or below this are never snapped.
pub const SNAP_SCOPE: u64 = 100_000_000;

// ============================================================================
// Rounding
// ============================================================================

/// Round-half-away-from-zero on non-negative values, done as
/// `(f + half) as u64`.
///
/// [`Rounding::COMPAT`] adds one ULP less than 0.5. Exact halves such as
/// `3.5` still round up, while scaled values that land a hair under `.5`
/// through binary representation error stay down more often, which is
/// closer to what shortest-representation formatters print. It is a
/// compatibility choice, not a correctness one; [`Rounding::HALF`] gives
/// plain `+ 0.5` rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RoundingRepr"))]
pub struct Rounding {
    half: f64,
}

/// Unchecked wire form of [`Rounding`]; the bias is range checked on the
/// way in.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RoundingRepr {
    half: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RoundingRepr> for Rounding {
    type Error = &'static str;

    fn try_from(repr: RoundingRepr) -> Result<Self, Self::Error> {
        Self::try_with_half(repr.half).ok_or("rounding bias must be in 0.0..=0.5")
    }
}

impl Rounding {
    /// `0.5 - 2^-54`, the largest double below one half.
    pub const COMPAT: Self = Self {
        half: 0.499_999_999_999_999_94,
    };

    pub const HALF: Self = Self { half: 0.5 };

    /// Rounding with a custom bias.
    ///
    /// # Panics
    /// Panics if `half` is not in `0.0..=0.5`.
    pub const fn with_half(half: f64) -> Self {
        match Self::try_with_half(half) {
            Some(rounding) => rounding,
            None => panic!("rounding bias must be in 0.0..=0.5"),
        }
    }

    /// Rounding with a custom bias, or `None` if `half` is not in
    /// `0.0..=0.5` (NaN included).
    pub const fn try_with_half(half: f64) -> Option<Self> {
        if half >= 0.0 && half <= 0.5 {
            Some(Self { half })
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn half(self) -> f64 {
        self.half
    }

    /// Rounds a non-negative, finite `f` to an integer.
    ///
    /// Values past `u64::MAX` saturate.
    #[inline(always)]
    pub fn round(self, f: f64) -> u64 {
        (f + self.half) as u64
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Self::COMPAT
    }
}

// ============================================================================
// Noise suppression
// ============================================================================

/// `round(f * 10^decimals)` together with its scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scaled {
    pub value: u64,
    pub scale: u64,
    pub decimals: u32,
}

impl Scaled {
    /// Splits into integer part and fraction.
    #[inline(always)]
    pub fn split(self) -> (u64, u64) {
        let q = self.value / self.scale;
        (q, self.value - q * self.scale)
    }
}

/// Scales `f` by `10^decimals`, giving up decimal places while the scaled
/// value is past [`NOISE_FREE_BOUND`], then rounds.
///
/// `f` must be finite, non-negative and at most `NOISE_FREE_BOUND`, and
/// `decimals` at most 19.
pub(crate) fn drop_noise_digits(f: f64, mut decimals: u32, rounding: Rounding) -> Scaled {
    let mut scaled = f * POW10_F64[decimals as usize];
    while scaled > NOISE_FREE_BOUND && decimals > 0 {
        decimals -= 1;
        scaled = f * POW10_F64[decimals as usize];
    }
    Scaled {
        value: rounding.round(scaled),
        scale: POW10_U64[decimals as usize],
        decimals,
    }
}

/// Snaps `n` to the nearest multiple of `scope` when it lies within
/// [`SNAP_TOLERANCE`] of one.
///
/// Undoes conversion artifacts such as `199999998` for `200000000`. `n` is
/// a fraction scaled by `limit`, so a snapped value that would reach
/// `limit` (carry into the integer part) is rejected and `n` returned as is.
/// Values at or below `scope` are left alone.
///
/// ```
/// use fastdec::{SNAP_SCOPE, round_to_pow10};
///
/// assert_eq!(round_to_pow10(199_999_998, 1_000_000_000, SNAP_SCOPE), 200_000_000);
/// assert_eq!(round_to_pow10(199_999_950, 1_000_000_000, SNAP_SCOPE), 199_999_950);
/// ```
pub fn round_to_pow10(n: u64, limit: u64, scope: u64) -> u64 {
    if n <= scope {
        return n;
    }
    let k = (n + SNAP_TOLERANCE) % scope;
    if k > 2 * SNAP_TOLERANCE {
        return n;
    }
    let snapped = n + SNAP_TOLERANCE - k;
    if snapped < limit { snapped } else { n }
}

/// Removes trailing zero digits from `n`, one decimal place each.
#[inline]
pub(crate) fn strip_zeros(mut n: u64, mut decimals: u32) -> (u64, u32) {
    while n > 9 && n % 10 == 0 && decimals > 0 {
        n /= 10;
        decimals -= 1;
    }
    (n, decimals)
}

/// Full-precision cleanup of a fraction `frac` with `decimals` digits:
/// strip trailing zeros, snap to a round boundary if close, strip again.
pub(crate) fn snap_fraction(frac: u64, decimals: u32) -> (u64, u32) {
    let (n, decimals) = strip_zeros(frac, decimals);
    let snapped = round_to_pow10(n, POW10_U64[decimals as usize], SNAP_SCOPE);
    if snapped == n {
        return (n, decimals);
    }
    strip_zeros(snapped, decimals)
}
