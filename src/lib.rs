//! Fast decimal text conversion for `f64` and machine integers
//!
//! This library appends numbers as ASCII decimal text to a caller-owned
//! `Vec<u8>` and parses decimal text back into `f64`, skipping the general
//! purpose formatting and parsing machinery on the common shapes:
//!
//! - **Integers**: values below 10^8 are packed into one 64-bit register
//!   and emitted with a single 8-byte store; larger values take a plain
//!   digit loop.
//! - **Floats, fixed decimals**: values below 10^8 with at most 8 decimals
//!   are scaled, rounded and split with multiply-shift division.
//! - **Floats, many decimals or full precision**: decimals that would only
//!   encode binary64 representation noise are dropped before rounding.
//! - **Parsing**: `xsd:decimal` shaped text (`-12.50`, `+.5`, `7`) is
//!   accumulated in a `u64` and divided once by an exact power of ten.
//!   Anything else goes to a general parser.
//!
//! ## Features
//!
//! - **no_std compatible**: needs only `alloc` for the output buffer
//! - **Per-call configuration**: no global switches, see [`FormatOptions`]
//!   and [`ParseOptions`]
//! - **Serde support**: configuration values are (de)serializable
//!
//! ## Example
//!
//! ```rust
//! use fastdec::{Separator, atof, ftoa, itoa};
//!
//! let mut row = Vec::new();
//! itoa(&mut row, -42, Separator::TAB);
//! ftoa(&mut row, 3.14159, 2, Separator::TAB).unwrap();
//! ftoa(&mut row, 0.1 + 0.2, -1, Separator::None).unwrap();
//! assert_eq!(row, b"-42\t3.14\t0.3");
//!
//! assert_eq!(atof(b"-1234.5").unwrap(), -1234.5);
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(test)]
extern crate std;

extern crate alloc;

pub mod magic;

mod atof;
mod ftoa;
mod itoa;
mod options;
mod round;
mod trim;

pub use atof::{atof, atof_float, parse_float, parse_with};
pub use ftoa::{MAX_DECIMALS, Precision, ftoa, ftoa_fixed, ftoa_with};
pub use itoa::{itoa, utoa, utoa8};
pub use options::{Fallback, FormatOptions, ParseOptions, Separator, Whitespace};
pub use round::{NOISE_FREE_BOUND, Rounding, SNAP_SCOPE, SNAP_TOLERANCE, round_to_pow10};
pub use trim::{trim, trim_ascii, trim_trailing_zeros};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NumError {
    #[error("number is empty")]
    EmptyInput,

    #[error("invalid syntax: unexpected byte {0:#04x}")]
    InvalidSyntax(u8),

    #[error("value is not finite")]
    NotFinite,

    #[error("fallback parser: {0}")]
    Fallback(lexical_core::Error),
}

pub type Result<T> = core::result::Result<T, NumError>;
