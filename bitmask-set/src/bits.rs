//! Fixed-width helpers shared by sets and bitmasks.
//!
//! Bit strings are big-endian: position 0 of the string is the most
//! significant bit of the integer, and the string always has exactly
//! `width` digits.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// The value with the lowest `width` bits set.
pub(crate) fn all_ones(width: usize) -> BigUint {
    (BigUint::one() << width) - 1u32
}

/// Render `value` in base 2, left-padded with `'0'` to `width` digits.
///
/// Callers guarantee `value < 2^width`.
pub(crate) fn to_padded_string(value: &BigUint, width: usize) -> String {
    if value.is_zero() {
        return "0".repeat(width);
    }

    let digits = value.to_str_radix(2);
    debug_assert!(digits.len() <= width, "{} digits for width {}", digits.len(), width);

    let mut out = String::with_capacity(width);
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(&digits);
    out
}

/// Check that `value` fits in `width` bits.
pub(crate) fn check_width(value: &BigUint, width: usize) -> Result<()> {
    let bits = value.bits();
    if bits > width as u64 {
        return Err(Error::TooManyBits { bits, size: width });
    }
    Ok(())
}

/// Validate a digit string of exactly `width` characters and parse it.
///
/// Checks run in order: emptiness, length, then alphabet, so a short string
/// with bad characters reports the length problem.
pub(crate) fn parse_digits(digits: &str, width: usize) -> Result<BigUint> {
    if digits.is_empty() {
        return Err(Error::EmptyInput);
    }

    let actual = digits.chars().count();
    if actual != width {
        return Err(Error::LengthMismatch {
            expected: width,
            actual,
        });
    }

    if let Some((position, character)) = digits
        .chars()
        .enumerate()
        .find(|(_, c)| *c != '0' && *c != '1')
    {
        return Err(Error::InvalidCharacter {
            character,
            position,
        });
    }

    // Only ASCII '0'/'1' remain, so the radix parse cannot fail.
    BigUint::parse_bytes(digits.as_bytes(), 2)
        .ok_or_else(|| Error::InvalidArgument(format!("unparsable bit string {digits:?}")))
}

/// Bit number inside the integer for string position `index`.
#[inline]
pub(crate) fn bit_of(index: usize, width: usize) -> u64 {
    (width - 1 - index) as u64
}
