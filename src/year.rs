//! Year encoding: epoch bias, zig-zag transform and head/tail split.
//!
//! Years are stored as the zig-zag transform of `year - 2000`, so years near
//! 2000 produce small encoded values. A kind- and magnitude-dependent number
//! of low bits packs into the fixed head; the remainder travels as a
//! variable-length tail ([`crate::uleb128`]).

use crate::{bits, uleb128};

/// Epoch bias applied before the zig-zag transform.
pub const YEAR_BIAS: i32 = 2000;

/// Transforms a calendar year into its unsigned encoded form.
#[inline]
pub fn encode_year(year: i32) -> u32 {
    bits::zigzag_encode32(year.wrapping_sub(YEAR_BIAS))
}

/// Inverse of [`encode_year`].
#[inline]
pub fn decode_year(encoded_year: u32) -> i32 {
    bits::zigzag_decode32(encoded_year).wrapping_add(YEAR_BIAS)
}

/// Number of tail bytes for an encoded year whose `low_bits` lowest bits are
/// carried by the fixed head. Always at least 1 (the terminator byte).
#[inline]
pub fn tail_group_count(encoded_year: u32, low_bits: u32) -> usize {
    uleb128::encoded_len(u64::from(encoded_year >> low_bits))
}
