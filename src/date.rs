//! Calendar-date codec: a 16-bit packed head plus a year tail.
//!
//! Head layout from the least significant bit upward: 5 bits day, 4 bits
//! month, 7 low bits of the encoded year. The remaining year bits follow as
//! a variable-length tail, so the minimum wire size is 3 bytes. Dates carry
//! no zone; they decode as UTC by convention.

use crate::temporal::Temporal;
use crate::{bits, uleb128, year, Error, Result};

const SIZE_DAY: u32 = 5;
const SIZE_MONTH: u32 = 4;
/// Low bits of the encoded year packed into the head.
const YEAR_LOW_BITS: u32 = 7;

/// Fixed head width in bytes.
pub(crate) const HEAD_BYTE_COUNT: usize = 2;
/// Wire width of the all-zero reserved date.
pub(crate) const ZERO_VALUE_BYTE_COUNT: usize = 3;

/// Number of bytes needed to encode a date with this year.
pub fn encoded_size(year_value: i32) -> usize {
    HEAD_BYTE_COUNT + year::tail_group_count(year::encode_year(year_value), YEAR_LOW_BITS)
}

/// Writes head and year tail. The caller must have reserved [`encoded_size`]
/// bytes; zero values are handled by the dispatcher before this point.
pub(crate) fn encode_into(year_value: i32, month: u8, day: u8, buf: &mut [u8]) -> Result<usize> {
    let encoded_year = year::encode_year(year_value);

    let mut accumulator = u16::from(encoded_year as u8 & bits::bit_mask(YEAR_LOW_BITS) as u8);
    accumulator = (accumulator << SIZE_MONTH) | u16::from(month);
    accumulator = (accumulator << SIZE_DAY) | u16::from(day);

    bits::encode16_le(accumulator, buf);
    let tail_len = uleb128::encode(
        u64::from(encoded_year >> YEAR_LOW_BITS),
        &mut buf[HEAD_BYTE_COUNT..],
    )?;
    Ok(HEAD_BYTE_COUNT + tail_len)
}

/// Decodes a date from the start of `src`.
///
/// Returns the value and the number of bytes consumed. Field ranges are not
/// checked here; call [`Temporal::validate`] for that.
pub fn decode(src: &[u8]) -> Result<(Temporal, usize)> {
    if src.len() < HEAD_BYTE_COUNT {
        return Err(Error::incomplete(HEAD_BYTE_COUNT));
    }
    let mut accumulator = u64::from(bits::decode16_le(src));
    let day = (accumulator & bits::bit_mask(SIZE_DAY)) as u8;
    accumulator >>= SIZE_DAY;
    let month = (accumulator & bits::bit_mask(SIZE_MONTH)) as u8;
    accumulator >>= SIZE_MONTH;

    let (encoded_year, tail_len) =
        uleb128::decode_with_seed(accumulator, YEAR_LOW_BITS, &src[HEAD_BYTE_COUNT..])?;
    let encoded_year = u32::try_from(encoded_year).map_err(|_| Error::Overflow)?;
    let year_value = year::decode_year(encoded_year);
    let consumed = HEAD_BYTE_COUNT + tail_len;

    if year_value == year::YEAR_BIAS && month == 0 && day == 0 {
        return Ok((Temporal::zero_date(), consumed));
    }
    Ok((
        Temporal::Date {
            year: year_value,
            month,
            day,
        },
        consumed,
    ))
}
