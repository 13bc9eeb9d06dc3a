//! Timestamp codec: date and time in one magnitude-keyed head, a year tail,
//! and an optional zone tail.
//!
//! Head layout from the least significant bit upward: 1 bit has-zone flag,
//! 2 bits magnitude, `10 * magnitude` bits sub-second value, 6 bits second,
//! 6 bits minute, 5 bits hour, 5 bits day, 4 bits month, then however many
//! low bits of the encoded year the head still has room for (3, 1, 7 or 5,
//! by magnitude). The remaining year bits travel in the variable-length
//! tail, the zone in its own tail after that.

use crate::temporal::Temporal;
use crate::time::{
    subsecond_magnitude, SIZE_HOUR, SIZE_MAGNITUDE, SIZE_MINUTE, SIZE_SECOND, SIZE_SUBSECOND,
    SUBSECOND_MULTIPLIERS,
};
use crate::{bits, uleb128, year, zone, Error, Result, Timezone};

const SIZE_DAY: u32 = 5;
const SIZE_MONTH: u32 = 4;

/// Head widths in bytes, indexed by magnitude.
pub(crate) const HEAD_BYTE_COUNTS: [usize; 4] = [4, 5, 7, 8];
/// Low bits of the encoded year packed into the head, indexed by magnitude.
const YEAR_LOW_BITS: [u32; 4] = [3, 1, 7, 5];
/// Wire width of the all-zero reserved timestamp.
pub(crate) const ZERO_VALUE_BYTE_COUNT: usize = 5;

/// Number of bytes needed to encode a timestamp with these parameters.
pub fn encoded_size(year_value: i32, nanosecond: u32, zone_value: &Timezone) -> usize {
    let magnitude = subsecond_magnitude(nanosecond);
    HEAD_BYTE_COUNTS[magnitude]
        + year::tail_group_count(year::encode_year(year_value), YEAR_LOW_BITS[magnitude])
        + zone::encoded_size(zone_value)
}

/// Writes head, year tail and zone tail. The caller must have reserved
/// [`encoded_size`] bytes; zero values are handled by the dispatcher before
/// this point.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encode_into(
    year_value: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
    zone_value: &Timezone,
    buf: &mut [u8],
) -> Result<usize> {
    let magnitude = subsecond_magnitude(nanosecond);
    let head_byte_count = HEAD_BYTE_COUNTS[magnitude];
    let subsecond = u64::from(nanosecond / SUBSECOND_MULTIPLIERS[magnitude]);
    let encoded_year = year::encode_year(year_value);
    let year_low_bits = YEAR_LOW_BITS[magnitude];

    // The full encoded year goes in; truncating the accumulator to the head
    // width keeps exactly its low bits.
    let mut accumulator = u64::from(encoded_year);
    accumulator = (accumulator << SIZE_MONTH) | u64::from(month);
    accumulator = (accumulator << SIZE_DAY) | u64::from(day);
    accumulator = (accumulator << SIZE_HOUR) | u64::from(hour);
    accumulator = (accumulator << SIZE_MINUTE) | u64::from(minute);
    accumulator = (accumulator << SIZE_SECOND) | u64::from(second);
    accumulator = (accumulator << (SIZE_SUBSECOND * magnitude as u32)) | subsecond;
    accumulator = (accumulator << SIZE_MAGNITUDE) | magnitude as u64;
    accumulator <<= 1;
    if !zone_value.is_utc() {
        accumulator |= 1;
    }

    bits::encode_le(accumulator, buf, head_byte_count);
    let mut written = head_byte_count;
    written += uleb128::encode(
        u64::from(encoded_year >> year_low_bits),
        &mut buf[written..],
    )?;
    written += zone::encode(zone_value, &mut buf[written..]);
    Ok(written)
}

/// Decodes a timestamp from the start of `src`.
///
/// Returns the value and the number of bytes consumed. Field ranges are not
/// checked here; call [`Temporal::validate`] for that.
pub fn decode(src: &[u8]) -> Result<(Temporal, usize)> {
    let Some(&first) = src.first() else {
        return Err(Error::incomplete(1));
    };
    let magnitude = usize::from(first >> 1) & bits::bit_mask(SIZE_MAGNITUDE) as usize;
    let head_byte_count = HEAD_BYTE_COUNTS[magnitude];
    if src.len() < head_byte_count {
        return Err(Error::incomplete(head_byte_count));
    }

    let subsecond_bits = SIZE_SUBSECOND * magnitude as u32;
    let mut accumulator = bits::decode_le(src, head_byte_count);
    let has_zone = accumulator & 1 == 1;
    accumulator >>= 1;
    accumulator >>= SIZE_MAGNITUDE;
    let subsecond = accumulator & bits::bit_mask(subsecond_bits);
    accumulator >>= subsecond_bits;
    let second = (accumulator & bits::bit_mask(SIZE_SECOND)) as u8;
    accumulator >>= SIZE_SECOND;
    let minute = (accumulator & bits::bit_mask(SIZE_MINUTE)) as u8;
    accumulator >>= SIZE_MINUTE;
    let hour = (accumulator & bits::bit_mask(SIZE_HOUR)) as u8;
    accumulator >>= SIZE_HOUR;
    let day = (accumulator & bits::bit_mask(SIZE_DAY)) as u8;
    accumulator >>= SIZE_DAY;
    let month = (accumulator & bits::bit_mask(SIZE_MONTH)) as u8;
    accumulator >>= SIZE_MONTH;

    let year_low_bits = YEAR_LOW_BITS[magnitude];
    let (encoded_year, tail_len) =
        uleb128::decode_with_seed(accumulator, year_low_bits, &src[head_byte_count..])?;
    let encoded_year = u32::try_from(encoded_year).map_err(|_| Error::Overflow)?;
    let year_value = year::decode_year(encoded_year);
    let mut consumed = head_byte_count + tail_len;

    let nanosecond = subsecond as u32 * SUBSECOND_MULTIPLIERS[magnitude];
    let zone_value = if has_zone {
        let (zone_value, zone_len) = zone::decode(&src[consumed..])?;
        consumed += zone_len;
        zone_value
    } else {
        if year_value == year::YEAR_BIAS && month == 0 && day == 0 {
            return Ok((Temporal::zero_timestamp(), consumed));
        }
        Timezone::Utc
    };

    Ok((
        Temporal::Timestamp {
            year: year_value,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            zone: zone_value,
        },
        consumed,
    ))
}
