//! Time-of-day codec: a magnitude-keyed head plus an optional zone tail.
//!
//! The two magnitude bits near the bottom of the first byte select the
//! sub-second resolution (seconds, milliseconds, microseconds, nanoseconds)
//! and with it the head width: 3, 4, 5 or 7 bytes. Head layout from the
//! least significant bit upward: 1 bit has-zone flag, 2 bits magnitude,
//! `10 * magnitude` bits sub-second value, 6 bits second, 6 bits minute,
//! 5 bits hour. The bits above the hour are filled with ones; a mismatch on
//! decode means corruption, except that all-zero bits mark the reserved
//! zero time.

use crate::temporal::Temporal;
use crate::{bits, zone, Error, Result, Timezone};

pub(crate) const SIZE_MAGNITUDE: u32 = 2;
pub(crate) const SIZE_SUBSECOND: u32 = 10;
pub(crate) const SIZE_SECOND: u32 = 6;
pub(crate) const SIZE_MINUTE: u32 = 6;
pub(crate) const SIZE_HOUR: u32 = 5;

/// Head widths in bytes, indexed by magnitude.
pub(crate) const HEAD_BYTE_COUNTS: [usize; 4] = [3, 4, 5, 7];
/// Expected fill pattern above the hour bits, indexed by magnitude.
const RESERVED_BITS: [u64; 4] = [0x0F, 0x03, 0x00, 0x3F];
/// Nanoseconds per sub-second unit, indexed by magnitude.
pub(crate) const SUBSECOND_MULTIPLIERS: [u32; 4] = [1, 1_000_000, 1_000, 1];
/// Wire width of the all-zero reserved time.
pub(crate) const ZERO_VALUE_BYTE_COUNT: usize = 3;

/// Selects the smallest magnitude that represents `nanosecond` exactly.
#[inline]
pub(crate) fn subsecond_magnitude(nanosecond: u32) -> usize {
    if nanosecond == 0 {
        0
    } else if nanosecond % 1_000 != 0 {
        3
    } else if nanosecond % 1_000_000 != 0 {
        2
    } else {
        1
    }
}

/// Number of bytes needed to encode a time with this sub-second value and zone.
pub fn encoded_size(nanosecond: u32, zone_value: &Timezone) -> usize {
    HEAD_BYTE_COUNTS[subsecond_magnitude(nanosecond)] + zone::encoded_size(zone_value)
}

/// Writes head and zone tail. The caller must have reserved [`encoded_size`]
/// bytes; zero values are handled by the dispatcher before this point.
pub(crate) fn encode_into(
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

    // Start from all ones so the bits above the hour become the reserved
    // pattern once the head is truncated to its byte count.
    let mut accumulator = !0u64;
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
    let zone_len = zone::encode(zone_value, &mut buf[head_byte_count..]);
    Ok(head_byte_count + zone_len)
}

/// Decodes a time of day from the start of `src`.
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

    if accumulator != RESERVED_BITS[magnitude] {
        // All-zero bits above the hour mark the reserved zero time, no
        // matter what the other head bits say.
        if accumulator == 0 {
            return Ok((Temporal::zero_time(), head_byte_count));
        }
        return Err(Error::InvalidEncoding {
            expected: RESERVED_BITS[magnitude],
            actual: accumulator,
        });
    }

    let nanosecond = subsecond as u32 * SUBSECOND_MULTIPLIERS[magnitude];
    let (zone_value, zone_len) = if has_zone {
        zone::decode(&src[head_byte_count..])?
    } else {
        (Timezone::Utc, 0)
    };

    Ok((
        Temporal::Time {
            hour,
            minute,
            second,
            nanosecond,
            zone: zone_value,
        },
        head_byte_count + zone_len,
    ))
}
