//! The temporal value: a calendar date, a time of day, or a full timestamp.
//!
//! Sum type with per-variant fields. Construction through the checked
//! constructors validates every field; the raw codec neither validates on
//! decode nor refuses to encode an out-of-range value that was built by
//! hand, so `validate()` exists as an explicit step. Validation is only
//! basic: it catches a 54th of December or minute 61, not whether a
//! February 29th exists in that year or whether a leap second was legal at
//! that instant.

use core::fmt;

use crate::{date, time, timestamp, zone, Error, Result, Timezone};

const MONTH_MIN: u8 = 1;
const MONTH_MAX: u8 = 12;
const DAY_MIN: u8 = 1;
const HOUR_MAX: u8 = 23;
const MINUTE_MAX: u8 = 59;
/// 60 is allowed: leap second.
const SECOND_MAX: u8 = 60;
const NANOSECOND_MAX: u32 = 999_999_999;

/// Per-month day maximum, indexed by month number. February always allows
/// 29; leap-year correctness is not this crate's business.
const DAY_MAX: [u8; 13] = [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Which of the three wire kinds a [`Temporal`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Time,
    Timestamp,
}

/// A decoded or to-be-encoded temporal value.
///
/// Dates carry no zone; they are implicitly UTC. The reserved zero value of
/// each kind is the all-fields-zero record (see [`Temporal::zero_date`] and
/// friends); for dates and timestamps it fails validation because month and
/// day are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Temporal {
    Date {
        year: i32,
        month: u8,
        day: u8,
    },
    Time {
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
        zone: Timezone,
    },
    Timestamp {
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
        zone: Timezone,
    },
}

impl Temporal {
    /// Builds a validated date.
    pub fn date(year: i32, month: u8, day: u8) -> Result<Self> {
        validate_date_fields(month, day)?;
        Ok(Self::Date { year, month, day })
    }

    /// Builds a validated time of day.
    pub fn time(hour: u8, minute: u8, second: u8, nanosecond: u32, zone: Timezone) -> Result<Self> {
        validate_time_fields(hour, minute, second, nanosecond)?;
        zone.validate()?;
        Ok(Self::Time {
            hour,
            minute,
            second,
            nanosecond,
            zone,
        })
    }

    /// Builds a validated timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn timestamp(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
        zone: Timezone,
    ) -> Result<Self> {
        validate_date_fields(month, day)?;
        validate_time_fields(hour, minute, second, nanosecond)?;
        zone.validate()?;
        Ok(Self::Timestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            zone,
        })
    }

    /// The reserved zero date. Encodes as three zero bytes; fails `validate()`.
    pub fn zero_date() -> Self {
        Self::Date {
            year: 0,
            month: 0,
            day: 0,
        }
    }

    /// The reserved zero time. Field-identical to midnight UTC; encodes as
    /// three zero bytes.
    pub fn zero_time() -> Self {
        Self::Time {
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            zone: Timezone::Utc,
        }
    }

    /// The reserved zero timestamp. Encodes as five zero bytes; fails
    /// `validate()`.
    pub fn zero_timestamp() -> Self {
        Self::Timestamp {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            zone: Timezone::Utc,
        }
    }

    /// True for the all-fields-zero record of any kind.
    pub fn is_zero_value(&self) -> bool {
        match self {
            Self::Date { year, month, day } => *year == 0 && *month == 0 && *day == 0,
            Self::Time {
                hour,
                minute,
                second,
                nanosecond,
                zone,
            } => {
                *hour == 0 && *minute == 0 && *second == 0 && *nanosecond == 0 && zone.is_utc()
            }
            Self::Timestamp {
                year,
                month,
                day,
                hour,
                minute,
                second,
                nanosecond,
                zone,
            } => {
                *year == 0
                    && *month == 0
                    && *day == 0
                    && *hour == 0
                    && *minute == 0
                    && *second == 0
                    && *nanosecond == 0
                    && zone.is_utc()
            }
        }
    }

    /// Gibt die Variante als [`TemporalKind`] zurück.
    #[inline]
    pub fn kind(&self) -> TemporalKind {
        match self {
            Self::Date { .. } => TemporalKind::Date,
            Self::Time { .. } => TemporalKind::Time,
            Self::Timestamp { .. } => TemporalKind::Timestamp,
        }
    }

    #[inline]
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Date { year, .. } | Self::Timestamp { year, .. } => Some(*year),
            Self::Time { .. } => None,
        }
    }

    #[inline]
    pub fn month(&self) -> Option<u8> {
        match self {
            Self::Date { month, .. } | Self::Timestamp { month, .. } => Some(*month),
            Self::Time { .. } => None,
        }
    }

    #[inline]
    pub fn day(&self) -> Option<u8> {
        match self {
            Self::Date { day, .. } | Self::Timestamp { day, .. } => Some(*day),
            Self::Time { .. } => None,
        }
    }

    #[inline]
    pub fn hour(&self) -> Option<u8> {
        match self {
            Self::Time { hour, .. } | Self::Timestamp { hour, .. } => Some(*hour),
            Self::Date { .. } => None,
        }
    }

    #[inline]
    pub fn minute(&self) -> Option<u8> {
        match self {
            Self::Time { minute, .. } | Self::Timestamp { minute, .. } => Some(*minute),
            Self::Date { .. } => None,
        }
    }

    #[inline]
    pub fn second(&self) -> Option<u8> {
        match self {
            Self::Time { second, .. } | Self::Timestamp { second, .. } => Some(*second),
            Self::Date { .. } => None,
        }
    }

    #[inline]
    pub fn nanosecond(&self) -> Option<u32> {
        match self {
            Self::Time { nanosecond, .. } | Self::Timestamp { nanosecond, .. } => Some(*nanosecond),
            Self::Date { .. } => None,
        }
    }

    /// The attached zone. Dates have none (implicitly UTC).
    #[inline]
    pub fn zone(&self) -> Option<&Timezone> {
        match self {
            Self::Time { zone, .. } | Self::Timestamp { zone, .. } => Some(zone),
            Self::Date { .. } => None,
        }
    }

    /// Checks all fields against their allowed ranges.
    ///
    /// The raw codec round-trips out-of-range values; this is the explicit
    /// gate for callers that need in-range guarantees.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Date { month, day, .. } => validate_date_fields(*month, *day),
            Self::Time {
                hour,
                minute,
                second,
                nanosecond,
                zone,
            } => {
                validate_time_fields(*hour, *minute, *second, *nanosecond)?;
                zone.validate()
            }
            Self::Timestamp {
                month,
                day,
                hour,
                minute,
                second,
                nanosecond,
                zone,
                ..
            } => {
                validate_date_fields(*month, *day)?;
                validate_time_fields(*hour, *minute, *second, *nanosecond)?;
                zone.validate()
            }
        }
    }

    /// Number of bytes [`Temporal::encode_to`] will write for this value.
    pub fn encoded_size(&self) -> usize {
        if self.is_zero_value() {
            return match self.kind() {
                TemporalKind::Date => date::ZERO_VALUE_BYTE_COUNT,
                TemporalKind::Time => time::ZERO_VALUE_BYTE_COUNT,
                TemporalKind::Timestamp => timestamp::ZERO_VALUE_BYTE_COUNT,
            };
        }
        match self {
            Self::Date { year, .. } => date::encoded_size(*year),
            Self::Time {
                nanosecond, zone, ..
            } => time::encoded_size(*nanosecond, zone),
            Self::Timestamp {
                year,
                nanosecond,
                zone,
                ..
            } => timestamp::encoded_size(*year, *nanosecond, zone),
        }
    }

    /// Encodes this value into the front of `buf`.
    ///
    /// Returns the number of bytes written. Fails with
    /// [`Error::BufferTooSmall`] when `buf` is shorter than
    /// [`Temporal::encoded_size`]; nothing is written in that case.
    pub fn encode_to(&self, buf: &mut [u8]) -> Result<usize> {
        let required = self.encoded_size();
        if buf.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                available: buf.len(),
            });
        }
        if self.is_zero_value() {
            buf[..required].fill(0);
            return Ok(required);
        }
        match self {
            Self::Date { year, month, day } => date::encode_into(*year, *month, *day, buf),
            Self::Time {
                hour,
                minute,
                second,
                nanosecond,
                zone,
            } => time::encode_into(*hour, *minute, *second, *nanosecond, zone, buf),
            Self::Timestamp {
                year,
                month,
                day,
                hour,
                minute,
                second,
                nanosecond,
                zone,
            } => timestamp::encode_into(
                *year,
                *month,
                *day,
                *hour,
                *minute,
                *second,
                *nanosecond,
                zone,
                buf,
            ),
        }
    }

    /// Encodes into a freshly allocated buffer of exactly the right size.
    pub fn encode_vec(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.encoded_size()];
        let written = match self.encode_to(&mut buf) {
            Ok(written) => written,
            Err(_) => unreachable!("buffer is sized by encoded_size"),
        };
        buf.truncate(written);
        buf
    }
}

fn validate_date_fields(month: u8, day: u8) -> Result<()> {
    if !(MONTH_MIN..=MONTH_MAX).contains(&month) {
        return Err(Error::out_of_range(
            "month",
            i64::from(month),
            i64::from(MONTH_MIN),
            i64::from(MONTH_MAX),
        ));
    }
    let day_max = DAY_MAX[usize::from(month)];
    if !(DAY_MIN..=day_max).contains(&day) {
        return Err(Error::out_of_range(
            "day",
            i64::from(day),
            i64::from(DAY_MIN),
            i64::from(day_max),
        ));
    }
    Ok(())
}

fn validate_time_fields(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<()> {
    if hour > HOUR_MAX {
        return Err(Error::out_of_range("hour", i64::from(hour), 0, i64::from(HOUR_MAX)));
    }
    if minute > MINUTE_MAX {
        return Err(Error::out_of_range(
            "minute",
            i64::from(minute),
            0,
            i64::from(MINUTE_MAX),
        ));
    }
    if second > SECOND_MAX {
        return Err(Error::out_of_range(
            "second",
            i64::from(second),
            0,
            i64::from(SECOND_MAX),
        ));
    }
    if nanosecond > NANOSECOND_MAX {
        return Err(Error::out_of_range(
            "nanosecond",
            i64::from(nanosecond),
            0,
            i64::from(NANOSECOND_MAX),
        ));
    }
    Ok(())
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date { year, month, day } => write_date(f, *year, *month, *day),
            Self::Time {
                hour,
                minute,
                second,
                nanosecond,
                zone,
            } => write_time(f, *hour, *minute, *second, *nanosecond, zone),
            Self::Timestamp {
                year,
                month,
                day,
                hour,
                minute,
                second,
                nanosecond,
                zone,
            } => {
                write_date(f, *year, *month, *day)?;
                f.write_str("/")?;
                write_time(f, *hour, *minute, *second, *nanosecond, zone)
            }
        }
    }
}

fn write_date(f: &mut fmt::Formatter<'_>, year: i32, month: u8, day: u8) -> fmt::Result {
    write!(f, "{year}-{month:02}-{day:02}")
}

fn write_time(
    f: &mut fmt::Formatter<'_>,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
    zone: &Timezone,
) -> fmt::Result {
    write!(f, "{hour:02}:{minute:02}:{second:02}")?;
    if nanosecond != 0 {
        let digits = format!("{nanosecond:09}");
        write!(f, ".{}", digits.trim_end_matches('0'))?;
    }
    write_zone_suffix(f, zone)
}

fn write_zone_suffix(f: &mut fmt::Formatter<'_>, zone: &Timezone) -> fmt::Result {
    match zone {
        Timezone::Utc => Ok(()),
        Timezone::Local => f.write_str("/Local"),
        Timezone::AreaLocation { long, .. } => write!(f, "/{long}"),
        Timezone::LatitudeLongitude {
            latitude_hundredths,
            longitude_hundredths,
        } => write!(
            f,
            "/{:.2}/{:.2}",
            f64::from(*latitude_hundredths) / 100.0,
            f64::from(*longitude_hundredths) / 100.0
        ),
        Timezone::UtcOffset { minutes } => {
            let sign = if *minutes < 0 { '-' } else { '+' };
            let magnitude = minutes.unsigned_abs();
            write!(f, "{sign}{:02}{:02}", magnitude / 60, magnitude % 60)
        }
    }
}

/// Default scratch-buffer size: the longest reasonable encoding is an 8-byte
/// head, a 5-byte year tail and a full-length area/location tail.
pub const MAX_ENCODED_SIZE: usize = timestamp::HEAD_BYTE_COUNTS[3]
    + 5
    + 1
    + zone::MAX_AREA_LOCATION_LEN;
