//! Time-zone representation and the self-delimiting zone tail codec.
//!
//! Three wire shapes share one tail, discriminated by the first byte:
//! an odd first byte starts a 4-byte latitude/longitude word; an even first
//! byte is a length prefix `len << 1`, followed by `len` ASCII bytes of an
//! area/location name, or — when `len` is zero — by a 2-byte UTC minute
//! offset. UTC itself writes no tail at all; the head's has-zone flag stays
//! cleared.
//!
//! Area/location names are folded on the wire: a recognized area prefix is
//! replaced by a single letter (`Asia/Tokyo` → `S/Tokyo`) and expanded back
//! on decode. The one-letter whole names `Z` and `L` stand for UTC and the
//! host-local zone.

use memchr::memchr;

use crate::{bits, Error, Result};

const SIZE_LATITUDE: u32 = 15;
const SIZE_LONGITUDE: u32 = 16;
const SHIFT_LENGTH: u32 = 1;
const SHIFT_LATITUDE: u32 = 1;
const SHIFT_LONGITUDE: u32 = 16;
const MASK_LAT_LONG: u8 = 1;

const BYTE_COUNT_LAT_LONG: usize = 4;
const BYTE_COUNT_UTC_OFFSET: usize = 3;

const LATITUDE_MIN: i16 = -9000;
const LATITUDE_MAX: i16 = 9000;
const LONGITUDE_MIN: i16 = -18000;
const LONGITUDE_MAX: i16 = 18000;
const UTC_OFFSET_MIN: i16 = -1439;
const UTC_OFFSET_MAX: i16 = 1439;

/// Maximum byte length of an area/location name on the wire (7-bit length).
pub const MAX_AREA_LOCATION_LEN: usize = 127;

/// Closed mapping of area prefixes to their one-letter wire forms.
const AREA_TO_LETTER: [(&str, u8); 11] = [
    ("Africa", b'F'),
    ("America", b'M'),
    ("Antarctica", b'N'),
    ("Arctic", b'R'),
    ("Asia", b'S'),
    ("Atlantic", b'T'),
    ("Australia", b'U'),
    ("Etc", b'C'),
    ("Europe", b'E'),
    ("Indian", b'I'),
    ("Pacific", b'P'),
];

/// Names the constructor surface treats as UTC.
const UTC_ALIASES: [&str; 21] = [
    "Etc/GMT",
    "Etc/GMT+0",
    "Etc/GMT-0",
    "Etc/GMT0",
    "Etc/Greenwich",
    "Etc/UCT",
    "Etc/UTC",
    "Etc/Universal",
    "Etc/Zulu",
    "Factory",
    "GMT",
    "GMT+0",
    "GMT-0",
    "GMT0",
    "Greenwich",
    "UCT",
    "UTC",
    "Universal",
    "Z",
    "Zero",
    "Zulu",
];

/// A time zone attached to a time or timestamp value.
///
/// Only the fields of the active variant exist; the wire discriminates the
/// variants through the first tail byte (UTC writes no tail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timezone {
    /// Coordinated universal time. Writes no zone tail.
    Utc,
    /// The host machine's local zone. Wire form is the area/location `L`.
    Local,
    /// An IANA-style area/location name, stored in both the folded wire form
    /// (`short`) and the expanded database-lookup form (`long`).
    AreaLocation { short: String, long: String },
    /// A geographic point, in hundredths of a degree.
    LatitudeLongitude {
        latitude_hundredths: i16,
        longitude_hundredths: i16,
    },
    /// A fixed offset from UTC in minutes. Zero normalizes to [`Timezone::Utc`].
    UtcOffset { minutes: i16 },
}

impl Timezone {
    /// Builds a zone from an area/location name.
    ///
    /// Accepts long forms (`Asia/Tokyo`), already-folded short forms
    /// (`S/Tokyo`), the local-zone names `L`/`Local`, and the UTC aliases
    /// (which all collapse to [`Timezone::Utc`]). Unrecognized areas pass
    /// through verbatim.
    pub fn area_location(name: &str) -> Result<Self> {
        if !name.is_ascii() {
            return Err(Error::field("area/location name", "must be ASCII"));
        }
        if name.is_empty() || UTC_ALIASES.contains(&name) {
            return Ok(Self::Utc);
        }
        if name == "L" || name == "Local" {
            return Ok(Self::Local);
        }
        let (short, long) = split_area_location(name);
        if short.len() > MAX_AREA_LOCATION_LEN {
            return Err(Error::out_of_range(
                "area/location name length",
                short.len() as i64,
                1,
                MAX_AREA_LOCATION_LEN as i64,
            ));
        }
        Ok(Self::AreaLocation { short, long })
    }

    /// Builds a geographic zone from coordinates in hundredths of a degree.
    pub fn lat_long(latitude_hundredths: i16, longitude_hundredths: i16) -> Result<Self> {
        let zone = Self::LatitudeLongitude {
            latitude_hundredths,
            longitude_hundredths,
        };
        zone.validate()?;
        Ok(zone)
    }

    /// Builds a fixed-offset zone. An offset of zero is UTC.
    pub fn utc_offset(minutes: i16) -> Result<Self> {
        if minutes == 0 {
            return Ok(Self::Utc);
        }
        let zone = Self::UtcOffset { minutes };
        zone.validate()?;
        Ok(zone)
    }

    /// True for the UTC variant.
    #[inline]
    pub fn is_utc(&self) -> bool {
        matches!(self, Self::Utc)
    }

    /// Checks the fields of the active variant against their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Utc | Self::Local => Ok(()),
            Self::AreaLocation { short, .. } => {
                if short.is_empty() || short.len() > MAX_AREA_LOCATION_LEN {
                    return Err(Error::out_of_range(
                        "area/location name length",
                        short.len() as i64,
                        1,
                        MAX_AREA_LOCATION_LEN as i64,
                    ));
                }
                if !short.is_ascii() {
                    return Err(Error::field("area/location name", "must be ASCII"));
                }
                Ok(())
            }
            Self::LatitudeLongitude {
                latitude_hundredths,
                longitude_hundredths,
            } => {
                if !(LATITUDE_MIN..=LATITUDE_MAX).contains(latitude_hundredths) {
                    return Err(Error::out_of_range(
                        "latitude",
                        i64::from(*latitude_hundredths),
                        i64::from(LATITUDE_MIN),
                        i64::from(LATITUDE_MAX),
                    ));
                }
                if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(longitude_hundredths) {
                    return Err(Error::out_of_range(
                        "longitude",
                        i64::from(*longitude_hundredths),
                        i64::from(LONGITUDE_MIN),
                        i64::from(LONGITUDE_MAX),
                    ));
                }
                Ok(())
            }
            Self::UtcOffset { minutes } => {
                if !(UTC_OFFSET_MIN..=UTC_OFFSET_MAX).contains(minutes) {
                    return Err(Error::out_of_range(
                        "utc offset",
                        i64::from(*minutes),
                        i64::from(UTC_OFFSET_MIN),
                        i64::from(UTC_OFFSET_MAX),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Splits a name into its folded wire form and its expanded lookup form.
fn split_area_location(name: &str) -> (String, String) {
    match memchr(b'/', name.as_bytes()) {
        Some(index) if index >= 1 => {
            let (area, rest) = name.split_at(index);
            if area.len() == 1 {
                // Bereits gefaltete Kurzform: Buchstabe expandieren.
                if let Some(full) = area_for_letter(area.as_bytes()[0]) {
                    return (name.to_owned(), format!("{full}{rest}"));
                }
            } else if let Some(letter) = letter_for_area(area) {
                return (format!("{}{rest}", letter as char), name.to_owned());
            }
            (name.to_owned(), name.to_owned())
        }
        _ => (name.to_owned(), name.to_owned()),
    }
}

fn letter_for_area(area: &str) -> Option<u8> {
    AREA_TO_LETTER
        .iter()
        .find(|(name, _)| *name == area)
        .map(|&(_, letter)| letter)
}

fn area_for_letter(letter: u8) -> Option<&'static str> {
    AREA_TO_LETTER
        .iter()
        .find(|&&(_, l)| l == letter)
        .map(|&(name, _)| name)
}

/// Number of tail bytes [`encode`] writes for `zone`.
pub fn encoded_size(zone: &Timezone) -> usize {
    match zone {
        Timezone::Utc => 0,
        Timezone::Local => 2,
        Timezone::AreaLocation { short, .. } => 1 + short.len(),
        Timezone::LatitudeLongitude { .. } => BYTE_COUNT_LAT_LONG,
        Timezone::UtcOffset { .. } => BYTE_COUNT_UTC_OFFSET,
    }
}

/// Writes the zone tail. The caller must have reserved [`encoded_size`] bytes.
///
/// Returns the number of bytes written (zero for UTC).
pub fn encode(zone: &Timezone, buf: &mut [u8]) -> usize {
    debug_assert!(buf.len() >= encoded_size(zone));
    match zone {
        Timezone::Utc => 0,
        Timezone::Local => {
            buf[0] = 1 << SHIFT_LENGTH;
            buf[1] = b'L';
            2
        }
        Timezone::AreaLocation { short, .. } => {
            buf[0] = (short.len() << SHIFT_LENGTH) as u8;
            buf[1..=short.len()].copy_from_slice(short.as_bytes());
            1 + short.len()
        }
        Timezone::LatitudeLongitude {
            latitude_hundredths,
            longitude_hundredths,
        } => {
            let lat = u32::from(*latitude_hundredths as u16) & bits::bit_mask(SIZE_LATITUDE) as u32;
            let long =
                u32::from(*longitude_hundredths as u16) & bits::bit_mask(SIZE_LONGITUDE) as u32;
            let word = (long << SHIFT_LONGITUDE) | (lat << SHIFT_LATITUDE) | u32::from(MASK_LAT_LONG);
            bits::encode32_le(word, buf);
            BYTE_COUNT_LAT_LONG
        }
        Timezone::UtcOffset { minutes } => {
            buf[0] = 0;
            bits::encode16_le(*minutes as u16, &mut buf[1..3]);
            BYTE_COUNT_UTC_OFFSET
        }
    }
}

/// Decodes a zone tail from the start of `src`.
///
/// Returns the zone and the number of bytes consumed. Out-of-range payloads
/// (latitude, longitude, minute offsets) are rejected here because a
/// mis-ranged coordinate cannot be told apart from corruption later.
pub fn decode(src: &[u8]) -> Result<(Timezone, usize)> {
    let Some(&first) = src.first() else {
        return Err(Error::incomplete(1));
    };

    if first & MASK_LAT_LONG != 0 {
        if src.len() < BYTE_COUNT_LAT_LONG {
            return Err(Error::incomplete(BYTE_COUNT_LAT_LONG));
        }
        let word = bits::decode32_le(src);
        let longitude_hundredths = ((word as i32) >> SHIFT_LONGITUDE) as i16;
        // Latitude: 15-bit two's complement in bits 1..=15, sign-extended by
        // shifting it to the top of the word first.
        let latitude_hundredths = (((word << 16) as i32) >> 17) as i16;
        let zone = Timezone::LatitudeLongitude {
            latitude_hundredths,
            longitude_hundredths,
        };
        zone.validate()?;
        return Ok((zone, BYTE_COUNT_LAT_LONG));
    }

    let length = usize::from(first >> SHIFT_LENGTH);
    if length == 0 {
        // Length zero introduces the fixed minute offset from UTC.
        if src.len() < BYTE_COUNT_UTC_OFFSET {
            return Err(Error::incomplete(BYTE_COUNT_UTC_OFFSET));
        }
        let raw = bits::decode16_le(&src[1..3]);
        let minutes = if raw & 0x0800 != 0 {
            (raw | 0xF000) as i16
        } else {
            (raw & 0x0FFF) as i16
        };
        if minutes as u16 != raw {
            log::warn!("utc offset decode: ignoring bits above the 12-bit field in {raw:#06x}");
        }
        let zone = Timezone::utc_offset(minutes)?;
        return Ok((zone, BYTE_COUNT_UTC_OFFSET));
    }

    if src.len() < 1 + length {
        return Err(Error::incomplete(1 + length));
    }
    let name = &src[1..=length];
    if length == 1 {
        match name[0] {
            b'L' => return Ok((Timezone::Local, 2)),
            b'Z' => return Ok((Timezone::Utc, 2)),
            _ => {}
        }
    }
    let short = std::str::from_utf8(name)
        .ok()
        .filter(|s| s.is_ascii())
        .ok_or_else(|| Error::field("area/location name", "must be ASCII"))?;
    let long = expand_area_location(short);
    Ok((
        Timezone::AreaLocation {
            short: short.to_owned(),
            long,
        },
        1 + length,
    ))
}

/// Expands a folded wire name back to its lookup form.
fn expand_area_location(short: &str) -> String {
    let bytes = short.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b'/' {
        if let Some(area) = area_for_letter(bytes[0]) {
            return format!("{area}{}", &short[1..]);
        }
    }
    short.to_owned()
}
