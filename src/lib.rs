//! zeitpack – compact binary date/time codec
//!
//! Implements the compact time format
//! (<https://github.com/kstenerud/compact-time>): calendar dates, wall-clock
//! times and full timestamps in a self-delimiting binary form that is a
//! fraction of the size of textual representations. Years from deep BCE to
//! far future, sub-second precision down to the nanosecond, and three
//! time-zone models (area/location name, geographic coordinate, fixed UTC
//! offset) all fit; a timestamp around the year 2000 is five bytes.
//!
//! The wire kind is the caller's context, not a stored discriminator: you
//! pick the decoder for the kind you expect.
//!
//! # Beispiel
//!
//! ```
//! use zeitpack::{decode_timestamp, Temporal, Timezone};
//!
//! // Encode
//! let ts = Temporal::timestamp(2020, 8, 30, 15, 33, 14, 19_577_323,
//!     Timezone::area_location("Asia/Singapore")?)?;
//! let bytes = ts.encode_vec();
//! assert_eq!(bytes.len(), 21);
//!
//! // Decode
//! let (decoded, consumed) = decode_timestamp(&bytes)?;
//! assert_eq!(decoded, ts);
//! assert_eq!(consumed, bytes.len());
//! # Ok::<(), zeitpack::Error>(())
//! ```
//!
//! Decoding performs no field validation beyond what the wire forces; call
//! [`Temporal::validate`] when you need in-range guarantees. The all-zero
//! wire patterns round-trip as reserved zero values.

pub mod bits;
mod convert;
pub mod date;
pub mod error;
pub mod temporal;
pub mod time;
pub mod timestamp;
pub mod uleb128;
pub mod year;
pub mod zone;

pub use error::{Error, Result};
pub use temporal::{Temporal, TemporalKind, MAX_ENCODED_SIZE};
pub use zone::Timezone;

// Public API: one decoder per wire kind.
pub use date::decode as decode_date;
pub use time::decode as decode_time;
pub use timestamp::decode as decode_timestamp;
