//! Central error types for the compact time codec.
//!
//! Decoding errors distinguish between a buffer that is merely too short
//! ([`Error::Incomplete`], retry with more data) and data that can never
//! decode ([`Error::InvalidEncoding`], [`Error::Overflow`]).

use core::fmt;
use std::borrow::Cow;

/// All error conditions reported by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The source buffer ended before the value was complete.
    ///
    /// `attempted` is the number of bytes the decoder tried to access within
    /// the slice it was handed. Callers may retry with a longer buffer.
    Incomplete {
        attempted: usize,
    },
    /// The reserved bit pattern of a time head does not match the pattern
    /// required by its magnitude. The data is corrupt.
    InvalidEncoding {
        expected: u64,
        actual: u64,
    },
    /// A field is outside its allowed range.
    ///
    /// Raised by the checked constructors and by `validate()`, and during
    /// decoding of time-zone payloads (latitude, longitude, minute offsets).
    InvalidField {
        field: &'static str,
        message: Cow<'static, str>,
    },
    /// The encoded year does not fit in 32 bits.
    Overflow,
    /// The time zone variant cannot be expressed by the requested host
    /// date-time type (chrono has no latitude/longitude zones).
    UnsupportedZone(&'static str),
    /// The destination buffer is smaller than `encoded_size()`.
    BufferTooSmall {
        required: usize,
        available: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete { attempted } => {
                write!(f, "incomplete value: decoder attempted to read {attempted} bytes")
            }
            Self::InvalidEncoding { expected, actual } => {
                write!(f, "expected reserved bits {expected:b} but got {actual:b}")
            }
            Self::InvalidField { field, message } => write!(f, "invalid {field}: {message}"),
            Self::Overflow => write!(f, "encoded year does not fit in 32 bits"),
            Self::UnsupportedZone(kind) => {
                write!(f, "{kind} time zones are not supported by the host date-time type")
            }
            Self::BufferTooSmall { required, available } => {
                write!(f, "require {required} bytes to encode, but only {available} bytes available")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Erstellt einen `Incomplete` Fehler mit der Anzahl angeforderter Bytes.
    #[inline]
    pub(crate) fn incomplete(attempted: usize) -> Self {
        Self::Incomplete { attempted }
    }

    /// Erstellt einen `InvalidField` Fehler mit freiem Text.
    pub(crate) fn field(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Erstellt einen `InvalidField` Fehler für einen Wert außerhalb [min, max].
    pub(crate) fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::InvalidField {
            field,
            message: format!("{value} is out of range (must be {min} to {max})").into(),
        }
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
