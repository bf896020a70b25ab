//! This module aggregates errors that may emerge from the core library.
use crate::header::Tag;
use crate::value::ValueType;
use snafu::Snafu;

/// Type alias for a result from this library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main data type for errors in the core library.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Raised when the obtained data element tag was not the one expected
    /// in the current reading position.
    #[snafu(display("unexpected DICOM tag {tag}"))]
    UnexpectedTag {
        /// the tag that was found
        tag: Tag,
    },

    /// Raised when the obtained length is inconsistent with the rest of
    /// the element (e.g. an item delimiter carrying a non-zero length).
    #[snafu(display("inconsistent data value length in data element"))]
    UnexpectedDataValueLength,

    /// Error related to an invalid value read.
    #[snafu(display("invalid value read: {source}"))]
    ReadValue {
        /// the underlying cause
        source: InvalidValueReadError,
    },

    /// A failed attempt to cast a value to an inappropriate format.
    #[snafu(display("failed value cast: {source}"))]
    CastValue {
        /// the underlying cause
        source: CastValueError,
    },

    /// A failed attempt to convert a value to an inappropriate format.
    #[snafu(display("failed value conversion: {source}"))]
    ConvertValue {
        /// the underlying cause
        source: ConvertValueError,
    },
}

impl From<InvalidValueReadError> for Error {
    fn from(source: InvalidValueReadError) -> Self {
        Error::ReadValue { source }
    }
}

impl From<CastValueError> for Error {
    fn from(source: CastValueError) -> Self {
        Error::CastValue { source }
    }
}

impl From<ConvertValueError> for Error {
    fn from(source: ConvertValueError) -> Self {
        Error::ConvertValue { source }
    }
}

/// Triggered when a value parsing attempt fails.
#[derive(Debug, Snafu, PartialEq, Clone)]
#[non_exhaustive]
pub enum InvalidValueReadError {
    /// attempted to retrieve a complex value as a primitive
    NonPrimitiveType,

    /// the value's effective length could not be resolved
    UnresolvedValueLength,

    /// invalid token received for the expected value representation
    #[snafu(display("invalid token: expected {expected} but got {got:?}"))]
    InvalidToken {
        /// the byte that was found
        got: u8,
        /// a description of what was expected instead
        expected: &'static str,
    },

    /// invalid slice length for the expected value representation
    #[snafu(display("invalid length: expected {expected} but got {got}"))]
    InvalidLength {
        /// the length that was found
        got: usize,
        /// a description of what was expected instead
        expected: &'static str,
    },

    /// invalid date/time component
    #[snafu(display("invalid date/time component: expected {expected} but got {got}"))]
    ParseDateTime {
        /// the value that was found
        got: u32,
        /// a description of what was expected instead
        expected: &'static str,
    },

    /// invalid or ambiguous combination of date with time
    DateTimeZone,

    /// failed to parse text value as a floating point number
    ParseFloat,

    /// failed to parse text value as an integer
    ParseInteger,

    /// unexpected end of element while reading a value
    UnexpectedEndOfElement,
}

/// An error type for an attempt to access a value in an inappropriate
/// format.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(display("bad value cast: requested {requested} but value is {got:?}"))]
pub struct CastValueError {
    /// the value format requested
    pub requested: &'static str,
    /// the value's actual representation
    pub got: ValueType,
}

/// An error type for an attempt to convert a value to an unsupported
/// target representation.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(display("could not convert value of type {original:?} to {requested}"))]
pub struct ConvertValueError {
    /// the value format requested
    pub requested: &'static str,
    /// the value's original representation
    pub original: ValueType,
    /// an optional cause of the conversion failure
    pub cause: Option<InvalidValueReadError>,
}
