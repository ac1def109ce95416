//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations.
///
/// Every error aborts the whole encode or decode call that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of input: needed {expected} bytes at offset {offset}, {remaining} remaining")]
    UnexpectedEndOfInput {
        expected: usize,
        offset: usize,
        remaining: usize,
    },
    #[error("{codec} out of range: {value} not in [{min}, {max}]")]
    NumberOutOfRange {
        codec: &'static str,
        value: String,
        min: String,
        max: String,
    },
    #[error("invalid discriminant: {0}")]
    InvalidDiscriminant(usize),
    #[error("value matches no declared variant")]
    UnmatchedVariant,
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("misaligned remainder: {remaining} bytes is not a multiple of {item_size}")]
    MisalignedRemainder { remaining: usize, item_size: usize },
    #[error("invalid {encoding} text: {message}")]
    InvalidEncodedText {
        encoding: &'static str,
        message: String,
    },
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("length exceeded: {found} > {max}")]
    LengthExceeded { found: usize, max: usize },
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("invalid varint")]
    InvalidVarint,
    #[error("invalid bool")]
    InvalidBool,
    #[error("invalid constant: expected {expected:02x?}, found {found:02x?}")]
    InvalidConstant { expected: Vec<u8>, found: Vec<u8> },
}

impl Error {
    /// Builds a [Error::NumberOutOfRange] for `value` rejected by a codec of the named width.
    pub(crate) fn out_of_range(
        codec: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::NumberOutOfRange {
            codec,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}
