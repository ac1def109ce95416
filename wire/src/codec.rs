//! Core codec traits and the byte-size model

use crate::error::Error;
use bytes::BytesMut;
use std::{fmt::Display, ops::Add};

/// The size category of a codec.
///
/// Every encoder and decoder carries exactly one of these tags. Combinators compute their own tag
/// from their children: a combinator built only from [Size::Fixed] children is itself fixed,
/// while any [Size::Variable] child makes the parent variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Size {
    /// The encoded length is a constant, independent of the value.
    Fixed(usize),
    /// The encoded length depends on the value and must be computed from it.
    Variable,
}

impl Size {
    /// Returns the constant length of a fixed-size codec.
    pub fn fixed(self) -> Option<usize> {
        match self {
            Self::Fixed(len) => Some(len),
            Self::Variable => None,
        }
    }

    /// Returns true if the encoded length is value-independent.
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        match (self, rhs) {
            (Self::Fixed(a), Self::Fixed(b)) => Self::Fixed(a + b),
            _ => Self::Variable,
        }
    }
}

/// Trait shared by all encoders and decoders to report their size category.
pub trait Sizing {
    /// The size category of this codec.
    fn size(&self) -> Size;
}

/// Trait for values that can encode a `T` into bytes.
///
/// Encoders are immutable after construction and may be shared by any number of callers.
pub trait Encoder<T: ?Sized>: Sizing {
    /// Returns the number of bytes `write()` will produce for `value`.
    ///
    /// Fixed-size encoders return their constant without inspecting the value.
    fn encode_size(&self, value: &T) -> Result<usize, Error>;

    /// Writes `value` into `buf` starting at `offset`, returning the offset just past the written
    /// bytes.
    ///
    /// The buffer is grown (zero-filled) when it is too short to hold the encoding.
    fn write(&self, value: &T, buf: &mut BytesMut, offset: usize) -> Result<usize, Error>;

    /// Encodes a value to a new `BytesMut` buffer of exactly `encode_size()` bytes.
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    ///
    /// (Provided method).
    fn encode(&self, value: &T) -> Result<BytesMut, Error> {
        let len = self.encode_size(value)?;
        let mut buf = BytesMut::zeroed(len);
        let end = self.write(value, &mut buf, 0)?;
        assert_eq!(end, len, "write() did not write expected bytes");
        Ok(buf)
    }
}

/// Trait for values that can decode bytes into [Decoder::Output].
pub trait Decoder: Sizing {
    /// The decoded type.
    type Output;

    /// Reads a value from `bytes` starting at `offset`, returning it together with the offset
    /// just past the consumed bytes.
    ///
    /// Never reads past the end of `bytes`.
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error>;

    /// Decodes a value from `bytes`, ensuring all of them are consumed.
    ///
    /// For fixed-size decoders, this method first checks that `bytes` has the expected length.
    ///
    /// (Provided method).
    fn decode(&self, bytes: &[u8]) -> Result<Self::Output, Error> {
        if let Size::Fixed(len) = self.size() {
            if bytes.len() < len {
                return Err(Error::UnexpectedEndOfInput {
                    expected: len,
                    offset: 0,
                    remaining: bytes.len(),
                });
            }
            if bytes.len() > len {
                return Err(Error::ExtraData(bytes.len() - len));
            }
        }

        let (value, end) = self.read(bytes, 0)?;
        if end < bytes.len() {
            return Err(Error::ExtraData(bytes.len() - end));
        }
        Ok(value)
    }
}

/// Trait for logically inverse encoder/decoder pairs.
///
/// `U` (the decoded type) defaults to `T` (the encoded type). For every value `x` accepted by the
/// encoder, `decode(encode(x)) == x` holds. The converse (`encode(decode(bytes)) == bytes`) is not
/// implied.
pub trait Codec<T: ?Sized, U = T>: Encoder<T> + Decoder<Output = U> {}

// Automatically implement `Codec` for types that implement `Encoder` and `Decoder`.
impl<T: ?Sized, U, C: Encoder<T> + Decoder<Output = U>> Codec<T, U> for C {}

/// Numeric codecs usable for lengths, element counts and discriminants.
///
/// Implemented for every codec that encodes a `usize` and decodes an integer convertible back into
/// one.
pub trait Prefix: Encoder<usize> + Decoder {
    /// Reads a value and converts it into a `usize`.
    fn read_usize(&self, bytes: &[u8], offset: usize) -> Result<(usize, usize), Error>;
}

impl<P> Prefix for P
where
    P: Encoder<usize> + Decoder,
    P::Output: TryInto<usize> + Display + Copy,
{
    fn read_usize(&self, bytes: &[u8], offset: usize) -> Result<(usize, usize), Error> {
        let (value, end) = self.read(bytes, offset)?;
        let len = value
            .try_into()
            .map_err(|_| Error::out_of_range("usize", value, usize::MIN, usize::MAX))?;
        Ok((len, end))
    }
}
