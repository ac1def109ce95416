//! Codec that frames another codec's encoding with its byte length.
//!
//! A [SizePrefixed] codec writes the exact byte length of the inner encoding before it. Decoding
//! bounds the inner codec to that many bytes, so a reader can always skip the payload, and the
//! inner codec must consume the bounded slice exactly.

use crate::{
    types::number::Number, util::at_least, Decoder, Encoder, Error, Limit, Prefix, Size, Sizing,
};
use bytes::BytesMut;
use tracing::debug;

/// A codec for values encoded with `C`, preceded by their byte length encoded with `P`.
#[derive(Clone, Debug)]
pub struct SizePrefixed<C, P = Number<u32>> {
    inner: C,
    prefix: P,
    limit: Limit,
}

/// Returns a codec that frames `inner` with a byte length encoded with `prefix`.
pub fn size_prefixed<C: Sizing, P: Prefix>(inner: C, prefix: P) -> SizePrefixed<C, P> {
    SizePrefixed {
        inner,
        prefix,
        limit: Limit::default(),
    }
}

impl<C: Sizing, P: Prefix> SizePrefixed<C, P> {
    /// Returns a copy of this codec that rejects decoded byte lengths outside `limit`.
    pub fn with_limit(self, limit: impl Into<Limit>) -> Self {
        Self {
            limit: limit.into(),
            ..self
        }
    }

    /// The wrapped codec.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Sizing, P: Prefix> Sizing for SizePrefixed<C, P> {
    fn size(&self) -> Size {
        self.prefix.size() + self.inner.size()
    }
}

impl<T: ?Sized, C: Encoder<T>, P: Prefix> Encoder<T> for SizePrefixed<C, P> {
    fn encode_size(&self, value: &T) -> Result<usize, Error> {
        let len = self.inner.encode_size(value)?;
        Ok(self.prefix.encode_size(&len)? + len)
    }

    fn write(&self, value: &T, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        let len = self.inner.encode_size(value)?;
        let start = self.prefix.write(&len, buf, offset)?;
        let end = self.inner.write(value, buf, start)?;
        assert_eq!(end - start, len, "write() did not write expected bytes");
        Ok(end)
    }
}

impl<C: Decoder, P: Prefix> Decoder for SizePrefixed<C, P> {
    type Output = C::Output;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(C::Output, usize), Error> {
        let (len, start) = self.prefix.read_usize(bytes, offset)?;
        self.limit.check(len)?;
        let payload = at_least(bytes, start, len)?;

        // Offsets within the bounded slice are relative to its start.
        let (value, consumed) = self.inner.read(payload, 0)?;
        if consumed != len {
            debug!(offset, expected = len, consumed, "size prefix mismatch");
            return Err(Error::LengthMismatch {
                expected: len,
                found: consumed,
            });
        }
        Ok((value, start + len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        types::{
            array::array,
            number::{u16, u32, u8},
            string::utf8,
        },
        varint::short_u16,
        Length,
    };

    #[test]
    fn test_size_prefixed() {
        let codec = size_prefixed(utf8(Length::remainder()), u16());
        assert_eq!(codec.size(), Size::Variable);

        let encoded = codec.encode("abc").unwrap();
        assert_eq!(&encoded[..], &[0x03, 0x00, b'a', b'b', b'c']);
        assert_eq!(codec.decode(&encoded).unwrap(), "abc");
    }

    #[test]
    fn test_bounded_inner() {
        // The remainder string stops at the framed length, not at the end of the input.
        let codec = array(size_prefixed(utf8(Length::remainder()), u8()), Length::remainder());
        let value = vec!["ab".to_string(), String::new(), "c".to_string()];
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(&encoded[..], &[2, b'a', b'b', 0, 1, b'c']);
        assert_eq!(codec.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_fixed_size() {
        let codec = size_prefixed(u32(), u8());
        assert_eq!(codec.size(), Size::Fixed(5));
        assert_eq!(&codec.encode(&1u32).unwrap()[..], &[4, 1, 0, 0, 0]);
    }

    #[test]
    fn test_inner_underconsumes() {
        let codec = size_prefixed(u16(), u8());
        assert_eq!(
            codec.read(&[3, 1, 0, 0], 0),
            Err(Error::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_inner_overreads() {
        let codec = size_prefixed(u32(), short_u16());
        assert_eq!(
            codec.decode(&[2, 1, 0, 0, 0]),
            Err(Error::UnexpectedEndOfInput {
                expected: 4,
                offset: 0,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_limit() {
        let codec = size_prefixed(utf8(Length::remainder()), u8()).with_limit(..=2usize);
        assert_eq!(codec.decode(&[3, b'a', b'b', b'c']), Err(Error::InvalidLength(3)));
    }
}
