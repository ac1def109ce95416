//! Codecs for text.
//!
//! A [Str] pairs an [Encoding] with a [Length] strategy:
//! - [Length::Fixed]: the encoded bytes are padded to exactly `n` bytes (values longer than `n`
//!   fail with [Error::LengthExceeded]). Trailing pad bytes are stripped before the bytes are
//!   interpreted as text, for every encoding. A value whose own bytes end with the pad byte
//!   therefore decodes shorter; [Str::keep_padding] returns the whole slot instead.
//! - [Length::Prefixed]: a numeric prefix records the byte length of the encoded text.
//! - [Length::Remainder]: no framing at all. Decoding consumes the rest of the slice, so this is
//!   only meaningful as the last element of a decoding context.

use crate::{
    types::text::{Base16, Base58, Base64, Encoding, Utf8},
    Decoder, Encoder, Error, Length, Limit, Prefix, Size, Sizing,
};
use bytes::BytesMut;

/// A codec for strings.
#[derive(Clone, Debug)]
pub struct Str<E, P> {
    encoding: E,
    length: Length<P>,
    pad: u8,
    strip: bool,
    limit: Limit,
}

impl<E: Encoding, P: Prefix> Str<E, P> {
    /// Creates a string codec with the given encoding and length strategy.
    pub fn new(encoding: E, length: Length<P>) -> Self {
        Self {
            encoding,
            length,
            pad: 0,
            strip: true,
            limit: Limit::default(),
        }
    }

    /// Returns a copy of this codec that pads fixed-length values with `pad` instead of zero.
    pub fn with_padding(self, pad: u8) -> Self {
        Self { pad, ..self }
    }

    /// Returns a copy of this codec that decodes the whole fixed-length slot, padding included.
    pub fn keep_padding(self) -> Self {
        Self {
            strip: false,
            ..self
        }
    }

    /// Returns a copy of this codec that rejects decoded length prefixes outside `limit`.
    pub fn with_limit(self, limit: impl Into<Limit>) -> Self {
        Self {
            limit: limit.into(),
            ..self
        }
    }

    fn encode_text_size(&self, text: &str) -> Result<usize, Error> {
        if let Size::Fixed(len) = self.length.bytes_size() {
            return Ok(len);
        }
        let bytes = self.encoding.to_bytes(text)?;
        self.length.bytes_encode_size(bytes.len())
    }

    fn write_text(&self, text: &str, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        let bytes = self.encoding.to_bytes(text)?;
        self.length.write_bytes(&bytes, self.pad, buf, offset)
    }
}

/// Returns a UTF-8 string codec with the given length strategy.
pub fn utf8<P: Prefix>(length: Length<P>) -> Str<Utf8, P> {
    Str::new(Utf8, length)
}

/// Returns a hexadecimal string codec with the given length strategy.
pub fn base16<P: Prefix>(length: Length<P>) -> Str<Base16, P> {
    Str::new(Base16, length)
}

/// Returns a base58 string codec with the given length strategy.
pub fn base58<P: Prefix>(length: Length<P>) -> Str<Base58, P> {
    Str::new(Base58, length)
}

/// Returns a base64 string codec with the given length strategy.
pub fn base64<P: Prefix>(length: Length<P>) -> Str<Base64, P> {
    Str::new(Base64, length)
}

impl<E: Encoding, P: Prefix> Sizing for Str<E, P> {
    fn size(&self) -> Size {
        self.length.bytes_size()
    }
}

impl<E: Encoding, P: Prefix> Encoder<str> for Str<E, P> {
    fn encode_size(&self, value: &str) -> Result<usize, Error> {
        self.encode_text_size(value)
    }

    fn write(&self, value: &str, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        self.write_text(value, buf, offset)
    }
}

impl<E: Encoding, P: Prefix> Encoder<String> for Str<E, P> {
    fn encode_size(&self, value: &String) -> Result<usize, Error> {
        self.encode_text_size(value)
    }

    fn write(&self, value: &String, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        self.write_text(value, buf, offset)
    }
}

impl<E: Encoding, P: Prefix> Decoder for Str<E, P> {
    type Output = String;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(String, usize), Error> {
        let (mut payload, end) = self.length.read_bytes(bytes, offset, &self.limit)?;
        if self.strip && matches!(self.length, Length::Fixed(_)) {
            while let [rest @ .., last] = payload {
                if *last != self.pad {
                    break;
                }
                payload = rest;
            }
        }
        Ok((self.encoding.to_text(payload)?, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::number::{u32, u8};

    #[test]
    fn test_prefixed_utf8() {
        let codec = utf8(Length::prefixed());
        assert_eq!(codec.size(), Size::Variable);
        let encoded = codec.encode("hello").unwrap();
        assert_eq!(&encoded[..], b"\x05\x00\x00\x00hello");
        assert_eq!(codec.decode(&encoded).unwrap(), "hello");
        assert_eq!(codec.encode_size(&String::from("héllo")).unwrap(), 4 + 6);
    }

    #[test]
    fn test_fixed_utf8() {
        let codec = utf8(Length::fixed(5));
        assert_eq!(codec.size(), Size::Fixed(5));

        let encoded = codec.encode("bob").unwrap();
        assert_eq!(&encoded[..], b"bob\0\0");
        assert_eq!(codec.decode(&encoded).unwrap(), "bob");

        let encoded = codec.encode("alice").unwrap();
        assert_eq!(&encoded[..], b"alice");
        assert_eq!(codec.decode(&encoded).unwrap(), "alice");

        assert_eq!(
            codec.encode("mallory"),
            Err(Error::LengthExceeded { found: 7, max: 5 })
        );
    }

    #[test]
    fn test_custom_padding() {
        let codec = utf8(Length::fixed(4)).with_padding(b' ');
        let encoded = codec.encode("ab").unwrap();
        assert_eq!(&encoded[..], b"ab  ");
        assert_eq!(codec.decode(&encoded).unwrap(), "ab");
        // Zero bytes are content, not padding, for this codec.
        assert_eq!(codec.decode(b"ab\0 ").unwrap(), "ab\0");
    }

    #[test]
    fn test_remainder_utf8() {
        let codec = utf8(Length::remainder());
        let encoded = codec.encode("rest").unwrap();
        assert_eq!(&encoded[..], b"rest");
        assert_eq!(codec.read(b"xxrest", 2).unwrap(), ("rest".to_string(), 6));
    }

    #[test]
    fn test_fixed_binary_text() {
        let codec = base58(Length::fixed(3));
        let encoded = codec.encode("2g").unwrap();
        assert_eq!(&encoded[..], &[0x61, 0x00, 0x00]);
        assert_eq!(codec.decode(&encoded).unwrap(), "2g");

        let codec = base16(Length::fixed(4));
        let encoded = codec.encode("abcd").unwrap();
        assert_eq!(&encoded[..], &[0xAB, 0xCD, 0x00, 0x00]);
        assert_eq!(codec.decode(&encoded).unwrap(), "abcd");

        let codec = base64(Length::fixed(8));
        let encoded = codec.encode("aGk=").unwrap();
        assert_eq!(&encoded[..], b"hi\0\0\0\0\0\0");
        assert_eq!(codec.decode(&encoded).unwrap(), "aGk=");
    }

    #[test]
    fn test_keep_padding() {
        let codec = base58(Length::fixed(3)).keep_padding();
        let encoded = codec.encode("2g").unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), "ZaiK");

        let codec = utf8(Length::fixed(4)).keep_padding();
        assert_eq!(codec.decode(b"ab\0\0").unwrap(), "ab\0\0");
    }

    #[test]
    fn test_base16_prefixed() {
        let codec = base16(Length::Prefixed(u8()));
        let encoded = codec.encode("deadbeef").unwrap();
        assert_eq!(&encoded[..], &[0x04, 0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(codec.decode(&encoded).unwrap(), "deadbeef");
        assert!(matches!(
            codec.encode("xyz0"),
            Err(Error::InvalidEncodedText { .. })
        ));
    }

    #[test]
    fn test_base64_prefixed() {
        let codec = base64(Length::Prefixed(u32()));
        let encoded = codec.encode("aGVsbG8=").unwrap();
        assert_eq!(&encoded[..], b"\x05\x00\x00\x00hello");
        assert_eq!(codec.decode(&encoded).unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_invalid_utf8() {
        let codec = utf8(Length::Prefixed(u8()));
        assert!(matches!(
            codec.decode(&[0x02, 0xC3, 0x28]),
            Err(Error::InvalidEncodedText { encoding: "utf8", .. })
        ));
    }

    #[test]
    fn test_prefix_truncated() {
        let codec = utf8(Length::Prefixed(u8()));
        assert_eq!(
            codec.decode(&[0x05, b'a', b'b']),
            Err(Error::UnexpectedEndOfInput {
                expected: 5,
                offset: 1,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_limit() {
        let codec = utf8(Length::Prefixed(u8())).with_limit(..=3usize);
        assert_eq!(codec.decode(b"\x03abc").unwrap(), "abc");
        assert_eq!(codec.decode(b"\x04abcd"), Err(Error::InvalidLength(4)));
    }
}
