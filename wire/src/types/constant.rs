//! Codecs for values with a single, known encoding.

use crate::{
    util::{at_least, put},
    Decoder, Encoder, Error, Size, Sizing,
};
use bytes::{Bytes, BytesMut};

/// A codec for `()` that writes a fixed byte sequence and verifies it on decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constant {
    bytes: Bytes,
}

/// Returns a codec that always writes `bytes`, and only decodes exactly `bytes`.
pub fn constant(bytes: impl Into<Bytes>) -> Constant {
    Constant {
        bytes: bytes.into(),
    }
}

/// Returns a zero-size codec for `()`.
pub fn unit() -> Constant {
    constant(Bytes::new())
}

impl Constant {
    /// The bytes written by this codec.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

impl Sizing for Constant {
    fn size(&self) -> Size {
        Size::Fixed(self.bytes.len())
    }
}

impl Encoder<()> for Constant {
    #[inline]
    fn encode_size(&self, _: &()) -> Result<usize, Error> {
        Ok(self.bytes.len())
    }

    #[inline]
    fn write(&self, _: &(), buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        Ok(put(buf, offset, &self.bytes))
    }
}

impl Decoder for Constant {
    type Output = ();

    #[inline]
    fn read(&self, bytes: &[u8], offset: usize) -> Result<((), usize), Error> {
        let found = at_least(bytes, offset, self.bytes.len())?;
        if found != &self.bytes[..] {
            return Err(Error::InvalidConstant {
                expected: self.bytes.to_vec(),
                found: found.to_vec(),
            });
        }
        Ok(((), offset + self.bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{number::u8, tuple::tuple};

    #[test]
    fn test_constant() {
        let magic = constant(&b"WIRE"[..]);
        assert_eq!(magic.size(), Size::Fixed(4));
        let encoded = magic.encode(&()).unwrap();
        assert_eq!(&encoded[..], b"WIRE");
        assert!(magic.decode(b"WIRE").is_ok());
        assert_eq!(
            magic.decode(b"WIRF"),
            Err(Error::InvalidConstant {
                expected: b"WIRE".to_vec(),
                found: b"WIRF".to_vec(),
            })
        );
    }

    #[test]
    fn test_header() {
        let codec = tuple((constant(vec![0xCA, 0xFE]), u8()));
        let encoded = codec.encode(&((), 3u8)).unwrap();
        assert_eq!(&encoded[..], &[0xCA, 0xFE, 0x03]);
        assert_eq!(codec.decode(&encoded).unwrap(), ((), 3));
    }

    #[test]
    fn test_unit() {
        let codec = unit();
        assert_eq!(codec.size(), Size::Fixed(0));
        assert!(codec.encode(&()).unwrap().is_empty());
        assert_eq!(codec.read(&[0xAA], 1).unwrap(), ((), 1));
    }
}
