//! Compact variable-length `u16` encoding.
//!
//! Each byte uses:
//! - 7 bits for the value (least significant group first)
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! A `u16` therefore takes between one and three bytes. Only the shortest encoding of a value is
//! accepted on decode, so every value has exactly one byte representation. The codec is commonly
//! used as a compact length prefix (see [crate::Length::Prefixed]).

use crate::{util::reserve, Decoder, Encoder, Error, Size, Sizing};
use bytes::BytesMut;

const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;
const MAX_BYTES: usize = 3;

/// A codec for `u16` values in compact variable-length form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShortU16;

/// Returns a compact variable-length `u16` codec.
pub fn short_u16() -> ShortU16 {
    ShortU16
}

/// Calculates the number of bytes needed to encode `value`.
pub fn size(value: u16) -> usize {
    let data_bits = 16 - value.leading_zeros() as usize;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

impl ShortU16 {
    fn put(value: u16, buf: &mut BytesMut, offset: usize) -> usize {
        let len = size(value);
        let dst = reserve(buf, offset, len);
        let mut val = value;
        for (i, byte) in dst.iter_mut().enumerate() {
            *byte = (val as u8) & DATA_BITS_MASK;
            val >>= DATA_BITS_PER_BYTE;
            if i + 1 < len {
                *byte |= CONTINUATION_BIT_MASK;
            }
        }
        offset + len
    }
}

impl Sizing for ShortU16 {
    fn size(&self) -> Size {
        Size::Variable
    }
}

macro_rules! impl_short_u16_encoder {
    ($($input:ty),*) => {
        $(
            impl Encoder<$input> for ShortU16 {
                #[inline]
                fn encode_size(&self, value: &$input) -> Result<usize, Error> {
                    Ok(size(narrow(*value)?))
                }

                #[inline]
                fn write(
                    &self,
                    value: &$input,
                    buf: &mut BytesMut,
                    offset: usize,
                ) -> Result<usize, Error> {
                    Ok(Self::put(narrow(*value)?, buf, offset))
                }
            }
        )*
    };
}

impl_short_u16_encoder!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Converts any integer into a `u16`, failing if it does not fit.
fn narrow<T>(value: T) -> Result<u16, Error>
where
    T: TryInto<u16> + ToString + Copy,
{
    value
        .try_into()
        .map_err(|_| Error::out_of_range("short_u16", value, u16::MIN, u16::MAX))
}

impl Decoder for ShortU16 {
    type Output = u16;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(u16, usize), Error> {
        let mut result: u32 = 0;
        for i in 0..MAX_BYTES {
            let Some(&byte) = bytes.get(offset + i) else {
                return Err(Error::UnexpectedEndOfInput {
                    expected: i + 1,
                    offset,
                    remaining: bytes.len().saturating_sub(offset),
                });
            };
            result |= u32::from(byte & DATA_BITS_MASK) << (i * DATA_BITS_PER_BYTE);

            if byte & CONTINUATION_BIT_MASK == 0 {
                // A trailing zero group means a shorter encoding exists.
                if byte == 0 && i > 0 {
                    return Err(Error::InvalidVarint);
                }
                let value = u16::try_from(result).map_err(|_| Error::InvalidVarint)?;
                return Ok((value, offset + i + 1));
            }
        }

        // The continuation bit was set on the last possible byte.
        Err(Error::InvalidVarint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, &[0x00]; "zero")]
    #[test_case(0x7F, &[0x7F]; "max one byte")]
    #[test_case(0x80, &[0x80, 0x01]; "min two bytes")]
    #[test_case(0x3FFF, &[0xFF, 0x7F]; "max two bytes")]
    #[test_case(0x4000, &[0x80, 0x80, 0x01]; "min three bytes")]
    #[test_case(u16::MAX, &[0xFF, 0xFF, 0x03]; "max")]
    fn test_short_u16(value: u16, expected: &[u8]) {
        let codec = short_u16();
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(&encoded[..], expected);
        assert_eq!(codec.encode_size(&value).unwrap(), expected.len());
        assert_eq!(size(value), expected.len());
        assert_eq!(codec.decode(expected).unwrap(), value);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            short_u16().encode(&65536u32),
            Err(Error::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            short_u16().encode(&-1i32),
            Err(Error::NumberOutOfRange { .. })
        ));
    }

    #[test]
    fn test_non_canonical() {
        // Alias of 0 with a redundant group.
        assert_eq!(short_u16().decode(&[0x80, 0x00]), Err(Error::InvalidVarint));
        // Alias of 1 spread over three bytes.
        assert_eq!(
            short_u16().decode(&[0x81, 0x80, 0x00]),
            Err(Error::InvalidVarint)
        );
    }

    #[test]
    fn test_overflow() {
        // 0x04 in the third group sets bit 16.
        assert_eq!(
            short_u16().decode(&[0x80, 0x80, 0x04]),
            Err(Error::InvalidVarint)
        );
        // Continuation bit set on the third byte.
        assert_eq!(
            short_u16().decode(&[0x80, 0x80, 0x80, 0x01]),
            Err(Error::InvalidVarint)
        );
    }

    #[test]
    fn test_insufficient_buffer() {
        assert_eq!(
            short_u16().read(&[0x80], 0),
            Err(Error::UnexpectedEndOfInput {
                expected: 2,
                offset: 0,
                remaining: 1
            })
        );
    }
}
