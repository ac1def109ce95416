//! Codec for homogeneous sequences.
//!
//! The element count is determined by a [Length]:
//! - [Length::Prefixed]: a numeric count precedes the elements.
//! - [Length::Fixed]: exactly `n` elements, with no prefix. Encoding a value with a different
//!   number of elements fails with [Error::LengthMismatch].
//! - [Length::Remainder]: no prefix. Decoding reads elements until the slice is exhausted. With a
//!   fixed-size element the remaining byte count must be an exact multiple of the element size,
//!   otherwise decoding fails with [Error::MisalignedRemainder]. Variable-size elements are
//!   accepted when they are self-delimiting (for example wrapped in
//!   [crate::types::prefixed::SizePrefixed]).

use crate::{
    types::number::Number, util::remainder, Decoder, Encoder, Error, Length, Limit, Prefix, Size,
    Sizing,
};
use bytes::BytesMut;

/// A codec for sequences of items encoded with `C`.
#[derive(Clone, Debug)]
pub struct Array<C, P = Number<u32>> {
    item: C,
    length: Length<P>,
    limit: Limit,
}

/// Returns a codec for sequences of `item` with the given count strategy.
///
/// # Panics
///
/// Panics if `item` is a zero-size codec and `length` is not [Length::Fixed]. Zero-size items
/// consume no input, so a remainder count could never be recovered and a prefixed count would not
/// be bounded by the input length.
///
/// Panics if a fixed count of fixed-size items overflows `usize` bytes.
pub fn array<C: Sizing, P: Prefix>(item: C, length: Length<P>) -> Array<C, P> {
    match (&length, item.size()) {
        (Length::Fixed(count), Size::Fixed(size)) => {
            assert!(
                count.checked_mul(size).is_some(),
                "fixed array size overflows usize: {count} items of {size} bytes"
            );
        }
        (_, Size::Fixed(0)) => panic!("array of zero-size items needs a fixed count"),
        _ => {}
    }
    Array {
        item,
        length,
        limit: Limit::default(),
    }
}

impl<C: Sizing, P: Prefix> Array<C, P> {
    /// Returns a copy of this codec that rejects decoded counts outside `limit`.
    pub fn with_limit(self, limit: impl Into<Limit>) -> Self {
        Self {
            limit: limit.into(),
            ..self
        }
    }

    /// The item codec.
    pub fn item(&self) -> &C {
        &self.item
    }

    /// The count strategy.
    pub fn length(&self) -> &Length<P> {
        &self.length
    }

    /// Encoded size of the count for `count` items.
    pub(crate) fn count_size(&self, count: usize) -> Result<usize, Error> {
        match &self.length {
            Length::Fixed(expected) => {
                check_count(*expected, count)?;
                Ok(0)
            }
            Length::Prefixed(prefix) => prefix.encode_size(&count),
            Length::Remainder => Ok(0),
        }
    }

    /// Writes the count for `count` items, if the strategy has one.
    pub(crate) fn write_count(
        &self,
        count: usize,
        buf: &mut BytesMut,
        offset: usize,
    ) -> Result<usize, Error> {
        match &self.length {
            Length::Fixed(expected) => {
                check_count(*expected, count)?;
                Ok(offset)
            }
            Length::Prefixed(prefix) => prefix.write(&count, buf, offset),
            Length::Remainder => Ok(offset),
        }
    }

    /// Reads the count, returning `None` for the remainder strategy.
    pub(crate) fn read_count(
        &self,
        bytes: &[u8],
        offset: usize,
    ) -> Result<(Option<usize>, usize), Error> {
        match &self.length {
            Length::Fixed(count) => Ok((Some(*count), offset)),
            Length::Prefixed(prefix) => {
                let (count, offset) = prefix.read_usize(bytes, offset)?;
                self.limit.check(count)?;
                Ok((Some(count), offset))
            }
            Length::Remainder => Ok((None, offset)),
        }
    }
}

fn check_count(expected: usize, found: usize) -> Result<(), Error> {
    if expected != found {
        return Err(Error::LengthMismatch { expected, found });
    }
    Ok(())
}

impl<C: Sizing, P: Prefix> Sizing for Array<C, P> {
    fn size(&self) -> Size {
        match (&self.length, self.item.size()) {
            (Length::Fixed(count), Size::Fixed(size)) => {
                count.checked_mul(size).map_or(Size::Variable, Size::Fixed)
            }
            _ => Size::Variable,
        }
    }
}

impl<T, C: Encoder<T>, P: Prefix> Encoder<[T]> for Array<C, P> {
    fn encode_size(&self, value: &[T]) -> Result<usize, Error> {
        let prefix = self.count_size(value.len())?;
        match self.item.size() {
            Size::Fixed(size) => Ok(prefix + size * value.len()),
            Size::Variable => value
                .iter()
                .try_fold(prefix, |acc, item| Ok(acc + self.item.encode_size(item)?)),
        }
    }

    fn write(&self, value: &[T], buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        let mut offset = self.write_count(value.len(), buf, offset)?;
        for item in value {
            offset = self.item.write(item, buf, offset)?;
        }
        Ok(offset)
    }
}

impl<T, C: Encoder<T>, P: Prefix> Encoder<Vec<T>> for Array<C, P> {
    #[inline]
    fn encode_size(&self, value: &Vec<T>) -> Result<usize, Error> {
        Encoder::<[T]>::encode_size(self, value)
    }

    #[inline]
    fn write(&self, value: &Vec<T>, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        Encoder::<[T]>::write(self, value, buf, offset)
    }
}

impl<T, C: Encoder<T>, P: Prefix, const N: usize> Encoder<[T; N]> for Array<C, P> {
    #[inline]
    fn encode_size(&self, value: &[T; N]) -> Result<usize, Error> {
        Encoder::<[T]>::encode_size(self, value)
    }

    #[inline]
    fn write(&self, value: &[T; N], buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        Encoder::<[T]>::write(self, value, buf, offset)
    }
}

impl<C: Decoder, P: Prefix> Array<C, P> {
    fn read_counted(
        &self,
        bytes: &[u8],
        mut offset: usize,
        count: usize,
    ) -> Result<(Vec<C::Output>, usize), Error> {
        // Never trust the count for preallocation beyond what the input could hold.
        let remaining = bytes.len().saturating_sub(offset);
        let capacity = match self.item.size() {
            Size::Fixed(size) if size > 0 => count.min(remaining / size),
            _ => count.min(remaining),
        };
        let mut items = Vec::with_capacity(capacity);
        for _ in 0..count {
            let (item, next) = self.item.read(bytes, offset)?;
            items.push(item);
            offset = next;
        }
        Ok((items, offset))
    }

    fn read_remainder(
        &self,
        bytes: &[u8],
        mut offset: usize,
    ) -> Result<(Vec<C::Output>, usize), Error> {
        let rest = remainder(bytes, offset)?;
        let mut items = match self.item.size() {
            Size::Fixed(size) if size > 0 => {
                if rest.len() % size != 0 {
                    return Err(Error::MisalignedRemainder {
                        remaining: rest.len(),
                        item_size: size,
                    });
                }
                Vec::with_capacity(rest.len() / size)
            }
            _ => Vec::new(),
        };
        while offset < bytes.len() {
            let (item, next) = self.item.read(bytes, offset)?;
            if next == offset {
                return Err(Error::MisalignedRemainder {
                    remaining: bytes.len() - offset,
                    item_size: 0,
                });
            }
            items.push(item);
            offset = next;
        }
        Ok((items, offset))
    }
}

impl<C: Decoder, P: Prefix> Decoder for Array<C, P> {
    type Output = Vec<C::Output>;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        match self.read_count(bytes, offset)? {
            (Some(count), offset) => self.read_counted(bytes, offset, count),
            (None, offset) => self.read_remainder(bytes, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        constant::unit,
        number::{u16, u8},
        string::utf8,
    };

    #[test]
    fn test_prefixed() {
        let codec = array(u16(), Length::prefixed());
        assert_eq!(codec.size(), Size::Variable);

        let value = vec![1u16, 2, 3];
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(
            &encoded[..],
            &[0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00]
        );
        assert_eq!(codec.encode_size(&value).unwrap(), 10);
        assert_eq!(codec.decode(&encoded).unwrap(), value);

        let empty: Vec<u16> = Vec::new();
        assert_eq!(&codec.encode(&empty).unwrap()[..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_count() {
        let codec = array(u8(), Length::fixed(3));
        assert_eq!(codec.size(), Size::Fixed(3));

        let encoded = codec.encode(&[7u8, 8, 9]).unwrap();
        assert_eq!(&encoded[..], &[7, 8, 9]);
        assert_eq!(codec.decode(&encoded).unwrap(), vec![7, 8, 9]);

        assert_eq!(
            codec.encode(&vec![1u8, 2]),
            Err(Error::LengthMismatch {
                expected: 3,
                found: 2
            })
        );

        // A fixed count of variable-size items is variable.
        let codec = array(utf8(Length::Prefixed(u8())), Length::fixed(2));
        assert_eq!(codec.size(), Size::Variable);
    }

    #[test]
    fn test_remainder() {
        let codec = array(u16(), Length::remainder());
        assert_eq!(codec.size(), Size::Variable);

        let encoded = codec.encode(&vec![1u16, 2]).unwrap();
        assert_eq!(&encoded[..], &[0x01, 0x00, 0x02, 0x00]);
        assert_eq!(codec.decode(&encoded).unwrap(), vec![1, 2]);
        assert!(codec.decode(&[]).unwrap().is_empty());

        assert_eq!(
            codec.decode(&[0x01, 0x00, 0x02]),
            Err(Error::MisalignedRemainder {
                remaining: 3,
                item_size: 2
            })
        );
    }

    #[test]
    fn test_remainder_variable_items() {
        let codec = array(utf8(Length::Prefixed(u8())), Length::remainder());
        let value = vec!["a".to_string(), "bc".to_string()];
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(&encoded[..], b"\x01a\x02bc");
        assert_eq!(codec.decode(&encoded).unwrap(), value);
        assert!(matches!(
            codec.decode(b"\x01a\x05bc"),
            Err(Error::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "array of zero-size items needs a fixed count")]
    fn test_remainder_zero_size_item() {
        array(array(u8(), Length::fixed(0)), Length::remainder());
    }

    #[test]
    #[should_panic(expected = "array of zero-size items needs a fixed count")]
    fn test_prefixed_zero_size_item() {
        // A hostile count would otherwise loop without consuming input.
        array(unit(), Length::prefixed());
    }

    #[test]
    fn test_fixed_zero_size_item() {
        let codec = array(unit(), Length::fixed(3));
        assert_eq!(codec.size(), Size::Fixed(0));
        assert!(codec.encode(&[(), (), ()]).unwrap().is_empty());
        assert_eq!(codec.decode(&[]).unwrap(), vec![(), (), ()]);
    }

    #[test]
    #[should_panic(expected = "fixed array size overflows usize")]
    fn test_fixed_size_overflow() {
        array(u16(), Length::fixed(usize::MAX));
    }

    #[test]
    fn test_limit() {
        let codec = array(u8(), Length::Prefixed(u8())).with_limit(..=2usize);
        assert_eq!(codec.decode(&[0x02, 1, 2]).unwrap(), vec![1, 2]);
        assert_eq!(codec.decode(&[0x03, 1, 2, 3]), Err(Error::InvalidLength(3)));
    }

    #[test]
    fn test_huge_count_truncated() {
        // A hostile count must fail on missing bytes, not on allocation.
        let codec = array(u8(), Length::prefixed());
        assert_eq!(
            codec.decode(&[0xFF, 0xFF, 0xFF, 0xFF, 0x01]),
            Err(Error::UnexpectedEndOfInput {
                expected: 1,
                offset: 5,
                remaining: 0
            })
        );
    }

    #[test]
    fn test_nested() {
        let codec = array(array(u8(), Length::Prefixed(u8())), Length::Prefixed(u8()));
        let value = vec![vec![1u8], vec![], vec![2, 3]];
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(&encoded[..], &[3, 1, 1, 0, 2, 2, 3]);
        assert_eq!(codec.decode(&encoded).unwrap(), value);
    }
}
