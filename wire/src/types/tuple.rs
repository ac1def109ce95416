//! Codec for heterogeneous, fixed-arity tuples.
//!
//! Children are encoded and decoded strictly in declaration order, each advancing the shared
//! offset. A tuple is fixed-size iff every child is fixed-size.

use crate::{Decoder, Encoder, Error, Size, Sizing};
use bytes::BytesMut;
use paste::paste;

/// A codec for tuples, built from a tuple of child codecs.
#[derive(Clone, Copy, Debug)]
pub struct Tuple<C>(C);

/// Returns a codec that encodes the elements of a tuple with the matching codecs of `codecs`.
pub fn tuple<C>(codecs: C) -> Tuple<C> {
    Tuple(codecs)
}

impl<C> Tuple<C> {
    /// The child codecs.
    pub fn codecs(&self) -> &C {
        &self.0
    }
}

// Tuple implementation
macro_rules! impl_codec_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<C $index>]: Sizing ),*> Sizing for Tuple<( $( [<C $index>], )* )> {
                #[inline]
                fn size(&self) -> Size {
                    Size::Fixed(0) $( + self.0.$index.size() )*
                }
            }

            impl<$( [<T $index>], [<C $index>]: Encoder<[<T $index>]> ),*>
                Encoder<( $( [<T $index>], )* )> for Tuple<( $( [<C $index>], )* )>
            {
                #[inline]
                fn encode_size(&self, value: &( $( [<T $index>], )* )) -> Result<usize, Error> {
                    Ok(0 $( + self.0.$index.encode_size(&value.$index)? )*)
                }

                #[inline]
                fn write(
                    &self,
                    value: &( $( [<T $index>], )* ),
                    buf: &mut BytesMut,
                    offset: usize,
                ) -> Result<usize, Error> {
                    $( let offset = self.0.$index.write(&value.$index, buf, offset)?; )*
                    Ok(offset)
                }
            }

            impl<$( [<C $index>]: Decoder ),*> Decoder for Tuple<( $( [<C $index>], )* )> {
                type Output = ( $( [<C $index>]::Output, )* );

                #[inline]
                fn read(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
                    $( let ([<v $index>], offset) = self.0.$index.read(bytes, offset)?; )*
                    Ok((( $( [<v $index>], )* ), offset))
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_codec_for_tuple!(0);
impl_codec_for_tuple!(0, 1);
impl_codec_for_tuple!(0, 1, 2);
impl_codec_for_tuple!(0, 1, 2, 3);
impl_codec_for_tuple!(0, 1, 2, 3, 4);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        types::{
            number::{i64, u16, u8},
            string::utf8,
        },
        Length,
    };

    #[test]
    fn test_fixed_tuple() {
        let codec = tuple((u8(), u16(), i64()));
        assert_eq!(codec.size(), Size::Fixed(11));

        let value = (1u8, 0x0203u16, -1i64);
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(encoded.len(), 11);
        assert_eq!(&encoded[..3], &[0x01, 0x03, 0x02]);
        assert_eq!(codec.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_variable_tuple() {
        let codec = tuple((utf8(Length::Prefixed(u8())), u16()));
        assert_eq!(codec.size(), Size::Variable);

        let value = ("hi".to_string(), 7u16);
        assert_eq!(codec.encode_size(&value).unwrap(), 5);
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(&encoded[..], &[0x02, b'h', b'i', 0x07, 0x00]);
        assert_eq!(codec.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_error_aborts() {
        let codec = tuple((u8(), u8()));
        assert!(matches!(
            codec.encode(&(1u16, 256u16)),
            Err(Error::NumberOutOfRange { .. })
        ));
        assert_eq!(
            codec.decode(&[0x01]),
            Err(Error::UnexpectedEndOfInput {
                expected: 2,
                offset: 0,
                remaining: 1
            })
        );
    }
}
