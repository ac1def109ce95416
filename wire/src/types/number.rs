//! Fixed-width numeric codecs.
//!
//! One codec per integer width (8 to 128 bits, signed and unsigned) and per IEEE float width.
//! All of them are little-endian unless configured otherwise with [Number::big_endian].
//!
//! # Range checks
//!
//! An integer codec encodes any Rust integer type, failing with [Error::NumberOutOfRange] if the
//! value does not fit the declared width and signedness (for example `300` into a [u8()] codec).
//! Decoding never range-checks: every bit pattern is a valid value of its width.

use crate::{
    util::{at_least, reserve},
    Decoder, Encoder, Endian, Error, Size, Sizing,
};
use bytes::{Buf, BufMut, BytesMut};
use std::marker::PhantomData;

/// A codec for the fixed-width number type `N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Number<N> {
    endian: Endian,
    _marker: PhantomData<N>,
}

impl<N> Number<N> {
    const fn new() -> Self {
        Self {
            endian: Endian::Little,
            _marker: PhantomData,
        }
    }

    /// Returns a copy of this codec using `endian` byte order.
    pub fn with_endian(self, endian: Endian) -> Self {
        Self { endian, ..self }
    }

    /// Returns a copy of this codec using big-endian byte order.
    pub fn big_endian(self) -> Self {
        self.with_endian(Endian::Big)
    }

    /// The byte order of this codec.
    pub fn endian(&self) -> Endian {
        self.endian
    }
}

// Constructor, size, writer and decoder for one number type.
macro_rules! impl_number {
    ($type:ident, $get_le:ident, $get_be:ident, $put_le:ident, $put_be:ident) => {
        #[doc = concat!("Returns a codec for `", stringify!($type), "` values.")]
        pub const fn $type() -> Number<$type> {
            Number::new()
        }

        impl Number<$type> {
            const LEN: usize = std::mem::size_of::<$type>();

            #[inline]
            fn put(&self, value: $type, buf: &mut BytesMut, offset: usize) -> usize {
                let mut dst = reserve(buf, offset, Self::LEN);
                match self.endian {
                    Endian::Little => dst.$put_le(value),
                    Endian::Big => dst.$put_be(value),
                }
                offset + Self::LEN
            }
        }

        impl Sizing for Number<$type> {
            #[inline]
            fn size(&self) -> Size {
                Size::Fixed(Self::LEN)
            }
        }

        impl Decoder for Number<$type> {
            type Output = $type;

            #[inline]
            fn read(&self, bytes: &[u8], offset: usize) -> Result<($type, usize), Error> {
                let mut src = at_least(bytes, offset, Self::LEN)?;
                let value = match self.endian {
                    Endian::Little => src.$get_le(),
                    Endian::Big => src.$get_be(),
                };
                Ok((value, offset + Self::LEN))
            }
        }
    };
}

impl_number!(u8, get_u8, get_u8, put_u8, put_u8);
impl_number!(u16, get_u16_le, get_u16, put_u16_le, put_u16);
impl_number!(u32, get_u32_le, get_u32, put_u32_le, put_u32);
impl_number!(u64, get_u64_le, get_u64, put_u64_le, put_u64);
impl_number!(u128, get_u128_le, get_u128, put_u128_le, put_u128);
impl_number!(i8, get_i8, get_i8, put_i8, put_i8);
impl_number!(i16, get_i16_le, get_i16, put_i16_le, put_i16);
impl_number!(i32, get_i32_le, get_i32, put_i32_le, put_i32);
impl_number!(i64, get_i64_le, get_i64, put_i64_le, put_i64);
impl_number!(i128, get_i128_le, get_i128, put_i128_le, put_i128);
impl_number!(f32, get_f32_le, get_f32, put_f32_le, put_f32);
impl_number!(f64, get_f64_le, get_f64, put_f64_le, put_f64);

// Range-checked encoding of one integer input type into the integer codec `$type`.
macro_rules! impl_int_encoder {
    ($type:ty => $($input:ty),*) => {
        $(
            impl Encoder<$input> for Number<$type> {
                #[inline]
                fn encode_size(&self, _: &$input) -> Result<usize, Error> {
                    Ok(Self::LEN)
                }

                #[inline]
                fn write(
                    &self,
                    value: &$input,
                    buf: &mut BytesMut,
                    offset: usize,
                ) -> Result<usize, Error> {
                    let value = <$type>::try_from(*value).map_err(|_| {
                        Error::out_of_range(stringify!($type), value, <$type>::MIN, <$type>::MAX)
                    })?;
                    Ok(self.put(value, buf, offset))
                }
            }
        )*
    };
}

macro_rules! impl_int_encoders {
    ($($type:ty),*) => {
        $(
            impl_int_encoder!(
                $type => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
            );
        )*
    };
}

impl_int_encoders!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl Encoder<f32> for Number<f32> {
    #[inline]
    fn encode_size(&self, _: &f32) -> Result<usize, Error> {
        Ok(Self::LEN)
    }

    #[inline]
    fn write(&self, value: &f32, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        Ok(self.put(*value, buf, offset))
    }
}

impl Encoder<f64> for Number<f32> {
    #[inline]
    fn encode_size(&self, _: &f64) -> Result<usize, Error> {
        Ok(Self::LEN)
    }

    /// Narrows `value` to `f32`. Finite values beyond the `f32` range are rejected; precision
    /// loss within the range is not.
    #[inline]
    fn write(&self, value: &f64, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        if value.is_finite() && value.abs() > f64::from(f32::MAX) {
            return Err(Error::out_of_range("f32", value, f32::MIN, f32::MAX));
        }
        Ok(self.put(*value as f32, buf, offset))
    }
}

impl Encoder<f32> for Number<f64> {
    #[inline]
    fn encode_size(&self, _: &f32) -> Result<usize, Error> {
        Ok(Self::LEN)
    }

    #[inline]
    fn write(&self, value: &f32, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        Ok(self.put(f64::from(*value), buf, offset))
    }
}

impl Encoder<f64> for Number<f64> {
    #[inline]
    fn encode_size(&self, _: &f64) -> Result<usize, Error> {
        Ok(Self::LEN)
    }

    #[inline]
    fn write(&self, value: &f64, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        Ok(self.put(*value, buf, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! impl_num_test {
        ($type:ident, $size:expr) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let codec = $type();
                    assert_eq!(codec.size(), Size::Fixed($size));
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values.iter() {
                        for codec in [codec, codec.big_endian()] {
                            let encoded = codec.encode(value).unwrap();
                            assert_eq!(encoded.len(), $size);
                            assert_eq!(codec.encode_size(value).unwrap(), $size);
                            let decoded = codec.decode(&encoded).unwrap();
                            assert_eq!(*value, decoded);
                        }
                        assert_eq!(&codec.encode(value).unwrap()[..], &value.to_le_bytes()[..]);
                        assert_eq!(
                            &codec.big_endian().encode(value).unwrap()[..],
                            &value.to_be_bytes()[..]
                        );
                    }
                }
            }
        };
    }
    impl_num_test!(u8, 1);
    impl_num_test!(u16, 2);
    impl_num_test!(u32, 4);
    impl_num_test!(u64, 8);
    impl_num_test!(u128, 16);
    impl_num_test!(i8, 1);
    impl_num_test!(i16, 2);
    impl_num_test!(i32, 4);
    impl_num_test!(i64, 8);
    impl_num_test!(i128, 16);
    impl_num_test!(f32, 4);
    impl_num_test!(f64, 8);

    #[test]
    fn test_endianness() {
        assert_eq!(&u16().encode(&0x0102u16).unwrap()[..], &[0x02, 0x01]);
        assert_eq!(
            &u32().big_endian().encode(&0x01020304u32).unwrap()[..],
            &[0x01, 0x02, 0x03, 0x04]
        );
        assert_eq!(
            &f32().big_endian().encode(&1.0f32).unwrap()[..],
            &[0x3F, 0x80, 0x00, 0x00]
        );
        assert_eq!(&f32().encode(&1.0f32).unwrap()[..], &[0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(u16().big_endian().endian(), Endian::Big);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            u8().encode(&300u16),
            Err(Error::NumberOutOfRange {
                codec: "u8",
                value: "300".into(),
                min: "0".into(),
                max: "255".into(),
            })
        );
        let encoded = u8().encode(&255u16).unwrap();
        assert_eq!(u8().decode(&encoded).unwrap(), 255);

        assert!(matches!(
            i8().encode(&-129i32),
            Err(Error::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            u64().encode(&-1i64),
            Err(Error::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            u128().encode(&i128::MIN),
            Err(Error::NumberOutOfRange { .. })
        ));
        assert_eq!(&i16().encode(&-2i64).unwrap()[..], &[0xFE, 0xFF]);
        assert_eq!(&u32().encode(&7usize).unwrap()[..], &[0x07, 0, 0, 0]);
    }

    #[test]
    fn test_float_narrowing() {
        assert!(matches!(
            f32().encode(&1e300f64),
            Err(Error::NumberOutOfRange { .. })
        ));
        let encoded = f32().encode(&1.5f64).unwrap();
        assert_eq!(f32().decode(&encoded).unwrap(), 1.5f32);
        let encoded = f32().encode(&f64::INFINITY).unwrap();
        assert_eq!(f32().decode(&encoded).unwrap(), f32::INFINITY);
        let encoded = f64().encode(&0.25f32).unwrap();
        assert_eq!(f64().decode(&encoded).unwrap(), 0.25f64);
    }

    #[test]
    fn test_decode_any_pattern() {
        assert_eq!(i8().decode(&[0x80]).unwrap(), -128);
        assert_eq!(u16().big_endian().decode(&[0xAB, 0xCD]).unwrap(), 0xABCD);
        assert_eq!(i32().decode(&[0xFF; 4]).unwrap(), -1);
    }

    #[test]
    fn test_read_at_offset() {
        let bytes = [0xAA, 0x01, 0x00, 0xBB];
        assert_eq!(u16().read(&bytes, 1).unwrap(), (1, 3));
        assert_eq!(
            u16().read(&bytes, 3),
            Err(Error::UnexpectedEndOfInput {
                expected: 2,
                offset: 3,
                remaining: 1
            })
        );
    }
}
