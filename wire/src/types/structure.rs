//! Codec for records with named, ordered fields.
//!
//! A [Struct] is a [crate::types::tuple::Tuple] whose positions are bound to named fields of a
//! Rust type. Fields are written in the order they are declared in the field tuple, regardless
//! of the order of the fields in the Rust type.
//!
//! # Example
//!
//! ```
//! use commonware_wire::{field, structure, u32, Decoder, Encoder};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: u32,
//!     y: u32,
//! }
//!
//! let codec = structure(
//!     (
//!         field("x", u32(), |p: &Point| &p.x),
//!         field("y", u32(), |p: &Point| &p.y),
//!     ),
//!     |(x, y)| Point { x, y },
//! );
//!
//! let point = Point { x: 1, y: 2 };
//! let encoded = codec.encode(&point).unwrap();
//! assert_eq!(&encoded[..], &[1, 0, 0, 0, 2, 0, 0, 0]);
//! assert_eq!(codec.decode(&encoded).unwrap(), point);
//! ```

use crate::{Decoder, Encoder, Error, Size, Sizing};
use bytes::BytesMut;
use paste::paste;
use std::marker::PhantomData;
use tracing::debug;

/// A named field of the record `S`, encoded with `C` from the value returned by its getter.
pub struct Field<S, A: ?Sized, C, G> {
    name: &'static str,
    codec: C,
    get: G,
    _marker: PhantomData<fn(&S) -> &A>,
}

/// Declares a field named `name`, read from a record with `get` and encoded with `codec`.
pub fn field<S, A, C, G>(name: &'static str, codec: C, get: G) -> Field<S, A, C, G>
where
    A: ?Sized,
    C: Encoder<A> + Decoder,
    G: Fn(&S) -> &A,
{
    Field {
        name,
        codec,
        get,
        _marker: PhantomData,
    }
}

impl<S, A: ?Sized, C: Clone, G: Clone> Clone for Field<S, A, C, G> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            codec: self.codec.clone(),
            get: self.get.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A: ?Sized, C, G> Field<S, A, C, G> {
    /// The name of this field.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<S, A, C, G> Field<S, A, C, G>
where
    A: ?Sized,
    C: Encoder<A> + Decoder,
    G: Fn(&S) -> &A,
{
    fn encode_size(&self, record: &S) -> Result<usize, Error> {
        self.codec.encode_size((self.get)(record))
    }

    fn write(&self, record: &S, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        self.codec.write((self.get)(record), buf, offset)
    }

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(C::Output, usize), Error> {
        self.codec.read(bytes, offset).inspect_err(|err| {
            debug!(field = self.name, offset, %err, "failed to decode field");
        })
    }
}

/// An ordered list of fields of the record `S`.
///
/// Implemented for tuples of [Field]s.
pub trait Fields<S> {
    /// The decoded field values, in declaration order.
    type Values;

    /// The combined size category of all fields.
    fn size(&self) -> Size;

    /// The combined encoded size of all fields of `record`.
    fn encode_size(&self, record: &S) -> Result<usize, Error>;

    /// Writes all fields of `record` in declaration order.
    fn write(&self, record: &S, buf: &mut BytesMut, offset: usize) -> Result<usize, Error>;

    /// Reads all fields in declaration order.
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(Self::Values, usize), Error>;

    /// The field names, in declaration order.
    fn names(&self) -> Vec<&'static str>;
}

macro_rules! impl_fields_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<S, $( [<A $index>]: ?Sized, [<C $index>], [<G $index>] ),*> Fields<S>
                for ( $( Field<S, [<A $index>], [<C $index>], [<G $index>]>, )* )
            where
                $(
                    [<C $index>]: Encoder<[<A $index>]> + Decoder,
                    [<G $index>]: Fn(&S) -> &[<A $index>],
                )*
            {
                type Values = ( $( [<C $index>]::Output, )* );

                #[inline]
                fn size(&self) -> Size {
                    Size::Fixed(0) $( + self.$index.codec.size() )*
                }

                #[inline]
                fn encode_size(&self, record: &S) -> Result<usize, Error> {
                    Ok(0 $( + self.$index.encode_size(record)? )*)
                }

                #[inline]
                fn write(&self, record: &S, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
                    $( let offset = self.$index.write(record, buf, offset)?; )*
                    Ok(offset)
                }

                #[inline]
                fn read(&self, bytes: &[u8], offset: usize) -> Result<(Self::Values, usize), Error> {
                    $( let ([<v $index>], offset) = self.$index.read(bytes, offset)?; )*
                    Ok((( $( [<v $index>], )* ), offset))
                }

                fn names(&self) -> Vec<&'static str> {
                    vec![$( self.$index.name ),*]
                }
            }
        }
    };
}

// Generate implementations for records of 1 through 12 fields
impl_fields_for_tuple!(0);
impl_fields_for_tuple!(0, 1);
impl_fields_for_tuple!(0, 1, 2);
impl_fields_for_tuple!(0, 1, 2, 3);
impl_fields_for_tuple!(0, 1, 2, 3, 4);
impl_fields_for_tuple!(0, 1, 2, 3, 4, 5);
impl_fields_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_fields_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_fields_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_fields_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_fields_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_fields_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

/// A codec for the record `S`.
pub struct Struct<S, F, B> {
    fields: F,
    build: B,
    _marker: PhantomData<fn(&S) -> S>,
}

/// Returns a codec for the record `S` from its ordered `fields` and a `build` function that
/// assembles a record from the decoded field values.
pub fn structure<S, F, B>(fields: F, build: B) -> Struct<S, F, B>
where
    F: Fields<S>,
    B: Fn(F::Values) -> S,
{
    Struct {
        fields,
        build,
        _marker: PhantomData,
    }
}

impl<S, F: Clone, B: Clone> Clone for Struct<S, F, B> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            build: self.build.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, F: Fields<S>, B> Struct<S, F, B> {
    /// The field names, in wire order.
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.names()
    }
}

impl<S, F: Fields<S>, B> Sizing for Struct<S, F, B> {
    fn size(&self) -> Size {
        self.fields.size()
    }
}

impl<S, F: Fields<S>, B> Encoder<S> for Struct<S, F, B> {
    fn encode_size(&self, value: &S) -> Result<usize, Error> {
        self.fields.encode_size(value)
    }

    fn write(&self, value: &S, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        self.fields.write(value, buf, offset)
    }
}

impl<S, F, B> Decoder for Struct<S, F, B>
where
    F: Fields<S>,
    B: Fn(F::Values) -> S,
{
    type Output = S;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(S, usize), Error> {
        let (values, offset) = self.fields.read(bytes, offset)?;
        Ok(((self.build)(values), offset))
    }
}
