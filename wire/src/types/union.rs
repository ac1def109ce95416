//! Codec for discriminated unions.
//!
//! A [Union] writes a numeric discriminant (a `u32` by default) followed by the payload of the
//! selected variant. Variants are declared explicitly with a tag, a payload codec, a function that
//! extracts the payload from a value of that variant, and a function that rebuilds the value from
//! a decoded payload.
//!
//! # Example
//!
//! ```
//! use commonware_wire::{u8, u64, union, unit, Decoder, Encoder};
//!
//! #[derive(Debug, PartialEq)]
//! enum Instruction {
//!     Transfer(u64),
//!     Close,
//! }
//!
//! let codec = union::<Instruction>()
//!     .with_discriminant(u8())
//!     .variant(
//!         2,
//!         u64(),
//!         |i| match i {
//!             Instruction::Transfer(lamports) => Some(lamports),
//!             _ => None,
//!         },
//!         Instruction::Transfer,
//!     )
//!     .variant(
//!         9,
//!         unit(),
//!         |i| matches!(i, Instruction::Close).then_some(&()),
//!         |()| Instruction::Close,
//!     );
//!
//! let encoded = codec.encode(&Instruction::Transfer(5)).unwrap();
//! assert_eq!(&encoded[..], &[2, 5, 0, 0, 0, 0, 0, 0, 0]);
//! assert_eq!(codec.decode(&encoded).unwrap(), Instruction::Transfer(5));
//! assert_eq!(&codec.encode(&Instruction::Close).unwrap()[..], &[9]);
//! ```

use crate::{
    types::number::{u32, Number},
    Decoder, Encoder, Error, Prefix, Size, Sizing,
};
use bytes::BytesMut;
use std::{marker::PhantomData, sync::Arc};
use tracing::debug;

/// A single variant of a union over `T`, with its payload codec erased.
trait Variant<T>: Send + Sync {
    fn size(&self) -> Size;

    /// Returns true if `value` is of this variant.
    fn matches(&self, value: &T) -> bool;

    fn encode_size(&self, value: &T) -> Result<usize, Error>;

    fn write(&self, value: &T, buf: &mut BytesMut, offset: usize) -> Result<usize, Error>;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize), Error>;
}

struct Case<A: ?Sized, C, E, B> {
    codec: C,
    extract: E,
    build: B,
    _marker: PhantomData<fn(&A)>,
}

impl<T, A, C, E, B> Variant<T> for Case<A, C, E, B>
where
    A: ?Sized,
    C: Encoder<A> + Decoder + Send + Sync,
    E: Fn(&T) -> Option<&A> + Send + Sync,
    B: Fn(C::Output) -> T + Send + Sync,
{
    fn size(&self) -> Size {
        self.codec.size()
    }

    fn matches(&self, value: &T) -> bool {
        (self.extract)(value).is_some()
    }

    fn encode_size(&self, value: &T) -> Result<usize, Error> {
        let payload = (self.extract)(value).ok_or(Error::UnmatchedVariant)?;
        self.codec.encode_size(payload)
    }

    fn write(&self, value: &T, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        let payload = (self.extract)(value).ok_or(Error::UnmatchedVariant)?;
        self.codec.write(payload, buf, offset)
    }

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize), Error> {
        let (payload, offset) = self.codec.read(bytes, offset)?;
        Ok(((self.build)(payload), offset))
    }
}

/// A codec for values of `T` selected by a discriminant encoded with `D`.
pub struct Union<T, D = Number<u32>> {
    discriminant: D,
    variants: Vec<(usize, Arc<dyn Variant<T>>)>,
}

impl<T, D: Clone> Clone for Union<T, D> {
    fn clone(&self) -> Self {
        Self {
            discriminant: self.discriminant.clone(),
            variants: self.variants.clone(),
        }
    }
}

/// Returns a union over `T` with no variants and a `u32` discriminant.
pub fn union<T>() -> Union<T> {
    Union {
        discriminant: u32(),
        variants: Vec::new(),
    }
}

impl<T: 'static, D: Prefix> Union<T, D> {
    /// Returns a copy of this union that encodes the discriminant with `discriminant`.
    pub fn with_discriminant<Q: Prefix>(self, discriminant: Q) -> Union<T, Q> {
        Union {
            discriminant,
            variants: self.variants,
        }
    }

    /// Returns a copy of this union with an additional variant.
    ///
    /// Values for which `extract` returns a payload are written with `tag` followed by the payload
    /// encoded with `codec`. On decode, `tag` selects `codec` and `build` rebuilds the value.
    /// Variants are matched in declaration order when encoding.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is already declared.
    pub fn variant<A, C, E, B>(mut self, tag: usize, codec: C, extract: E, build: B) -> Self
    where
        A: ?Sized + 'static,
        C: Encoder<A> + Decoder + Send + Sync + 'static,
        E: Fn(&T) -> Option<&A> + Send + Sync + 'static,
        B: Fn(C::Output) -> T + Send + Sync + 'static,
    {
        assert!(
            self.variants.iter().all(|(existing, _)| *existing != tag),
            "duplicate variant tag: {tag}"
        );
        self.variants.push((
            tag,
            Arc::new(Case {
                codec,
                extract,
                build,
                _marker: PhantomData,
            }),
        ));
        self
    }

    /// The declared tags, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = usize> + '_ {
        self.variants.iter().map(|(tag, _)| *tag)
    }
}

impl<T, D: Prefix> Sizing for Union<T, D> {
    fn size(&self) -> Size {
        let Size::Fixed(discriminant) = self.discriminant.size() else {
            return Size::Variable;
        };
        let mut sizes = self.variants.iter().map(|(_, variant)| variant.size());
        match sizes.next() {
            Some(Size::Fixed(first)) if sizes.all(|size| size == Size::Fixed(first)) => {
                Size::Fixed(discriminant + first)
            }
            _ => Size::Variable,
        }
    }
}

impl<T, D: Prefix> Union<T, D> {
    fn select(&self, value: &T) -> Result<(&usize, &dyn Variant<T>), Error> {
        self.variants
            .iter()
            .find(|(_, variant)| variant.matches(value))
            .map(|(tag, variant)| (tag, variant.as_ref()))
            .ok_or(Error::UnmatchedVariant)
    }
}

impl<T, D: Prefix> Encoder<T> for Union<T, D> {
    fn encode_size(&self, value: &T) -> Result<usize, Error> {
        let (tag, variant) = self.select(value)?;
        Ok(self.discriminant.encode_size(tag)? + variant.encode_size(value)?)
    }

    fn write(&self, value: &T, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        let (tag, variant) = self.select(value)?;
        let offset = self.discriminant.write(tag, buf, offset)?;
        variant.write(value, buf, offset)
    }
}

impl<T, D: Prefix> Decoder for Union<T, D> {
    type Output = T;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize), Error> {
        let (tag, offset) = self.discriminant.read_usize(bytes, offset)?;
        let Some((_, variant)) = self.variants.iter().find(|(existing, _)| *existing == tag) else {
            debug!(tag, offset, "invalid discriminant");
            return Err(Error::InvalidDiscriminant(tag));
        };
        variant.read(bytes, offset)
    }
}
