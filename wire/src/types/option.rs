//! Codec for optional values.
//!
//! Presence is recorded as a discriminant (a `u8` by default): `0` for [None], `1` for [Some]
//! followed by the inner encoding. Any other discriminant fails with
//! [Error::InvalidDiscriminant]. Optional values are always variable-size.

use crate::{
    types::number::{u8, Number},
    Decoder, Encoder, Error, Prefix, Size, Sizing,
};
use bytes::BytesMut;

const NONE: usize = 0;
const SOME: usize = 1;

/// A codec for `Option`s of values encoded with `C`.
#[derive(Clone, Debug)]
pub struct Optional<C, P = Number<u8>> {
    inner: C,
    prefix: P,
}

/// Returns a codec for optional values of `inner`.
pub fn option<C: Sizing>(inner: C) -> Optional<C> {
    Optional { inner, prefix: u8() }
}

impl<C: Sizing, P: Prefix> Optional<C, P> {
    /// Returns a copy of this codec that encodes the discriminant with `prefix`.
    pub fn with_prefix<Q: Prefix>(self, prefix: Q) -> Optional<C, Q> {
        Optional {
            inner: self.inner,
            prefix,
        }
    }
}

impl<C: Sizing, P: Prefix> Sizing for Optional<C, P> {
    fn size(&self) -> Size {
        Size::Variable
    }
}

impl<T, C: Encoder<T>, P: Prefix> Encoder<Option<T>> for Optional<C, P> {
    fn encode_size(&self, value: &Option<T>) -> Result<usize, Error> {
        match value {
            None => self.prefix.encode_size(&NONE),
            Some(inner) => Ok(self.prefix.encode_size(&SOME)? + self.inner.encode_size(inner)?),
        }
    }

    fn write(&self, value: &Option<T>, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        match value {
            None => self.prefix.write(&NONE, buf, offset),
            Some(inner) => {
                let offset = self.prefix.write(&SOME, buf, offset)?;
                self.inner.write(inner, buf, offset)
            }
        }
    }
}

impl<C: Decoder, P: Prefix> Decoder for Optional<C, P> {
    type Output = Option<C::Output>;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(Self::Output, usize), Error> {
        match self.prefix.read_usize(bytes, offset)? {
            (NONE, offset) => Ok((None, offset)),
            (SOME, offset) => {
                let (inner, offset) = self.inner.read(bytes, offset)?;
                Ok((Some(inner), offset))
            }
            (tag, _) => Err(Error::InvalidDiscriminant(tag)),
        }
    }
}
