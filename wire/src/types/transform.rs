//! Codec that maps another codec onto a different logical type.
//!
//! The byte layout and size category are those of the inner codec.

use crate::{Decoder, Encoder, Error, Size, Sizing};
use bytes::BytesMut;
use std::marker::PhantomData;

/// A codec for `L`, stored on the wire as the `R` representation of codec `C`.
pub struct Transform<C, L, R, F, G> {
    inner: C,
    into: F,
    from: G,
    _marker: PhantomData<fn(&L) -> R>,
}

impl<C: Clone, L, R, F: Clone, G: Clone> Clone for Transform<C, L, R, F, G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            into: self.into.clone(),
            from: self.from.clone(),
            _marker: PhantomData,
        }
    }
}

/// Returns a codec for `L` built on `inner`.
///
/// `into` maps a logical value to the representation encoded by `inner`, and `from` maps a value
/// decoded by `inner` back to the logical type.
///
/// # Example
///
/// ```
/// use commonware_wire::{transform, u64, Decoder, Encoder};
/// use std::time::Duration;
///
/// let millis = transform(
///     u64(),
///     |d: &Duration| d.as_millis() as u64,
///     Duration::from_millis,
/// );
/// let encoded = millis.encode(&Duration::from_secs(1)).unwrap();
/// assert_eq!(&encoded[..], &1000u64.to_le_bytes());
/// assert_eq!(millis.decode(&encoded).unwrap(), Duration::from_secs(1));
/// ```
pub fn transform<C, L, R, F, G>(inner: C, into: F, from: G) -> Transform<C, L, R, F, G>
where
    C: Encoder<R> + Decoder,
    F: Fn(&L) -> R,
    G: Fn(C::Output) -> L,
{
    Transform {
        inner,
        into,
        from,
        _marker: PhantomData,
    }
}

impl<C, L, R, F, G> Transform<C, L, R, F, G> {
    /// The wrapped codec.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Sizing, L, R, F, G> Sizing for Transform<C, L, R, F, G> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<C, L, R, F, G> Encoder<L> for Transform<C, L, R, F, G>
where
    C: Encoder<R>,
    F: Fn(&L) -> R,
{
    fn encode_size(&self, value: &L) -> Result<usize, Error> {
        if let Size::Fixed(len) = self.inner.size() {
            return Ok(len);
        }
        self.inner.encode_size(&(self.into)(value))
    }

    fn write(&self, value: &L, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        self.inner.write(&(self.into)(value), buf, offset)
    }
}

impl<C, L, R, F, G> Decoder for Transform<C, L, R, F, G>
where
    C: Decoder,
    G: Fn(C::Output) -> L,
{
    type Output = L;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(L, usize), Error> {
        let (value, offset) = self.inner.read(bytes, offset)?;
        Ok(((self.from)(value), offset))
    }
}
