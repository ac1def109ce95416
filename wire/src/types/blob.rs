//! Codec for raw byte blobs.
//!
//! Uses the same [Length] strategies as strings, without any text mapping. Fixed-length blobs
//! are padded on encode but returned verbatim (padding included) on decode.

use crate::{Decoder, Encoder, Error, Length, Limit, Prefix, Size, Sizing};
use bytes::{Bytes, BytesMut};

/// A codec for raw bytes.
#[derive(Clone, Debug)]
pub struct Blob<P> {
    length: Length<P>,
    pad: u8,
    limit: Limit,
}

/// Returns a raw byte codec with the given length strategy.
pub fn blob<P: Prefix>(length: Length<P>) -> Blob<P> {
    Blob {
        length,
        pad: 0,
        limit: Limit::default(),
    }
}

impl<P: Prefix> Blob<P> {
    /// Returns a copy of this codec that pads fixed-length values with `pad` instead of zero.
    pub fn with_padding(self, pad: u8) -> Self {
        Self { pad, ..self }
    }

    /// Returns a copy of this codec that rejects decoded length prefixes outside `limit`.
    pub fn with_limit(self, limit: impl Into<Limit>) -> Self {
        Self {
            limit: limit.into(),
            ..self
        }
    }
}

impl<P: Prefix> Sizing for Blob<P> {
    fn size(&self) -> Size {
        self.length.bytes_size()
    }
}

impl<P: Prefix> Encoder<[u8]> for Blob<P> {
    #[inline]
    fn encode_size(&self, value: &[u8]) -> Result<usize, Error> {
        self.length.bytes_encode_size(value.len())
    }

    #[inline]
    fn write(&self, value: &[u8], buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        self.length.write_bytes(value, self.pad, buf, offset)
    }
}

// Owned and fixed-size forms delegate to the slice encoder.
macro_rules! impl_blob_encoder {
    ($([$($generics:tt)*] $type:ty),*) => {
        $(
            impl<P: Prefix, $($generics)*> Encoder<$type> for Blob<P> {
                #[inline]
                fn encode_size(&self, value: &$type) -> Result<usize, Error> {
                    Encoder::<[u8]>::encode_size(self, &value[..])
                }

                #[inline]
                fn write(
                    &self,
                    value: &$type,
                    buf: &mut BytesMut,
                    offset: usize,
                ) -> Result<usize, Error> {
                    Encoder::<[u8]>::write(self, &value[..], buf, offset)
                }
            }
        )*
    };
}

impl_blob_encoder!([] Vec<u8>, [] Bytes, [const N: usize] [u8; N]);

impl<P: Prefix> Decoder for Blob<P> {
    type Output = Bytes;

    #[inline]
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(Bytes, usize), Error> {
        let (payload, end) = self.length.read_bytes(bytes, offset, &self.limit)?;
        Ok((Bytes::copy_from_slice(payload), end))
    }
}
