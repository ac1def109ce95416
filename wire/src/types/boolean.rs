//! Codec for `bool` values.

use crate::{
    types::number::{u8, Number},
    Decoder, Encoder, Error, Prefix, Size, Sizing,
};
use bytes::BytesMut;

/// A codec for `bool`, stored as a number that is either `0` or `1`.
#[derive(Clone, Copy, Debug)]
pub struct Boolean<P = Number<u8>> {
    number: P,
}

/// Returns a one-byte `bool` codec.
pub fn boolean() -> Boolean {
    Boolean { number: u8() }
}

impl<P: Prefix> Boolean<P> {
    /// Returns a copy of this codec that stores the value with `number`.
    pub fn with_number<Q: Prefix>(self, number: Q) -> Boolean<Q> {
        Boolean { number }
    }
}

impl<P: Prefix> Sizing for Boolean<P> {
    fn size(&self) -> Size {
        self.number.size()
    }
}

impl<P: Prefix> Encoder<bool> for Boolean<P> {
    #[inline]
    fn encode_size(&self, value: &bool) -> Result<usize, Error> {
        self.number.encode_size(&usize::from(*value))
    }

    #[inline]
    fn write(&self, value: &bool, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        self.number.write(&usize::from(*value), buf, offset)
    }
}

impl<P: Prefix> Decoder for Boolean<P> {
    type Output = bool;

    #[inline]
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(bool, usize), Error> {
        match self.number.read_usize(bytes, offset) {
            Ok((0, end)) => Ok((false, end)),
            Ok((1, end)) => Ok((true, end)),
            Ok(_) | Err(Error::NumberOutOfRange { .. }) => Err(Error::InvalidBool),
            Err(err) => Err(err),
        }
    }
}
