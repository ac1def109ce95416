//! Configuration shared by codec constructors.

use crate::{
    types::number::{u32, Number},
    util::{at_least, fill, put, remainder},
    Error, Prefix, Size,
};
use bytes::BytesMut;
use core::ops::{Bound, RangeBounds};

/// Byte order of a numeric codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant byte first (the wire default).
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// How the length of a string, byte blob, array or map is determined.
///
/// For strings and blobs the length is a number of bytes. For arrays and maps it is a number of
/// items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Length<P = Number<u32>> {
    /// Exactly `n` bytes (or items), with no prefix.
    Fixed(usize),
    /// Preceded by a numeric codec recording the length.
    Prefixed(P),
    /// No prefix. Decoding consumes every remaining byte of the current slice.
    Remainder,
}

impl Length {
    /// A fixed length of `len`, using the default prefix type.
    pub const fn fixed(len: usize) -> Self {
        Self::Fixed(len)
    }

    /// A length prefixed by a little-endian `u32` (the wire default).
    pub const fn prefixed() -> Self {
        Self::Prefixed(u32())
    }

    /// A remainder length, using the default prefix type.
    pub const fn remainder() -> Self {
        Self::Remainder
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::prefixed()
    }
}

impl<P: Prefix> Length<P> {
    /// Size category of a byte payload framed by this strategy.
    pub(crate) fn bytes_size(&self) -> Size {
        match self {
            Self::Fixed(len) => Size::Fixed(*len),
            _ => Size::Variable,
        }
    }

    /// Encoded size of a `len`-byte payload framed by this strategy.
    pub(crate) fn bytes_encode_size(&self, len: usize) -> Result<usize, Error> {
        match self {
            Self::Fixed(fixed) => Ok(*fixed),
            Self::Prefixed(prefix) => Ok(prefix.encode_size(&len)? + len),
            Self::Remainder => Ok(len),
        }
    }

    /// Writes `payload` framed by this strategy.
    ///
    /// Fixed-length payloads shorter than the slot are padded with `pad`.
    pub(crate) fn write_bytes(
        &self,
        payload: &[u8],
        pad: u8,
        buf: &mut BytesMut,
        offset: usize,
    ) -> Result<usize, Error> {
        match self {
            Self::Fixed(fixed) => {
                if payload.len() > *fixed {
                    return Err(Error::LengthExceeded {
                        found: payload.len(),
                        max: *fixed,
                    });
                }
                let offset = put(buf, offset, payload);
                Ok(fill(buf, offset, fixed - payload.len(), pad))
            }
            Self::Prefixed(prefix) => {
                let offset = prefix.write(&payload.len(), buf, offset)?;
                Ok(put(buf, offset, payload))
            }
            Self::Remainder => Ok(put(buf, offset, payload)),
        }
    }

    /// Reads a byte payload framed by this strategy, returning it without copying.
    pub(crate) fn read_bytes<'a>(
        &self,
        bytes: &'a [u8],
        offset: usize,
        limit: &Limit,
    ) -> Result<(&'a [u8], usize), Error> {
        let (len, offset) = match self {
            Self::Fixed(fixed) => (*fixed, offset),
            Self::Prefixed(prefix) => {
                let (len, offset) = prefix.read_usize(bytes, offset)?;
                limit.check(len)?;
                (len, offset)
            }
            Self::Remainder => {
                let payload = remainder(bytes, offset)?;
                return Ok((payload, offset + payload.len()));
            }
        };
        let payload = at_least(bytes, offset, len)?;
        Ok((payload, offset + len))
    }
}

/// Bounds on a decoded length or count.
///
/// Prefixed lengths come from untrusted input. A limit rejects lengths outside the configured range
/// before any allocation happens.
///
/// # Examples
///
/// ```
/// use commonware_wire::Limit;
///
/// // Limit lengths to 0..=1024
/// let limit = Limit::new(0..=1024);
/// assert!(limit.contains(500));
/// assert!(!limit.contains(2000));
///
/// // Allow any length >= 1
/// let limit = Limit::new(1..);
/// assert!(limit.contains(1));
/// assert!(!limit.contains(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Limit {
    start: Bound<usize>,
    end: Bound<usize>,
}

impl Limit {
    /// Creates a limit from any range of `usize`.
    pub fn new(r: impl RangeBounds<usize>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a limit that accepts exactly `value`.
    pub fn exact(value: usize) -> Self {
        Self::new(value..=value)
    }

    /// Returns true if `value` is within this limit.
    pub fn contains(&self, value: usize) -> bool {
        (self.start, self.end).contains(&value)
    }

    /// Returns [Error::InvalidLength] if `value` is outside this limit.
    pub(crate) fn check(&self, value: usize) -> Result<(), Error> {
        if !self.contains(value) {
            return Err(Error::InvalidLength(value));
        }
        Ok(())
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::new(..)
    }
}

macro_rules! impl_limit_from {
    ($($range:ty),*) => {
        $(
            impl From<$range> for Limit {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_limit_from!(
    core::ops::Range<usize>,
    core::ops::RangeInclusive<usize>,
    core::ops::RangeFrom<usize>,
    core::ops::RangeTo<usize>,
    core::ops::RangeToInclusive<usize>,
    core::ops::RangeFull
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::number::u8;

    #[test]
    fn test_limit_bounds() {
        let limit = Limit::new(2..5);
        assert!(!limit.contains(1));
        assert!(limit.contains(2));
        assert!(limit.contains(4));
        assert!(!limit.contains(5));

        let limit = Limit::exact(3);
        assert!(limit.contains(3));
        assert!(!limit.contains(4));

        assert!(Limit::default().contains(usize::MAX));
        assert!(Limit::from(..=7usize).contains(7));
        assert_eq!(Limit::new(..3).check(3), Err(Error::InvalidLength(3)));
    }

    #[test]
    fn test_fixed_bytes() {
        let length = Length::fixed(4);
        let mut buf = BytesMut::new();
        let end = length.write_bytes(b"ab", 0, &mut buf, 0).unwrap();
        assert_eq!(end, 4);
        assert_eq!(&buf[..], b"ab\0\0");

        let (payload, end) = length.read_bytes(&buf, 0, &Limit::default()).unwrap();
        assert_eq!((payload, end), (&b"ab\0\0"[..], 4));

        assert_eq!(
            length.write_bytes(b"abcde", 0, &mut buf, 0),
            Err(Error::LengthExceeded { found: 5, max: 4 })
        );
    }

    #[test]
    fn test_prefixed_bytes() {
        let length = Length::Prefixed(u8());
        assert_eq!(length.bytes_encode_size(3).unwrap(), 4);

        let mut buf = BytesMut::new();
        length.write_bytes(b"abc", 0, &mut buf, 0).unwrap();
        assert_eq!(&buf[..], b"\x03abc");

        let (payload, end) = length.read_bytes(&buf, 0, &Limit::default()).unwrap();
        assert_eq!((payload, end), (&b"abc"[..], 4));
        assert_eq!(
            length.read_bytes(&buf, 0, &Limit::new(..3)),
            Err(Error::InvalidLength(3))
        );
    }

    #[test]
    fn test_remainder_bytes() {
        let length = Length::remainder();
        let (payload, end) = length
            .read_bytes(b"xyz", 1, &Limit::default())
            .unwrap();
        assert_eq!((payload, end), (&b"yz"[..], 3));
    }
}
