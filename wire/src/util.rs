//! Utility functions for reading and writing at explicit offsets

use crate::Error;
use bytes::BytesMut;

/// Returns the `len` bytes of `bytes` starting at `offset`, or an error if fewer remain.
#[inline]
pub fn at_least(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], Error> {
    let remaining = bytes.len().saturating_sub(offset);
    if remaining < len || offset > bytes.len() {
        return Err(Error::UnexpectedEndOfInput {
            expected: len,
            offset,
            remaining,
        });
    }
    Ok(&bytes[offset..offset + len])
}

/// Returns every byte of `bytes` from `offset` on.
#[inline]
pub fn remainder(bytes: &[u8], offset: usize) -> Result<&[u8], Error> {
    at_least(bytes, offset, bytes.len().saturating_sub(offset))
}

/// Returns the mutable window `[offset, offset + len)` of `buf`, zero-extending it if needed.
#[inline]
pub fn reserve(buf: &mut BytesMut, offset: usize, len: usize) -> &mut [u8] {
    let end = offset + len;
    if buf.len() < end {
        buf.resize(end, 0);
    }
    &mut buf[offset..end]
}

/// Copies `src` into `buf` at `offset`, returning the offset just past it.
#[inline]
pub fn put(buf: &mut BytesMut, offset: usize, src: &[u8]) -> usize {
    reserve(buf, offset, src.len()).copy_from_slice(src);
    offset + src.len()
}

/// Fills `buf[offset..offset + len]` with `byte`, returning the offset just past it.
#[inline]
pub fn fill(buf: &mut BytesMut, offset: usize, len: usize, byte: u8) -> usize {
    reserve(buf, offset, len).fill(byte);
    offset + len
}
