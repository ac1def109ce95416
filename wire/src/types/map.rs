//! Codec for key-value associations.
//!
//! A map is encoded exactly like an [Array] of `(key, value)` [Tuple]s: the same count strategy,
//! the same size category, and one entry after the other in the iteration order of the
//! association. Decoding collects the pairs back into the association, so when a key appears more
//! than once the last occurrence wins.
//!
//! Use [IndexMap] to encode entries in insertion order. A decoded [IndexMap] keeps every key at the
//! position of its first occurrence. [BTreeMap] encodes in key order, and [HashMap] in an order
//! that varies between runs.

use crate::{
    types::{
        array::{array, Array},
        number::Number,
        tuple::{tuple, Tuple},
    },
    Decoder, Encoder, Error, Length, Limit, Prefix, Size, Sizing,
};
use bytes::BytesMut;
use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};
use indexmap::IndexMap;
use tracing::trace;

/// A collection of key-value pairs that can be rebuilt from a sequence of entries.
pub trait Association: Default {
    /// The key type.
    type Key;
    /// The value type.
    type Value;

    /// The number of entries.
    fn len(&self) -> usize;

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all entries in encoding order.
    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;

    /// Inserts an entry, returning the value previously stored under `key`.
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> Association for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> Association for IndexMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }

    /// Replaces the value of an existing key in place, keeping its position.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        IndexMap::insert(self, key, value)
    }
}

impl<K: Ord, V> Association for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }
}

/// A codec for the association `M`, with keys encoded by `K` and values by `V`.
#[derive(Clone, Debug)]
pub struct Map<K, V, M, P = Number<u32>> {
    entries: Array<Tuple<(K, V)>, P>,
    _marker: PhantomData<fn() -> M>,
}

/// Returns a codec for associations of type `M` with the given count strategy.
///
/// # Panics
///
/// Panics if both `key` and `value` are zero-size and `length` is not [Length::Fixed].
pub fn map<M, K, V, P>(key: K, value: V, length: Length<P>) -> Map<K, V, M, P>
where
    M: Association,
    K: Sizing,
    V: Sizing,
    P: Prefix,
{
    Map {
        entries: array(tuple((key, value)), length),
        _marker: PhantomData,
    }
}

impl<K: Sizing, V: Sizing, M, P: Prefix> Map<K, V, M, P> {
    /// Returns a copy of this codec that rejects decoded entry counts outside `limit`.
    pub fn with_limit(self, limit: impl Into<Limit>) -> Self {
        Self {
            entries: self.entries.with_limit(limit),
            ..self
        }
    }

    fn key(&self) -> &K {
        &self.entries.item().codecs().0
    }

    fn value(&self) -> &V {
        &self.entries.item().codecs().1
    }
}

impl<K: Sizing, V: Sizing, M, P: Prefix> Sizing for Map<K, V, M, P> {
    fn size(&self) -> Size {
        self.entries.size()
    }
}

impl<K, V, M, P> Encoder<M> for Map<K, V, M, P>
where
    M: Association,
    K: Encoder<M::Key>,
    V: Encoder<M::Value>,
    P: Prefix,
{
    fn encode_size(&self, value: &M) -> Result<usize, Error> {
        let prefix = self.entries.count_size(value.len())?;
        match self.entries.item().size() {
            Size::Fixed(size) => Ok(prefix + size * value.len()),
            Size::Variable => value.entries().try_fold(prefix, |acc, (k, v)| {
                Ok(acc + self.key().encode_size(k)? + self.value().encode_size(v)?)
            }),
        }
    }

    fn write(&self, value: &M, buf: &mut BytesMut, offset: usize) -> Result<usize, Error> {
        let mut offset = self.entries.write_count(value.len(), buf, offset)?;
        for (k, v) in value.entries() {
            offset = self.key().write(k, buf, offset)?;
            offset = self.value().write(v, buf, offset)?;
        }
        Ok(offset)
    }
}

impl<K, V, M, P> Decoder for Map<K, V, M, P>
where
    M: Association<Key = K::Output, Value = V::Output>,
    K: Decoder,
    V: Decoder,
    P: Prefix,
{
    type Output = M;

    fn read(&self, bytes: &[u8], offset: usize) -> Result<(M, usize), Error> {
        let (pairs, end) = self.entries.read(bytes, offset)?;
        let mut result = M::default();
        for (index, (k, v)) in pairs.into_iter().enumerate() {
            if result.insert(k, v).is_some() {
                trace!(index, "duplicate map key overwritten");
            }
        }
        Ok((result, end))
    }
}
