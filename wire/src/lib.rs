//! Compose binary codecs from primitives.
//!
//! # Overview
//!
//! A library of codec values that:
//! - Encode structured data into a compact, schema-less binary layout
//! - Decode untrusted binary input back into structured data, failing with a typed [Error]
//!
//! Codecs are plain immutable values. Small primitives (numbers, strings, byte blobs) are combined
//! into larger ones (tuples, structs, arrays, maps, options, unions) by constructor functions, and
//! every codec reports whether its encoded length is a constant ([Size::Fixed]) or depends on the
//! value ([Size::Variable]).
//!
//! All framing is explicit: lengths, counts and discriminants are written by the combinators that
//! need them, little-endian and `u32` by default.
//!
//! # Supported Codecs
//!
//! - Numbers: [u8()] through [u128()], [i8()] through [i128()], [f32()], [f64()], [short_u16()]
//! - Bytes and text: [blob()], [utf8()], [base16()], [base58()], [base64()]
//! - Composites: [tuple()], [structure()], [array()], [map()], [option()], [union()]
//! - Wrappers: [size_prefixed()], [transform()]
//! - Others: [boolean()], [constant()], [unit()]
//!
//! # Example
//!
//! ```
//! use commonware_wire::{map, u8, utf8, Decoder, Encoder, Length};
//! use indexmap::IndexMap;
//!
//! // Five-byte keys, one-byte values, `u32` entry count
//! let codec = map(utf8(Length::fixed(5)), u8(), Length::prefixed());
//!
//! // Entries are written in insertion order
//! let balances = IndexMap::from([("alice".to_string(), 42u8), ("bob".to_string(), 5)]);
//! let encoded = codec.encode(&balances).unwrap();
//! assert_eq!(
//!     &encoded[..],
//!     &[2, 0, 0, 0, b'a', b'l', b'i', b'c', b'e', 42, b'b', b'o', b'b', 0, 0, 5]
//! );
//! assert_eq!(codec.decode(&encoded).unwrap(), balances);
//! ```
//!
//! # Example (Struct)
//!
//! ```
//! use commonware_wire::{
//!     array, field, option, structure, u16, u64, utf8, Decoder, Encoder, Length, Size, Sizing,
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Item {
//!     id: u64,
//!     name: String,
//!     tags: Vec<u16>,
//!     parent: Option<u64>,
//! }
//!
//! let codec = structure(
//!     (
//!         field("id", u64(), |i: &Item| &i.id),
//!         field("name", utf8(Length::prefixed()), |i: &Item| &i.name),
//!         field("tags", array(u16(), Length::prefixed()), |i: &Item| &i.tags),
//!         field("parent", option(u64()), |i: &Item| &i.parent),
//!     ),
//!     |(id, name, tags, parent)| Item { id, name, tags, parent },
//! );
//! assert_eq!(codec.size(), Size::Variable);
//!
//! let item = Item { id: 1, name: "root".into(), tags: vec![3, 4], parent: None };
//! let encoded = codec.encode(&item).unwrap();
//! assert_eq!(encoded.len(), codec.encode_size(&item).unwrap());
//! assert_eq!(codec.decode(&encoded).unwrap(), item);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;
pub mod util;
pub mod varint;

// Re-export main types and traits
pub use codec::{Codec, Decoder, Encoder, Prefix, Size, Sizing};
pub use config::{Endian, Length, Limit};
pub use error::Error;
pub use types::{
    array::{array, Array},
    blob::{blob, Blob},
    boolean::{boolean, Boolean},
    constant::{constant, unit, Constant},
    map::{map, Association, Map},
    number::{f32, f64, i128, i16, i32, i64, i8, u128, u16, u32, u64, u8, Number},
    option::{option, Optional},
    prefixed::{size_prefixed, SizePrefixed},
    string::{base16, base58, base64, utf8, Str},
    structure::{field, structure, Field, Fields, Struct},
    text::{Base16, Base58, Base64, Encoding, Utf8},
    transform::{transform, Transform},
    tuple::{tuple, Tuple},
    union::{union, Union},
};
pub use varint::{short_u16, ShortU16};
