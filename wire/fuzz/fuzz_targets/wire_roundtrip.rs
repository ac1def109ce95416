#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use commonware_wire::{
    array, base16, base58, base64, blob, boolean, map, option, short_u16, size_prefixed, tuple,
    u128, u16, u32, u64, u8, utf8, Codec, Decoder, Encoder, Encoding, Error, Length, Prefix, Size,
    Sizing, Str,
};
use indexmap::IndexMap;
use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, HashMap};

fn roundtrip<T, C>(codec: &C, value: &T)
where
    T: PartialEq + std::fmt::Debug + ?Sized,
    C: Codec<T, T::Owned>,
    T: ToOwned,
    T::Owned: PartialEq + std::fmt::Debug,
{
    let encoded = codec.encode(value).expect("Failed to encode value!");
    assert_eq!(codec.encode_size(value).unwrap(), encoded.len());
    if let Size::Fixed(len) = codec.size() {
        assert_eq!(encoded.len(), len);
    }
    let decoded = codec.decode(&encoded).expect("Failed to decode an encoded value!");
    assert_eq!(value.to_owned(), decoded);
}

fn roundtrip_primitive_f32(v: f32) {
    let codec = commonware_wire::f32();
    let encoded = codec.encode(&v).unwrap();
    let decoded = codec.decode(&encoded).expect("Failed to decode f32!");
    if v.is_nan() && decoded.is_nan() {
        // Ignore the NaN case
        return;
    }
    assert_eq!(v, decoded);
}

fn roundtrip_primitive_f64(v: f64) {
    let codec = commonware_wire::f64().big_endian();
    let encoded = codec.encode(&v).unwrap();
    let decoded = codec.decode(&encoded).expect("Failed to decode f64!");
    if v.is_nan() && decoded.is_nan() {
        // Ignore the NaN case
        return;
    }
    assert_eq!(v, decoded);
}

fn roundtrip_fixed_text(text: &str, len: u8) {
    let codec = utf8(Length::fixed(len as usize));
    match codec.encode(text) {
        Ok(encoded) => {
            assert_eq!(encoded.len(), len as usize);
            // Trailing zero bytes are indistinguishable from padding.
            let decoded = codec.decode(&encoded).expect("Failed to decode fixed text!");
            assert_eq!(text.trim_end_matches('\0'), decoded);
        }
        Err(Error::LengthExceeded { found, max }) => {
            assert_eq!(found, text.len());
            assert_eq!(max, len as usize);
            assert!(text.len() > len as usize);
        }
        Err(err) => panic!("unexpected error: {err}"),
    }
}

fn reencode<E: Encoding, P: Prefix>(codec: &Str<E, P>, framed: &[u8]) {
    let text = codec.decode(framed).expect("Failed to decode text!");
    let encoded = codec.encode(text.as_str()).expect("Failed to re-encode text!");
    assert_eq!(&encoded[..], framed);
}

fn roundtrip_binary_text(bytes: &[u8]) {
    // Any byte string has a text form that maps back to exactly those bytes.
    reencode(&base16(Length::remainder()), bytes);
    reencode(&base58(Length::remainder()), bytes);
    reencode(&base64(Length::remainder()), bytes);

    let framed = blob(Length::Prefixed(u32())).encode(bytes).unwrap();
    reencode(&base58(Length::Prefixed(u32())), &framed);
}

fn roundtrip_ordered_map(entries: Vec<(u16, u32)>) {
    let value: IndexMap<u16, u32> = entries.into_iter().collect();
    let codec = map(u16(), u32(), Length::prefixed());
    let encoded = codec.encode(&value).unwrap();
    let decoded: IndexMap<u16, u32> = codec.decode(&encoded).expect("Failed to decode map!");
    assert!(value.iter().eq(decoded.iter()));
}

fn roundtrip_short_u16(v: u16) {
    let codec = short_u16();
    let encoded = codec.encode(&v).unwrap();
    assert!((1..=3).contains(&encoded.len()));
    roundtrip(&codec, &v);
}

fn roundtrip_truncated_u64(v: u128) {
    match u64().encode(&v) {
        Ok(encoded) => assert_eq!(u64().decode(&encoded).unwrap() as u128, v),
        Err(Error::NumberOutOfRange { .. }) => assert!(v > u64::MAX as u128),
        Err(err) => panic!("unexpected error: {err}"),
    }
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    Blob(&'a [u8]),
    Text(String),
    FixedText(String, u8),
    BinaryText(&'a [u8]),

    // Collections
    Map(HashMap<u64, u64>),
    BTreeMap(BTreeMap<String, u32>),
    OrderedMap(Vec<(u16, u32)>),
    Vec(Vec<u16>),
    Nested(Vec<Vec<u8>>),
    Framed(Vec<String>),

    // Option type
    OptionSome(u32),
    OptionNone,

    // Tuples
    Tuple2(u8, u16),
    Tuple3(u32, u64, u128),

    // Compact integers
    ShortU16(u16),
    Narrowing(u128),

    // Primitive inputs!
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Blob(it) => roundtrip(&blob(Length::prefixed()), &Bytes::copy_from_slice(it)),
        FuzzInput::Text(it) => roundtrip(&utf8(Length::prefixed()), it.as_str()),
        FuzzInput::FixedText(it, len) => roundtrip_fixed_text(&it, len),
        FuzzInput::BinaryText(it) => roundtrip_binary_text(it),
        // Collections
        FuzzInput::Map(it) => roundtrip(&map(u64(), u64(), Length::prefixed()), &it),
        FuzzInput::BTreeMap(it) => roundtrip(
            &map(utf8(Length::Prefixed(short_u16())), u32(), Length::prefixed()),
            &it,
        ),
        FuzzInput::OrderedMap(it) => roundtrip_ordered_map(it),
        FuzzInput::Vec(it) => roundtrip(&array(u16(), Length::remainder()), &it),
        FuzzInput::Nested(it) => roundtrip(
            &array(array(u8(), Length::prefixed()), Length::prefixed()),
            &it,
        ),
        FuzzInput::Framed(it) => roundtrip(
            &array(
                size_prefixed(utf8(Length::remainder()), u32()),
                Length::remainder(),
            ),
            &it,
        ),
        // Option types
        FuzzInput::OptionSome(v) => roundtrip(&option(u32()), &Some(v)),
        FuzzInput::OptionNone => roundtrip(&option(u32()), &None::<u32>),
        // Tuples
        FuzzInput::Tuple2(a, b) => roundtrip(&tuple((u8(), u16())), &(a, b)),
        FuzzInput::Tuple3(a, b, c) => roundtrip(&tuple((u32(), u64(), u128())), &(a, b, c)),
        // Compact integers
        FuzzInput::ShortU16(v) => roundtrip_short_u16(v),
        FuzzInput::Narrowing(v) => roundtrip_truncated_u64(v),
        // Fixed-width primitives
        FuzzInput::Bool(v) => roundtrip(&boolean(), &v),
        FuzzInput::U8(v) => roundtrip(&u8(), &v),
        FuzzInput::U16(v) => roundtrip(&u16().big_endian(), &v),
        FuzzInput::U32(v) => roundtrip(&u32(), &v),
        FuzzInput::U64(v) => roundtrip(&u64(), &v),
        FuzzInput::U128(v) => roundtrip(&u128(), &v),
        FuzzInput::I8(v) => roundtrip(&commonware_wire::i8(), &v),
        FuzzInput::I16(v) => roundtrip(&commonware_wire::i16(), &v),
        FuzzInput::I32(v) => roundtrip(&commonware_wire::i32().big_endian(), &v),
        FuzzInput::I64(v) => roundtrip(&commonware_wire::i64(), &v),
        FuzzInput::I128(v) => roundtrip(&commonware_wire::i128(), &v),
        FuzzInput::F32(v) => roundtrip_primitive_f32(v),
        FuzzInput::F64(v) => roundtrip_primitive_f64(v),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
