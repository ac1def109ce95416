#![no_main]

use arbitrary::Arbitrary;
use commonware_wire::{
    array, base58, blob, boolean, field, map, option, short_u16, size_prefixed, structure, u16,
    u32, u64, u8, union, unit, utf8, Codec, Decoder, Encoder, Length,
};
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Deposit(u64),
    Note(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: u32,
    active: bool,
    events: Vec<Event>,
    owner: Option<String>,
    balances: BTreeMap<u16, u64>,
}

fn event() -> impl Codec<Event> {
    union::<Event>()
        .with_discriminant(u8())
        .variant(
            0,
            u64(),
            |e| match e {
                Event::Deposit(amount) => Some(amount),
                _ => None,
            },
            Event::Deposit,
        )
        .variant(
            1,
            utf8(Length::Prefixed(short_u16())),
            |e| match e {
                Event::Note(text) => Some(text),
                _ => None,
            },
            Event::Note,
        )
        .variant(
            2,
            unit(),
            |e| matches!(e, Event::Reset).then_some(&()),
            |()| Event::Reset,
        )
}

fn record() -> impl Codec<Record> {
    structure(
        (
            field("id", u32(), |r: &Record| &r.id),
            field("active", boolean(), |r: &Record| &r.active),
            field(
                "events",
                array(size_prefixed(event(), short_u16()), Length::Prefixed(u8())),
                |r: &Record| &r.events,
            ),
            field("owner", option(base58(Length::Prefixed(u8()))), |r: &Record| &r.owner),
            field(
                "balances",
                map(u16(), u64(), Length::Prefixed(u8())).with_limit(..=16usize),
                |r: &Record| &r.balances,
            ),
        ),
        |(id, active, events, owner, balances)| Record {
            id,
            active,
            events,
            owner,
            balances,
        },
    )
}

/// Decodes `data` and, on success, checks that the value survives another round trip.
fn decode_then_roundtrip<C, T>(codec: &C, data: &[u8])
where
    C: Codec<T>,
    T: PartialEq + std::fmt::Debug,
{
    let Ok(value) = codec.decode(data) else {
        return;
    };
    let encoded = codec.encode(&value).expect("Failed to encode a decoded value!");
    assert_eq!(codec.encode_size(&value).unwrap(), encoded.len());
    let decoded = codec.decode(&encoded).expect("Failed to decode a re-encoded value!");
    assert_eq!(value, decoded);
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    Record(&'a [u8]),
    Event(&'a [u8]),
    Text(&'a [u8]),
    Blob(&'a [u8]),
    Remainder(&'a [u8]),
    Read { data: &'a [u8], offset: u8 },
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Record(data) => decode_then_roundtrip(&record(), data),
        FuzzInput::Event(data) => decode_then_roundtrip(&event(), data),
        FuzzInput::Text(data) => {
            decode_then_roundtrip(&utf8(Length::Prefixed(short_u16())), data);
            decode_then_roundtrip(&base58(Length::remainder()), data);
        }
        FuzzInput::Blob(data) => {
            decode_then_roundtrip(&blob(Length::prefixed()).with_limit(..1024usize), data)
        }
        FuzzInput::Remainder(data) => {
            decode_then_roundtrip(&array(u32(), Length::remainder()), data)
        }
        FuzzInput::Read { data, offset } => {
            // Reading at any offset, in or out of bounds, never panics.
            if let Ok((_, end)) = record().read(data, offset as usize) {
                assert!(end <= data.len());
            }
        }
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
