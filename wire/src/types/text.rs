//! Mappings between human-readable strings and the bytes they represent.
//!
//! An [Encoding] only defines how text maps to bytes. Framing (fixed, prefixed or remainder) is
//! applied uniformly around it by [crate::types::string::Str].

use crate::Error;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::borrow::Cow;

/// A bidirectional mapping between text and bytes.
pub trait Encoding: Clone + Send + Sync {
    /// Name used in error messages.
    const NAME: &'static str;

    /// Converts text into the bytes it represents.
    fn to_bytes<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, Error>;

    /// Converts bytes into text.
    fn to_text(&self, bytes: &[u8]) -> Result<String, Error>;
}

/// UTF-8 text, stored as its own bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Utf8;

impl Encoding for Utf8 {
    const NAME: &'static str = "utf8";

    fn to_bytes<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, Error> {
        Ok(Cow::Borrowed(text.as_bytes()))
    }

    fn to_text(&self, bytes: &[u8]) -> Result<String, Error> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|err| invalid(Self::NAME, err))
    }
}

/// Hexadecimal text. Encodes to lowercase, accepts either case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base16;

impl Encoding for Base16 {
    const NAME: &'static str = "base16";

    fn to_bytes<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, Error> {
        if text.len() % 2 != 0 {
            return Err(invalid(Self::NAME, "odd number of digits"));
        }
        text.as_bytes()
            .chunks(2)
            .map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
            .collect::<Result<Vec<u8>, Error>>()
            .map(Cow::Owned)
    }

    fn to_text(&self, bytes: &[u8]) -> Result<String, Error> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            hex.push(DIGITS[(byte >> 4) as usize] as char);
            hex.push(DIGITS[(byte & 0x0F) as usize] as char);
        }
        Ok(hex)
    }
}

/// Converts one hexadecimal digit into its value.
fn nibble(digit: u8) -> Result<u8, Error> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(invalid(
            Base16::NAME,
            format!("invalid digit {:?}", digit as char),
        )),
    }
}

/// Base58 text using the Bitcoin alphabet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base58;

impl Encoding for Base58 {
    const NAME: &'static str = "base58";

    fn to_bytes<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, Error> {
        bs58::decode(text)
            .into_vec()
            .map(Cow::Owned)
            .map_err(|err| invalid(Self::NAME, err))
    }

    fn to_text(&self, bytes: &[u8]) -> Result<String, Error> {
        Ok(bs58::encode(bytes).into_string())
    }
}

/// Base64 text using the standard padded alphabet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base64;

impl Encoding for Base64 {
    const NAME: &'static str = "base64";

    fn to_bytes<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, Error> {
        BASE64
            .decode(text)
            .map(Cow::Owned)
            .map_err(|err| invalid(Self::NAME, err))
    }

    fn to_text(&self, bytes: &[u8]) -> Result<String, Error> {
        Ok(BASE64.encode(bytes))
    }
}

fn invalid(encoding: &'static str, message: impl ToString) -> Error {
    Error::InvalidEncodedText {
        encoding,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8() {
        assert_eq!(Utf8.to_bytes("héllo").unwrap().as_ref(), "héllo".as_bytes());
        assert_eq!(Utf8.to_text(b"abc").unwrap(), "abc");
        assert!(matches!(
            Utf8.to_text(&[0xFF, 0xFE]),
            Err(Error::InvalidEncodedText { encoding: "utf8", .. })
        ));
    }

    #[test]
    fn test_base16() {
        assert_eq!(Base16.to_bytes("00FFa1").unwrap().as_ref(), &[0x00, 0xFF, 0xA1]);
        assert_eq!(Base16.to_text(&[0x00, 0xFF, 0xA1]).unwrap(), "00ffa1");
        assert!(matches!(
            Base16.to_bytes("abc"),
            Err(Error::InvalidEncodedText { encoding: "base16", .. })
        ));
        assert!(matches!(
            Base16.to_bytes("zz"),
            Err(Error::InvalidEncodedText { encoding: "base16", .. })
        ));
    }

    #[test]
    fn test_base58() {
        assert_eq!(Base58.to_bytes("2g").unwrap().as_ref(), &[0x61]);
        assert_eq!(Base58.to_text(&[0x00, 0x00, 0x01]).unwrap(), "112");
        // '0', 'O', 'I' and 'l' are not in the alphabet.
        assert!(matches!(
            Base58.to_bytes("0OIl"),
            Err(Error::InvalidEncodedText { encoding: "base58", .. })
        ));
    }

    #[test]
    fn test_base64() {
        assert_eq!(Base64.to_bytes("aGVsbG8=").unwrap().as_ref(), b"hello");
        assert_eq!(Base64.to_text(b"hello").unwrap(), "aGVsbG8=");
        assert!(matches!(
            Base64.to_bytes("a*b="),
            Err(Error::InvalidEncodedText { encoding: "base64", .. })
        ));
    }
}
