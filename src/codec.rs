//! Conversions among the five encodings of a 128-bit UUID.
//!
//! | Encoding      | Length   | Alphabet                      |
//! | ------------- | -------- | ----------------------------- |
//! | raw bytes     | 16 bytes | `0x00`-`0xff`                 |
//! | binary string | 128      | `0`, `1`                      |
//! | hex string    | 32       | `0-9a-f` (any case on input)  |
//! | dashed UUID   | 36       | hex digits and `-` (8-4-4-4-12) |
//! | base 64       | 22       | `A-Z a-z 0-9 - _`, no padding |
//!
//! The base 64 form encodes the 128 bits behind a 4-bit zero header so that the 132-bit stream
//! splits into exactly 22 six-bit symbols. Decoding drops the first 4 bits of the stream.
//!
//! Every function here is pure. Lengths are counted in characters, and length mismatches are
//! reported as [`Error::Range`] while characters outside an alphabet are reported as
//! [`Error::Decoding`].
//!
//! ```rust
//! use uuid4::codec;
//!
//! let raw = *b"abcdefghij012345";
//! assert_eq!(&*codec::raw_to_hex(&raw)?, "6162636465664768a96a303132333435");
//! assert_eq!(&*codec::raw_to_base64(&raw)?, "BhYmNkZWZHaKlqMDEyMzQ1");
//! assert_eq!(
//!     &*codec::base64_to_uuid("BhYmNkZWZHaKlqMDEyMzQ1")?,
//!     "61626364-6566-4768-a96a-303132333435"
//! );
//! # Ok::<(), uuid4::Error>(())
//! ```

use std::{fmt, str};

use fstr::FStr;

use crate::{Error, Result};

/// Length of the raw byte form.
pub const RAW_LEN: usize = 16;

/// Length of the binary string form.
pub const BIN_LEN: usize = 128;

/// Length of the hexadecimal string form.
pub const HEX_LEN: usize = 32;

/// Length of the dashed 8-4-4-4-12 form.
pub const UUID_LEN: usize = 36;

/// Length of the custom base 64 form.
pub const BASE64_LEN: usize = 22;

/// Symbols of the URL-safe base 64 alphabet, indexed by six-bit value.
pub const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Reverse lookup of [`BASE64_ALPHABET`] for ASCII input; `0xff` marks non-members.
const BASE64_DECODE: [u8; 128] = {
    let mut table = [0xff; 128];
    let mut i = 0;
    while i < BASE64_ALPHABET.len() {
        table[BASE64_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Character offsets of the dashes in the 36-character form.
const DASH_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// Sets the version nibble to `0100` and the variant bits to `10`.
pub const fn force_v4(mut bytes: [u8; 16]) -> [u8; 16] {
    bytes[6] = bytes[6] & 0x0f | 0x40;
    bytes[8] = bytes[8] & 0x3f | 0x80;
    bytes
}

/// Returns `true` if the version nibble is `0100` and the variant bits are `10`.
pub const fn is_v4(bytes: &[u8; 16]) -> bool {
    bytes[6] & 0xf0 == 0x40 && bytes[8] & 0xc0 == 0x80
}

/// Fails with [`Error::InvalidUuid`] unless [`is_v4`] holds.
pub fn check_v4(bytes: &[u8; 16]) -> Result<()> {
    if is_v4(bytes) {
        Ok(())
    } else {
        Err(Error::InvalidUuid(format!(
            "Expected a v4 UUID with version 4 and variant bits 10 but was given version {} and variant bits {:02b}",
            bytes[6] >> 4,
            bytes[8] >> 6
        )))
    }
}

/// Copies one bucket of random data and folds the v4 bits into it.
pub fn raw_to_v4(raw: &[u8]) -> Result<[u8; 16]> {
    let bytes = <[u8; 16]>::try_from(raw).map_err(|_| {
        Error::Range(format!(
            "Expected data array length of {} but was given length: {}",
            RAW_LEN,
            raw.len()
        ))
    })?;
    Ok(force_v4(bytes))
}

fn ascii<const N: usize>(buffer: [u8; N]) -> FStr<N> {
    debug_assert!(buffer.is_ascii());
    // SAFETY: the encoders below write ASCII digits and alphabet symbols only
    unsafe { FStr::from_bytes_unchecked(buffer) }
}

/// Encodes bytes as 128 binary digits, most significant bit first.
pub fn encode_binary(bytes: &[u8; 16]) -> FStr<BIN_LEN> {
    let mut buffer = [b'0'; BIN_LEN];
    for (digits, byte) in buffer.chunks_exact_mut(8).zip(bytes) {
        for (i, digit) in digits.iter_mut().enumerate() {
            if byte & (0x80 >> i) != 0 {
                *digit = b'1';
            }
        }
    }
    ascii(buffer)
}

/// Encodes bytes as 32 lowercase hexadecimal digits.
pub fn encode_hex(bytes: &[u8; 16]) -> FStr<HEX_LEN> {
    let mut buffer = [0u8; HEX_LEN];
    for (pair, &e) in buffer.chunks_exact_mut(2).zip(bytes) {
        pair[0] = HEX_DIGITS[(e >> 4) as usize];
        pair[1] = HEX_DIGITS[(e & 15) as usize];
    }
    ascii(buffer)
}

/// Encodes bytes in the 8-4-4-4-12 dashed form.
pub fn encode_uuid(bytes: &[u8; 16]) -> FStr<UUID_LEN> {
    let mut buffer = [b'-'; UUID_LEN];
    let mut j = 0;
    for (i, &e) in bytes.iter().enumerate() {
        buffer[j] = HEX_DIGITS[(e >> 4) as usize];
        buffer[j + 1] = HEX_DIGITS[(e & 15) as usize];
        j += 2;
        if i == 3 || i == 5 || i == 7 || i == 9 {
            j += 1;
        }
    }
    ascii(buffer)
}

/// Encodes bytes as 22 base 64 symbols behind the 4-bit zero header.
pub fn encode_base64(bytes: &[u8; 16]) -> FStr<BASE64_LEN> {
    let value = u128::from_be_bytes(*bytes);
    let mut buffer = [0u8; BASE64_LEN];
    for (k, symbol) in buffer.iter_mut().enumerate() {
        // symbol k covers bits [6k, 6k + 6) of the 132-bit stream
        let shift = 126 - 6 * k;
        *symbol = BASE64_ALPHABET[(value >> shift) as usize & 63];
    }
    ascii(buffer)
}

fn check_len(input: &str, expected: usize, what: &str) -> Result<()> {
    let actual = input.chars().count();
    if actual == expected {
        Ok(())
    } else {
        Err(Error::Range(format!(
            "Expected {} length of {} characters but was given length: {}",
            what, expected, actual
        )))
    }
}

fn invalid_char(what: &str, c: char, position: usize) -> Error {
    Error::Decoding(format!(
        "{} contains invalid character {:?} at position {}",
        what, c, position
    ))
}

/// Packs 32 hex digits into bytes; positions are reported as given.
fn hex_bytes(digits: impl Iterator<Item = (usize, char)>, what: &str) -> Result<[u8; 16]> {
    let mut bytes = [0u8; 16];
    for (n, (position, c)) in digits.enumerate() {
        let nibble = c.to_digit(16).ok_or_else(|| invalid_char(what, c, position))? as u8;
        bytes[n / 2] |= if n % 2 == 0 { nibble << 4 } else { nibble };
    }
    Ok(bytes)
}

/// Decodes 128 binary digits.
pub fn decode_binary(input: &str) -> Result<[u8; 16]> {
    check_len(input, BIN_LEN, "binary string")?;
    let mut bytes = [0u8; 16];
    for (i, c) in input.chars().enumerate() {
        match c {
            '0' => {}
            '1' => bytes[i / 8] |= 0x80 >> (i % 8),
            _ => return Err(invalid_char("Binary string", c, i)),
        }
    }
    Ok(bytes)
}

/// Decodes 32 hexadecimal digits of either case.
pub fn decode_hex(input: &str) -> Result<[u8; 16]> {
    check_len(input, HEX_LEN, "hex string")?;
    hex_bytes(input.chars().enumerate(), "Hex string")
}

/// Decodes the dashed 8-4-4-4-12 form, requiring dashes exactly at offsets 8, 13, 18 and 23.
pub fn decode_uuid(input: &str) -> Result<[u8; 16]> {
    check_len(input, UUID_LEN, "UUID")?;
    for (i, c) in input.chars().enumerate() {
        if DASH_OFFSETS.contains(&i) != (c == '-') {
            return Err(Error::Decoding(format!(
                "UUID must have dashes at positions 8, 13, 18 and 23 only but was given {:?} at position {}",
                c, i
            )));
        }
    }
    let digits = input
        .chars()
        .enumerate()
        .filter(|(i, _)| !DASH_OFFSETS.contains(i));
    hex_bytes(digits, "UUID")
}

/// Decodes 22 base 64 symbols, dropping the 4-bit header.
pub fn decode_base64(input: &str) -> Result<[u8; 16]> {
    check_len(input, BASE64_LEN, "base 64 number")?;
    let mut value = 0u128;
    for (i, c) in input.chars().enumerate() {
        let index = match BASE64_DECODE.get(c as usize) {
            Some(&index) if index != 0xff => index,
            _ => return Err(invalid_char("Base 64 string", c, i)),
        };
        // the header bits are shifted out past bit 127
        value = (value << 6) | index as u128;
    }
    Ok(value.to_be_bytes())
}

/// Folds the v4 bits into 16 random bytes and encodes them as binary digits.
pub fn raw_to_binary(raw: &[u8]) -> Result<FStr<BIN_LEN>> {
    Ok(encode_binary(&raw_to_v4(raw)?))
}

/// Folds the v4 bits into 16 random bytes and encodes them as hex digits.
pub fn raw_to_hex(raw: &[u8]) -> Result<FStr<HEX_LEN>> {
    Ok(encode_hex(&raw_to_v4(raw)?))
}

/// Folds the v4 bits into 16 random bytes and encodes them in the dashed form.
pub fn raw_to_uuid(raw: &[u8]) -> Result<FStr<UUID_LEN>> {
    Ok(encode_uuid(&raw_to_v4(raw)?))
}

/// Folds the v4 bits into 16 random bytes and encodes them as base 64.
pub fn raw_to_base64(raw: &[u8]) -> Result<FStr<BASE64_LEN>> {
    Ok(encode_base64(&raw_to_v4(raw)?))
}

/// Re-encodes 128 binary digits as 32 hex digits.
pub fn binary_to_hex(input: &str) -> Result<FStr<HEX_LEN>> {
    Ok(encode_hex(&decode_binary(input)?))
}

/// Re-encodes 32 hex digits of either case as 128 binary digits.
pub fn hex_to_binary(input: &str) -> Result<FStr<BIN_LEN>> {
    Ok(encode_binary(&decode_hex(input)?))
}

/// Re-encodes 128 binary digits as 22 base 64 symbols.
pub fn binary_to_base64(input: &str) -> Result<FStr<BASE64_LEN>> {
    Ok(encode_base64(&decode_binary(input)?))
}

/// Re-encodes 22 base 64 symbols as 128 binary digits, dropping the header bits.
pub fn base64_to_binary(input: &str) -> Result<FStr<BIN_LEN>> {
    Ok(encode_binary(&decode_base64(input)?))
}

/// Inserts dashes into a 32-character string at the 8-4-4-4-12 group boundaries.
///
/// Only the length is checked; the characters are copied as given.
pub fn hex_to_uuid(input: &str) -> Result<String> {
    check_len(input, HEX_LEN, "hex string")?;
    let mut dst = String::with_capacity(UUID_LEN);
    for (i, c) in input.chars().enumerate() {
        if i == 8 || i == 12 || i == 16 || i == 20 {
            dst.push('-');
        }
        dst.push(c);
    }
    Ok(dst)
}

/// Removes the characters at offsets 8, 13, 18 and 23 of a 36-character string.
///
/// Only the length is checked; use [`decode_uuid`] to validate dash placement.
pub fn uuid_to_hex(input: &str) -> Result<String> {
    check_len(input, UUID_LEN, "UUID")?;
    Ok(input
        .chars()
        .enumerate()
        .filter(|(i, _)| !DASH_OFFSETS.contains(i))
        .map(|(_, c)| c)
        .collect())
}

/// Re-encodes 22 base 64 symbols as 32 lowercase hex digits.
pub fn base64_to_hex(input: &str) -> Result<FStr<HEX_LEN>> {
    Ok(encode_hex(&decode_base64(input)?))
}

/// Re-encodes 22 base 64 symbols in the dashed form.
pub fn base64_to_uuid(input: &str) -> Result<FStr<UUID_LEN>> {
    Ok(encode_uuid(&decode_base64(input)?))
}

/// Re-encodes 32 hex digits of either case as 22 base 64 symbols.
pub fn hex_to_base64(input: &str) -> Result<FStr<BASE64_LEN>> {
    Ok(encode_base64(&decode_hex(input)?))
}

/// Re-encodes the dashed form as 22 base 64 symbols, validating dash placement.
pub fn uuid_to_base64(input: &str) -> Result<FStr<BASE64_LEN>> {
    Ok(encode_base64(&decode_uuid(input)?))
}

/// Names one of the four textual encodings.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Encoding {
    Binary,
    Hex,
    Uuid,
    Base64,
}

impl Encoding {
    /// Every encoding, shortest first.
    pub const ALL: [Self; 4] = [Self::Base64, Self::Hex, Self::Uuid, Self::Binary];

    /// Returns the number of characters of the encoding.
    pub const fn char_len(self) -> usize {
        match self {
            Self::Binary => BIN_LEN,
            Self::Hex => HEX_LEN,
            Self::Uuid => UUID_LEN,
            Self::Base64 => BASE64_LEN,
        }
    }

    /// Picks the encoding whose length matches `input`.
    pub fn detect(input: &str) -> Result<Self> {
        let n = input.chars().count();
        Self::ALL
            .into_iter()
            .find(|e| e.char_len() == n)
            .ok_or_else(|| {
                Error::Range(format!(
                    "Expected UUID encoding length of 22, 32, 36 or 128 characters but was given length: {}",
                    n
                ))
            })
    }

    /// Decodes `input` written in this encoding.
    pub fn decode(self, input: &str) -> Result<[u8; 16]> {
        match self {
            Self::Binary => decode_binary(input),
            Self::Hex => decode_hex(input),
            Self::Uuid => decode_uuid(input),
            Self::Base64 => decode_base64(input),
        }
    }

    /// Encodes `bytes` in this encoding as is, without touching the v4 bits.
    pub fn encode(self, bytes: &[u8; 16]) -> String {
        match self {
            Self::Binary => encode_binary(bytes).to_string(),
            Self::Hex => encode_hex(bytes).to_string(),
            Self::Uuid => encode_uuid(bytes).to_string(),
            Self::Base64 => encode_base64(bytes).to_string(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Binary => "bin",
            Self::Hex => "hex",
            Self::Uuid => "uuid",
            Self::Base64 => "base64",
        })
    }
}

impl str::FromStr for Encoding {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "bin" | "binary" => Ok(Self::Binary),
            "hex" => Ok(Self::Hex),
            "uuid" => Ok(Self::Uuid),
            "base64" => Ok(Self::Base64),
            _ => Err(Error::Decoding(format!(
                "Expected one of bin, hex, uuid or base64 but was given {:?}",
                src
            ))),
        }
    }
}

/// Converts `input` from one textual encoding to another.
pub fn convert(input: &str, from: Encoding, to: Encoding) -> Result<String> {
    Ok(to.encode(&from.decode(input)?))
}
