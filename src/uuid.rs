use std::{fmt, str};

use fstr::FStr;

use crate::codec::{self, BASE64_LEN, BIN_LEN, HEX_LEN, UUID_LEN};
use crate::{Error, Result};

/// Represents a Universally Unique IDentifier as 16 big-endian bytes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUIDv4 from one bucket of random bytes by setting the version and variant bits.
    pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(codec::force_v4(bytes))
    }

    /// Returns `true` if the version nibble reads `4` and the variant bits read `10`.
    pub const fn is_v4(&self) -> bool {
        codec::is_v4(&self.0)
    }

    /// Returns the version nibble.
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4::Uuid;
    ///
    /// let x = "61626364-6566-4768-a96a-303132333435".parse::<Uuid>()?;
    /// assert_eq!(&x.encode() as &str, "61626364-6566-4768-a96a-303132333435");
    /// assert_eq!(&x.encode_hex() as &str, "6162636465664768a96a303132333435");
    /// assert_eq!(&x.encode_base64() as &str, "BhYmNkZWZHaKlqMDEyMzQ1");
    /// # Ok::<(), uuid4::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<UUID_LEN> {
        codec::encode_uuid(&self.0)
    }

    /// Returns the 32-digit lowercase hexadecimal representation.
    pub fn encode_hex(&self) -> FStr<HEX_LEN> {
        codec::encode_hex(&self.0)
    }

    /// Returns the 128-digit binary representation.
    pub fn encode_bin(&self) -> FStr<BIN_LEN> {
        codec::encode_binary(&self.0)
    }

    /// Returns the 22-character custom base 64 representation.
    pub fn encode_base64(&self) -> FStr<BASE64_LEN> {
        codec::encode_base64(&self.0)
    }

    /// Creates an object from the 128-digit binary representation.
    pub fn parse_bin(src: &str) -> Result<Self> {
        codec::decode_binary(src).map(Self)
    }

    /// Creates an object from the 32-digit hexadecimal representation of either case.
    pub fn parse_hex(src: &str) -> Result<Self> {
        codec::decode_hex(src).map(Self)
    }

    /// Creates an object from the 8-4-4-4-12 hexadecimal representation.
    pub fn parse_dashed(src: &str) -> Result<Self> {
        codec::decode_uuid(src).map(Self)
    }

    /// Creates an object from the 22-character custom base 64 representation.
    pub fn parse_base64(src: &str) -> Result<Self> {
        codec::decode_base64(src).map(Self)
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from any of the four string representations, telling them apart by
    /// length.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        codec::Encoding::detect(src)?.decode(src).map(Self)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_de_tokens, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "61626364-6566-4768-a96a-303132333435",
                    &[
                        97, 98, 99, 100, 101, 102, 71, 104, 169, 106, 48, 49, 50, 51, 52, 53,
                    ],
                ),
                (
                    "f0f0f0f0-f0f0-40f0-b0f0-f0f0f0f0f0f0",
                    &[
                        240, 240, 240, 240, 240, 240, 64, 240, 176, 240, 240, 240, 240, 240, 240,
                        240,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Deserializes other string encodings
        #[test]
        fn deserializes_other_string_encodings() {
            let e = Uuid::from(*b"abcdefGh\xa9j012345");
            assert_de_tokens(&e.readable(), &[Token::Str("BhYmNkZWZHaKlqMDEyMzQ1")]);
            assert_de_tokens(
                &e.readable(),
                &[Token::Str("6162636465664768A96A303132333435")],
            );
        }
    }
}
