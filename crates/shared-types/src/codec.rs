//! # JSON Field Codecs
//!
//! Serde helpers for the textual encodings used by genesis specification
//! files: `0x`-prefixed hex byte strings, fixed-width hex values and
//! integers written either as `0x` hex or as decimal.
//!
//! Use with `#[serde(with = "shared_types::codec::hex_bytes")]` and friends.

use crate::errors::CodecError;
use primitive_types::U256;

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex text, with or without a `0x` prefix.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, CodecError> {
    let digits = strip_hex_prefix(text);
    hex::decode(digits).map_err(|_| CodecError::InvalidHex(text.to_string()))
}

/// Decode hex text into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(text: &str) -> Result<[u8; N], CodecError> {
    let bytes = decode_hex(text)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CodecError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        })
}

/// Parse a `0x` hex or decimal u64. The empty string is zero.
pub fn parse_u64(text: &str) -> Result<u64, CodecError> {
    let invalid = || CodecError::InvalidInteger(text.to_string());
    if text.is_empty() {
        return Ok(0);
    }
    match hex_digits(text) {
        Some(digits) if digits.is_empty() => Err(invalid()),
        Some(digits) => u64::from_str_radix(digits, 16).map_err(|_| invalid()),
        None => text.parse::<u64>().map_err(|_| invalid()),
    }
}

/// Parse a `0x` hex or decimal 256-bit unsigned integer. The empty string is zero.
pub fn parse_u256(text: &str) -> Result<U256, CodecError> {
    let invalid = || CodecError::InvalidInteger(text.to_string());
    if text.is_empty() {
        return Ok(U256::zero());
    }
    match hex_digits(text) {
        Some(digits) if digits.is_empty() => Err(invalid()),
        Some(digits) => U256::from_str_radix(digits, 16).map_err(|_| invalid()),
        None => {
            if !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            U256::from_dec_str(text).map_err(|_| invalid())
        }
    }
}

fn strip_hex_prefix(text: &str) -> &str {
    hex_digits(text).unwrap_or(text)
}

fn hex_digits(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Variable-length byte strings as `0x` hex.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&super::encode_prefixed(bytes.as_ref()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::decode_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Optional byte strings; `None` serializes as `null`.
pub mod opt_hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => serializer.serialize_str(&super::encode_prefixed(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::decode_hex(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Fixed-width values (hashes, addresses, keys) as `0x` hex of exact length.
pub mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::encode_prefixed(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::decode_fixed::<N>(&text).map_err(serde::de::Error::custom)
    }
}

/// u64 as `0x` hex on output; hex string, decimal string or JSON number on input.
pub mod hex_or_decimal_u64 {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(U64Visitor)
    }

    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a hex string, decimal string or unsigned integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            super::parse_u64(v).map_err(E::custom)
        }
    }
}

/// U256 as `0x` hex on output; hex string, decimal string or JSON number on input.
///
/// Negative numbers are rejected.
pub mod hex_or_decimal_u256 {
    use primitive_types::U256;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(U256Visitor)
    }

    struct U256Visitor;

    impl<'de> Visitor<'de> for U256Visitor {
        type Value = U256;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative hex string, decimal string or integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
            super::parse_u256(v).map_err(E::custom)
        }
    }
}

/// Optional U256; `None` serializes as `null` and absent or `null` decodes as `None`.
pub mod opt_hex_or_decimal_u256 {
    use primitive_types::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::hex_or_decimal_u256::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "crate::codec::hex_or_decimal_u256")] U256);

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(value)| value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_accepts_optional_prefix() {
        assert_eq!(decode_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex("0102").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_rejects_odd_length() {
        assert!(matches!(decode_hex("0x123"), Err(CodecError::InvalidHex(_))));
    }

    #[test]
    fn test_decode_fixed_length_checked() {
        let err = decode_fixed::<20>("0x01").unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidLength {
                expected: 20,
                actual: 1
            }
        );
    }

    #[test]
    fn test_parse_u64_hex_and_decimal() {
        assert_eq!(parse_u64("0x2a").unwrap(), 42);
        assert_eq!(parse_u64("42").unwrap(), 42);
        assert_eq!(parse_u64("").unwrap(), 0);
        assert!(parse_u64("0x").is_err());
        assert!(parse_u64("-1").is_err());
        assert!(parse_u64("0x1ffffffffffffffff").is_err());
    }

    #[test]
    fn test_parse_u256_rejects_negative_and_garbage() {
        assert_eq!(parse_u256("1000").unwrap(), U256::from(1000u64));
        assert_eq!(parse_u256("0x3e8").unwrap(), U256::from(1000u64));
        assert!(parse_u256("-5").is_err());
        assert!(parse_u256("12ab").is_err());
    }

    #[test]
    fn test_parse_u256_large_decimal() {
        let value = parse_u256("1000000000000000000000000").unwrap();
        assert_eq!(value, U256::exp10(24));
    }

    #[test]
    fn test_u256_json_number_and_negative() {
        #[derive(serde::Deserialize)]
        struct Holder {
            #[serde(with = "hex_or_decimal_u256")]
            v: U256,
        }
        let h: Holder = serde_json::from_str(r#"{"v": 7}"#).unwrap();
        assert_eq!(h.v, U256::from(7u64));
        assert!(serde_json::from_str::<Holder>(r#"{"v": -7}"#).is_err());
    }
}
