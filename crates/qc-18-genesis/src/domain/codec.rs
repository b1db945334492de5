//! # Genesis Field Codecs
//!
//! Storage slots are written as up to 64 hex characters and widened to 32
//! bytes, right-aligned. Allocation keys are bare hex addresses.

use super::errors::{GenesisError, StorageSlotError};
use super::spec::GenesisAlloc;
use shared_types::StorageValue;

/// Decode storage key/value text into a 32-byte slot.
///
/// An optional `0x` prefix is stripped. Short values are left-padded with
/// zeroes, so `"0x01"` is slot one.
pub fn decode_storage_slot(text: &str) -> Result<StorageValue, StorageSlotError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    if digits.len() > 64 {
        return Err(StorageSlotError::TooManyHexCharacters(digits.to_string()));
    }
    let decoded =
        hex::decode(digits).map_err(|_| StorageSlotError::InvalidHex(digits.to_string()))?;

    let mut slot = [0u8; 32];
    slot[32 - decoded.len()..].copy_from_slice(&decoded);
    Ok(slot)
}

/// Full-width `0x` form of a storage slot.
pub fn encode_storage_slot(slot: &StorageValue) -> String {
    format!("0x{}", hex::encode(slot))
}

/// Decode a JSON allocation object keyed by unprefixed hex addresses.
pub fn decode_alloc(json: &[u8]) -> Result<GenesisAlloc, GenesisError> {
    Ok(serde_json::from_slice(json)?)
}

/// Account storage maps with [`decode_storage_slot`] keys and values.
///
/// Entries are applied in document order; a later key that decodes to the
/// same slot replaces the earlier one.
pub mod storage_map {
    use super::{decode_storage_slot, encode_storage_slot};
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use shared_types::{StorageKey, StorageValue};
    use std::collections::BTreeMap;
    use std::fmt;

    pub fn serialize<S>(
        storage: &BTreeMap<StorageKey, StorageValue>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(storage.len()))?;
        for (key, value) in storage {
            map.serialize_entry(&encode_storage_slot(key), &encode_storage_slot(value))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<StorageKey, StorageValue>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StorageVisitor)
    }

    struct StorageVisitor;

    impl<'de> Visitor<'de> for StorageVisitor {
        type Value = BTreeMap<StorageKey, StorageValue>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of hex storage keys to hex storage values")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut storage = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<String, String>()? {
                let key = decode_storage_slot(&key).map_err(de::Error::custom)?;
                let value = decode_storage_slot(&value).map_err(de::Error::custom)?;
                storage.insert(key, value);
            }
            Ok(storage)
        }
    }
}
