//! # Genesis Specification
//!
//! The declarative description of block 0, as read from a genesis JSON file.

use super::codec::storage_map;
use crate::ports::HeaderFactory;
use qc_14_sharding::ShardState;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared_types::codec::{
    decode_fixed, hex_array, hex_bytes, hex_or_decimal_u256, hex_or_decimal_u64, opt_hex_bytes,
};
use shared_types::{Address, ChainConfig, Hash, StorageKey, StorageValue, U256};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Epoch of the genesis block.
pub const GENESIS_EPOCH: u64 = 0;

/// Genesis specification.
///
/// `alloc`, `gasLimit`, `shardStateHash` and `shardState` are required in
/// JSON; everything else defaults to zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genesis {
    /// Chain configuration. `None` resolves to
    /// [`ChainConfig::all_protocol_changes`].
    #[serde(default)]
    pub config: Option<ChainConfig>,

    /// Header factory override. Not part of the file format.
    #[serde(skip)]
    pub factory: Option<Arc<dyn HeaderFactory>>,

    #[serde(default, with = "hex_or_decimal_u64")]
    pub nonce: u64,

    #[serde(rename = "shardID", default)]
    pub shard_id: u32,

    #[serde(default, with = "hex_or_decimal_u64")]
    pub timestamp: u64,

    #[serde(default, with = "hex_bytes")]
    pub extra_data: Vec<u8>,

    #[serde(with = "hex_or_decimal_u64")]
    pub gas_limit: u64,

    #[serde(default, with = "hex_array")]
    pub mix_hash: Hash,

    #[serde(default, with = "hex_array")]
    pub coinbase: Address,

    pub alloc: GenesisAlloc,

    /// Declared digest of `shard_state`; carried into the header as given.
    #[serde(with = "hex_array")]
    pub shard_state_hash: Hash,

    pub shard_state: ShardState,

    // Only meaningful in tests; commit rejects anything but 0.
    #[serde(default, with = "hex_or_decimal_u64")]
    pub number: u64,

    #[serde(default, with = "hex_or_decimal_u64")]
    pub gas_used: u64,

    #[serde(default, with = "hex_array")]
    pub parent_hash: Hash,
}

impl Genesis {
    pub fn from_json(json: &[u8]) -> Result<Self, super::GenesisError> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn to_json(&self) -> Result<String, super::GenesisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An account in the genesis allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "hex_bytes")]
    pub code: Vec<u8>,

    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        with = "storage_map"
    )]
    pub storage: BTreeMap<StorageKey, StorageValue>,

    #[serde(with = "hex_or_decimal_u256")]
    pub balance: U256,

    #[serde(default, skip_serializing_if = "is_zero", with = "hex_or_decimal_u64")]
    pub nonce: u64,

    /// Test-only; never touches state.
    #[serde(
        rename = "secretKey",
        default,
        skip_serializing_if = "Option::is_none",
        with = "opt_hex_bytes"
    )]
    pub private_key: Option<Vec<u8>>,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl GenesisAccount {
    pub fn with_balance(balance: U256) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }
}

/// Initial accounts of the chain, keyed by address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenesisAlloc(BTreeMap<Address, GenesisAccount>);

impl GenesisAlloc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the account at `address`.
    pub fn insert(&mut self, address: Address, account: GenesisAccount) -> Option<GenesisAccount> {
        self.0.insert(address, account)
    }

    pub fn get(&self, address: &Address) -> Option<&GenesisAccount> {
        self.0.get(address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Address, GenesisAccount> {
        self.0.iter()
    }
}

impl FromIterator<(Address, GenesisAccount)> for GenesisAlloc {
    fn from_iter<I: IntoIterator<Item = (Address, GenesisAccount)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a GenesisAlloc {
    type Item = (&'a Address, &'a GenesisAccount);
    type IntoIter = btree_map::Iter<'a, Address, GenesisAccount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for GenesisAlloc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (address, account) in &self.0 {
            map.serialize_entry(&hex::encode(address), account)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GenesisAlloc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AllocVisitor)
    }
}

struct AllocVisitor;

impl<'de> Visitor<'de> for AllocVisitor {
    type Value = GenesisAlloc;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of hex addresses to genesis accounts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<GenesisAlloc, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut alloc = GenesisAlloc::new();
        while let Some(key) = access.next_key::<String>()? {
            let address = decode_fixed::<20>(&key)
                .map_err(|e| de::Error::custom(format!("invalid alloc address {:?}: {}", key, e)))?;
            let account = access.next_value::<GenesisAccount>()?;
            alloc.insert(address, account);
        }
        Ok(alloc)
    }
}
