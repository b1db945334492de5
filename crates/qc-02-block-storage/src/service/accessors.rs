//! Typed reads of chain records. A missing record is `Ok(None)`; a record
//! that exists but does not decode is [`StorageError::CorruptRecord`].

use crate::domain::errors::StorageError;
use crate::domain::schema::KeyPrefix;
use crate::ports::outbound::KeyValueStore;
use rlp::Decodable;
use shared_types::{Block, BlockBody, ChainConfig, Hash, Header, U256};

fn corrupt(record: &'static str, message: impl ToString) -> StorageError {
    StorageError::CorruptRecord {
        record,
        message: message.to_string(),
    }
}

fn read_rlp<T: Decodable, KV: KeyValueStore + ?Sized>(
    store: &KV,
    key: &[u8],
    record: &'static str,
) -> Result<Option<T>, StorageError> {
    store
        .get(key)?
        .map(|bytes| rlp::decode::<T>(&bytes).map_err(|e| corrupt(record, e)))
        .transpose()
}

fn read_hash<KV: KeyValueStore + ?Sized>(
    store: &KV,
    key: &[u8],
    record: &'static str,
) -> Result<Option<Hash>, StorageError> {
    store
        .get(key)?
        .map(|bytes| {
            Hash::try_from(bytes.as_slice())
                .map_err(|_| corrupt(record, format!("{} bytes, want 32", bytes.len())))
        })
        .transpose()
}

pub fn read_canonical_hash<KV: KeyValueStore + ?Sized>(
    store: &KV,
    number: u64,
) -> Result<Option<Hash>, StorageError> {
    read_hash(store, &KeyPrefix::canonical_hash_key(number), "canonical hash")
}

pub fn read_head_block_hash<KV: KeyValueStore + ?Sized>(
    store: &KV,
) -> Result<Option<Hash>, StorageError> {
    read_hash(store, &KeyPrefix::head_block_key(), "head block hash")
}

pub fn read_head_header_hash<KV: KeyValueStore + ?Sized>(
    store: &KV,
) -> Result<Option<Hash>, StorageError> {
    read_hash(store, &KeyPrefix::head_header_key(), "head header hash")
}

pub fn read_header_number<KV: KeyValueStore + ?Sized>(
    store: &KV,
    hash: &Hash,
) -> Result<Option<u64>, StorageError> {
    store
        .get(&KeyPrefix::header_number_key(hash))?
        .map(|bytes| {
            <[u8; 8]>::try_from(bytes.as_slice())
                .map(u64::from_be_bytes)
                .map_err(|_| corrupt("header number", format!("{} bytes, want 8", bytes.len())))
        })
        .transpose()
}

pub fn read_header<KV: KeyValueStore + ?Sized>(
    store: &KV,
    hash: &Hash,
    number: u64,
) -> Result<Option<Header>, StorageError> {
    read_rlp(store, &KeyPrefix::header_key(number, hash), "header")
}

pub fn read_body<KV: KeyValueStore + ?Sized>(
    store: &KV,
    hash: &Hash,
    number: u64,
) -> Result<Option<BlockBody>, StorageError> {
    read_rlp(store, &KeyPrefix::body_key(number, hash), "body")
}

/// Header and body together; `None` unless both are present.
pub fn read_block<KV: KeyValueStore + ?Sized>(
    store: &KV,
    hash: &Hash,
    number: u64,
) -> Result<Option<Block>, StorageError> {
    let Some(header) = read_header(store, hash, number)? else {
        return Ok(None);
    };
    let Some(body) = read_body(store, hash, number)? else {
        return Ok(None);
    };
    Ok(Some(Block { header, body }))
}

/// Receipts as their raw RLP items.
pub fn read_receipts<KV: KeyValueStore + ?Sized>(
    store: &KV,
    hash: &Hash,
    number: u64,
) -> Result<Option<Vec<Vec<u8>>>, StorageError> {
    store
        .get(&KeyPrefix::receipts_key(number, hash))?
        .map(|bytes| {
            let list = rlp::Rlp::new(&bytes);
            if !list.is_list() {
                return Err(corrupt("receipts", "not a list"));
            }
            Ok(list.iter().map(|item| item.as_raw().to_vec()).collect())
        })
        .transpose()
}

pub fn read_shard_state<KV: KeyValueStore + ?Sized>(
    store: &KV,
    epoch: u64,
) -> Result<Option<Vec<u8>>, StorageError> {
    Ok(store.get(&KeyPrefix::shard_state_key(epoch))?)
}

pub fn read_chain_config<KV: KeyValueStore + ?Sized>(
    store: &KV,
    genesis_hash: &Hash,
) -> Result<Option<ChainConfig>, StorageError> {
    store
        .get(&KeyPrefix::chain_config_key(genesis_hash))?
        .map(|bytes| serde_json::from_slice(&bytes).map_err(|e| corrupt("chain config", e)))
        .transpose()
}

pub fn read_block_reward_accumulator<KV: KeyValueStore + ?Sized>(
    store: &KV,
    number: u64,
) -> Result<Option<U256>, StorageError> {
    read_rlp(
        store,
        &KeyPrefix::reward_accumulator_key(number),
        "reward accumulator",
    )
}

pub fn read_pending_slashing_candidates<KV: KeyValueStore + ?Sized>(
    store: &KV,
) -> Result<Option<Vec<u8>>, StorageError> {
    Ok(store.get(&KeyPrefix::pending_slashing_key())?)
}

pub fn read_trie_node<KV: KeyValueStore + ?Sized>(
    store: &KV,
    hash: &Hash,
) -> Result<Option<Vec<u8>>, StorageError> {
    Ok(store.get(&KeyPrefix::trie_node_key(hash))?)
}

pub fn read_code<KV: KeyValueStore + ?Sized>(
    store: &KV,
    hash: &Hash,
) -> Result<Option<Vec<u8>>, StorageError> {
    Ok(store.get(&KeyPrefix::code_key(hash))?)
}
