//! # Block Storage Service Tests

use super::*;
use crate::adapters::InMemoryKVStore;
use crate::domain::errors::{KVStoreError, StorageError};
use crate::domain::schema::KeyPrefix;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use shared_types::{Block, ChainConfig, Header, HeaderVersion, U256};

fn make_test_block(number: u64) -> Block {
    Block::with_header(Header {
        version: HeaderVersion::V3,
        number,
        gas_limit: 10_000_000,
        extra: b"test".to_vec(),
        ..Header::default()
    })
}

/// Store that rejects every write.
struct FailingStore {
    inner: InMemoryKVStore,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), KVStoreError> {
        Err(KVStoreError::IOError {
            message: "read-only".into(),
        })
    }

    fn delete(&mut self, _key: &[u8]) -> Result<(), KVStoreError> {
        Err(KVStoreError::IOError {
            message: "read-only".into(),
        })
    }

    fn atomic_batch_write(&mut self, _operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        Err(KVStoreError::IOError {
            message: "read-only".into(),
        })
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner.exists(key)
    }
}

#[test]
fn test_write_and_read_block() {
    let mut store = InMemoryKVStore::new();
    let block = make_test_block(0);
    let hash = block.hash();

    let mut batch = ChainBatch::new();
    batch.write_block(&block);
    batch.commit(&mut store).unwrap();

    assert_eq!(read_header_number(&store, &hash).unwrap(), Some(0));
    assert_eq!(read_header(&store, &hash, 0).unwrap(), Some(block.header.clone()));
    assert_eq!(read_block(&store, &hash, 0).unwrap(), Some(block));
}

#[test]
fn test_nothing_written_before_commit() {
    let store = InMemoryKVStore::new();
    let block = make_test_block(0);

    let mut batch = ChainBatch::new();
    batch.write_block(&block);
    assert_eq!(batch.len(), 3);
    batch.write_canonical_hash(&block.hash(), 0);
    assert_eq!(batch.len(), 4);
    assert!(store.is_empty());
}

#[test]
fn test_appended_batch_commits_once() {
    let mut store = InMemoryKVStore::new();
    let block = make_test_block(0);

    let mut nodes = ChainBatch::new();
    nodes.write_trie_nodes(vec![([0x07; 32], vec![0xc1, 0x80])]);
    nodes.write_code(&[0x08; 32], &[0x60, 0x00]);
    assert_eq!(nodes.staged(&KeyPrefix::code_key(&[0x08; 32])), Some(&[0x60, 0x00][..]));
    assert_eq!(nodes.staged(&KeyPrefix::code_key(&[0x09; 32])), None);

    let mut records = ChainBatch::new();
    records.write_block(&block);
    nodes.append(records);
    assert_eq!(nodes.len(), 5);
    assert!(store.is_empty());

    assert_eq!(nodes.commit(&mut store).unwrap(), 5);
    assert_eq!(read_block(&store, &block.hash(), 0).unwrap(), Some(block));
    assert_eq!(read_code(&store, &[0x08; 32]).unwrap(), Some(vec![0x60, 0x00]));
}

#[test]
fn test_index_records() {
    let mut store = InMemoryKVStore::new();
    let hash = make_test_block(0).hash();

    let mut batch = ChainBatch::new();
    batch.write_canonical_hash(&hash, 0);
    batch.write_head_block_hash(&hash);
    batch.write_head_header_hash(&hash);
    batch.write_receipts(&hash, 0, &[]);
    batch.commit(&mut store).unwrap();

    assert_eq!(read_canonical_hash(&store, 0).unwrap(), Some(hash));
    assert_eq!(read_canonical_hash(&store, 1).unwrap(), None);
    assert_eq!(read_head_block_hash(&store).unwrap(), Some(hash));
    assert_eq!(read_head_header_hash(&store).unwrap(), Some(hash));
    assert_eq!(read_receipts(&store, &hash, 0).unwrap(), Some(vec![]));
}

#[test]
fn test_bootstrap_records() {
    let mut store = InMemoryKVStore::new();
    let hash = [0x42; 32];
    let config = ChainConfig::all_protocol_changes();

    let mut batch = ChainBatch::new();
    batch.write_shard_state(0, &[0x01, 0xc0]);
    batch.write_chain_config(&hash, &config).unwrap();
    batch.write_block_reward_accumulator(0, &U256::zero());
    batch.write_pending_slashing_candidates(&[0xc0]);
    batch.write_trie_nodes(vec![([0x07; 32], vec![0xc1, 0x80])]);
    batch.write_code(&[0x08; 32], &[0x60, 0x00]);
    batch.commit(&mut store).unwrap();

    assert_eq!(read_shard_state(&store, 0).unwrap(), Some(vec![0x01, 0xc0]));
    assert_eq!(read_chain_config(&store, &hash).unwrap(), Some(config));
    assert_eq!(
        read_block_reward_accumulator(&store, 0).unwrap(),
        Some(U256::zero())
    );
    assert_eq!(
        read_pending_slashing_candidates(&store).unwrap(),
        Some(vec![0xc0])
    );
    assert_eq!(
        read_trie_node(&store, &[0x07; 32]).unwrap(),
        Some(vec![0xc1, 0x80])
    );
    assert_eq!(read_code(&store, &[0x08; 32]).unwrap(), Some(vec![0x60, 0x00]));
}

#[test]
fn test_failed_commit_writes_nothing() {
    let mut store = FailingStore {
        inner: InMemoryKVStore::new(),
    };
    let block = make_test_block(0);

    let mut batch = ChainBatch::new();
    batch.write_block(&block);
    let err = batch.commit(&mut store).unwrap_err();

    assert!(matches!(err, StorageError::DatabaseError { .. }));
    assert!(store.inner.is_empty());
}

#[test]
fn test_corrupt_records_reported() {
    let mut store = InMemoryKVStore::new();
    store
        .put(&KeyPrefix::canonical_hash_key(0), &[1, 2, 3])
        .unwrap();
    store.put(&KeyPrefix::header_key(0, &[0u8; 32]), &[0xc0]).unwrap();

    assert!(matches!(
        read_canonical_hash(&store, 0),
        Err(StorageError::CorruptRecord { .. })
    ));
    assert!(matches!(
        read_header(&store, &[0u8; 32], 0),
        Err(StorageError::CorruptRecord { .. })
    ));
}
