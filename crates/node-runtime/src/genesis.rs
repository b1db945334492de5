//! # Genesis Setup
//!
//! Makes sure the chain store holds the configured genesis block.
//!
//! - Empty store: bootstrap it from the genesis specification.
//! - Same genesis hash already stored: nothing to do.
//! - Different genesis hash stored: [`GenesisMismatchError`].

use anyhow::Context;
use qc_02_block_storage::{read_canonical_hash, KeyValueStore, StorageError};
use qc_18_genesis::{dev_genesis, Genesis, GenesisError, GenesisMismatchError};
use shared_types::{Block, Hash};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Result of [`setup_genesis_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The store was empty and now holds this genesis block.
    Created(Block),
    /// The store already held this genesis hash.
    Existing(Hash),
}

impl SetupOutcome {
    pub fn genesis_hash(&self) -> Hash {
        match self {
            SetupOutcome::Created(block) => block.hash(),
            SetupOutcome::Existing(hash) => *hash,
        }
    }
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Mismatch(#[from] GenesisMismatchError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error("failed to read stored genesis: {0}")]
    Storage(#[from] StorageError),
}

/// Bootstrap `store` from `genesis`, or check it against the stored genesis.
pub fn setup_genesis_block<KV: KeyValueStore + ?Sized>(
    store: &mut KV,
    genesis: &Genesis,
) -> Result<SetupOutcome, SetupError> {
    let Some(stored) = read_canonical_hash(store, 0)? else {
        info!("[node] Writing genesis block");
        let block = genesis.bootstrap(store)?;
        return Ok(SetupOutcome::Created(block));
    };

    let new = genesis.hash()?;
    if stored != new {
        warn!(
            stored = %hex::encode(stored),
            new = %hex::encode(new),
            "[node] Stored genesis differs from configured genesis"
        );
        return Err(GenesisMismatchError { stored, new }.into());
    }
    Ok(SetupOutcome::Existing(stored))
}

/// The genesis at `path`, or the development genesis when no path is given.
pub fn load_genesis(path: Option<&Path>) -> anyhow::Result<Genesis> {
    match path {
        Some(path) => {
            let json = std::fs::read(path)
                .with_context(|| format!("failed to read genesis file {}", path.display()))?;
            Genesis::from_json(&json)
                .with_context(|| format!("invalid genesis file {}", path.display()))
        }
        None => {
            info!("[node] No genesis file configured, using the development genesis");
            Ok(dev_genesis()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_02_block_storage::{read_head_block_hash, InMemoryKVStore};
    use qc_18_genesis::GenesisAccount;
    use shared_types::U256;

    #[test]
    fn test_empty_store_is_bootstrapped() {
        let genesis = dev_genesis().unwrap();
        let mut store = InMemoryKVStore::new();
        let outcome = setup_genesis_block(&mut store, &genesis).unwrap();
        assert!(matches!(outcome, SetupOutcome::Created(_)));
        assert_eq!(
            read_head_block_hash(&store).unwrap(),
            Some(outcome.genesis_hash())
        );
    }

    #[test]
    fn test_same_genesis_is_noop() {
        let genesis = dev_genesis().unwrap();
        let mut store = InMemoryKVStore::new();
        let created = setup_genesis_block(&mut store, &genesis).unwrap();
        let records = store.len();

        let again = setup_genesis_block(&mut store, &genesis).unwrap();
        assert_eq!(again, SetupOutcome::Existing(created.genesis_hash()));
        assert_eq!(store.len(), records);
    }

    #[test]
    fn test_different_genesis_is_mismatch() {
        let genesis = dev_genesis().unwrap();
        let mut store = InMemoryKVStore::new();
        let created = setup_genesis_block(&mut store, &genesis).unwrap();

        let mut other = genesis.clone();
        other
            .alloc
            .insert([0x42; 20], GenesisAccount::with_balance(U256::one()));
        match setup_genesis_block(&mut store, &other) {
            Err(SetupError::Mismatch(err)) => {
                assert_eq!(err.stored, created.genesis_hash());
                assert_eq!(err.new, other.hash().unwrap());
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
        assert_eq!(
            read_canonical_hash(&store, 0).unwrap(),
            Some(created.genesis_hash())
        );
    }

    #[test]
    fn test_load_genesis_without_path_uses_dev() {
        let genesis = load_genesis(None).unwrap();
        assert_eq!(genesis.alloc.len(), dev_genesis().unwrap().alloc.len());
    }

    #[test]
    fn test_load_genesis_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");
        std::fs::write(&path, b"{\"alloc\": 5}").unwrap();
        let err = load_genesis(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid genesis file"));

        let missing = dir.path().join("missing.json");
        assert!(load_genesis(Some(&missing)).is_err());
    }
}
