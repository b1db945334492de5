use super::{assemble_header, materialize, BlockCommitter};
use crate::adapters::{ChainHeaderFactory, StagedTrieDatabase};
use crate::domain::{Genesis, GenesisError, SlashRecords};
use crate::ports::HeaderFactory;
use qc_02_block_storage::{ChainBatch, KeyValueStore};
use qc_04_state_management::{InMemoryTrieDb, TrieDatabase};
use qc_14_sharding::encode_wrapper;
use shared_types::{Block, ChainConfig, Hash, U256};
use std::sync::Arc;
use tracing::info;

/// The configuration a genesis runs under: its own if present, otherwise
/// [`ChainConfig::all_protocol_changes`]. No genesis at all also resolves to
/// the default.
pub fn resolve_chain_config(genesis: Option<&Genesis>) -> ChainConfig {
    genesis
        .and_then(|g| g.config.clone())
        .unwrap_or_else(ChainConfig::all_protocol_changes)
}

/// Turns a [`Genesis`] into block 0 and writes it to a chain store.
pub struct ChainBootstrapper<'g> {
    genesis: &'g Genesis,
    config: ChainConfig,
    factory: Arc<dyn HeaderFactory>,
}

impl<'g> ChainBootstrapper<'g> {
    pub fn new(genesis: &'g Genesis) -> Self {
        let config = resolve_chain_config(Some(genesis));
        let factory: Arc<dyn HeaderFactory> = match &genesis.factory {
            Some(factory) => Arc::clone(factory),
            None => Arc::new(ChainHeaderFactory::new(config.clone())),
        };
        Self {
            genesis,
            config,
            factory,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Materialize the allocation into `db` and assemble the genesis block.
    ///
    /// The shard state is encoded first so an unencodable state fails before
    /// any trie node is written.
    pub fn to_block<DB: TrieDatabase + ?Sized>(&self, db: &mut DB) -> Result<Block, GenesisError> {
        let shard_state = encode_wrapper(&self.genesis.shard_state, false)?;
        let root = materialize(&self.genesis.alloc, db)?;
        let header = assemble_header(self.genesis, self.factory.as_ref(), root, shard_state);
        Ok(Block::with_header(header))
    }

    /// Hash of the genesis block, computed against scratch storage.
    pub fn genesis_hash(&self) -> Result<Hash, GenesisError> {
        Ok(self.to_block(&mut InMemoryTrieDb::new())?.hash())
    }

    /// Build block 0 and stage its trie nodes, code and index records.
    ///
    /// A non-zero genesis number is rejected before the state is built.
    fn stage(&self) -> Result<(Block, ChainBatch), GenesisError> {
        if self.genesis.number != 0 {
            return Err(GenesisError::InvalidNumber(self.genesis.number));
        }
        let mut db = StagedTrieDatabase::new();
        let block = self.to_block(&mut db)?;
        let mut batch = db.into_batch();
        batch.append(BlockCommitter::new(self.config.clone()).stage(&block)?);
        Ok((block, batch))
    }

    /// Write the state tries and the genesis block with its index records in
    /// one atomic batch.
    pub fn commit<KV: KeyValueStore + ?Sized>(&self, store: &mut KV) -> Result<Block, GenesisError> {
        let (block, batch) = self.stage()?;
        let records = batch.commit(store)?;
        info!(
            block_hash = %hex::encode(block.hash()),
            records,
            "[qc-18] Genesis block committed"
        );
        Ok(block)
    }

    /// [`commit`](Self::commit) plus the bootstrap records: a zero reward
    /// accumulator at block 0 and an empty pending-slashing list.
    ///
    /// State, block and bootstrap records share a single atomic batch, so a
    /// failed bootstrap leaves the store as it was.
    pub fn bootstrap<KV: KeyValueStore + ?Sized>(
        &self,
        store: &mut KV,
    ) -> Result<Block, GenesisError> {
        let (block, mut batch) = self.stage()?;
        batch.write_block_reward_accumulator(block.number(), &U256::zero());
        batch.write_pending_slashing_candidates(&SlashRecords::default().encode());
        let records = batch.commit(store)?;

        info!(
            block_hash = %hex::encode(block.hash()),
            root = %hex::encode(block.header.root),
            accounts = self.genesis.alloc.len(),
            records,
            "[qc-18] 🌱 Chain bootstrapped from genesis"
        );
        Ok(block)
    }
}

impl Genesis {
    /// See [`ChainBootstrapper::to_block`].
    pub fn to_block<DB: TrieDatabase + ?Sized>(&self, db: &mut DB) -> Result<Block, GenesisError> {
        ChainBootstrapper::new(self).to_block(db)
    }

    /// See [`ChainBootstrapper::commit`].
    pub fn commit<KV: KeyValueStore + ?Sized>(&self, store: &mut KV) -> Result<Block, GenesisError> {
        ChainBootstrapper::new(self).commit(store)
    }

    /// See [`ChainBootstrapper::bootstrap`].
    pub fn bootstrap<KV: KeyValueStore + ?Sized>(
        &self,
        store: &mut KV,
    ) -> Result<Block, GenesisError> {
        ChainBootstrapper::new(self).bootstrap(store)
    }

    /// See [`ChainBootstrapper::genesis_hash`].
    pub fn hash(&self) -> Result<Hash, GenesisError> {
        ChainBootstrapper::new(self).genesis_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GenesisAccount;
    use qc_02_block_storage::{
        read_block_reward_accumulator, read_canonical_hash, read_pending_slashing_candidates,
        BatchOperation, InMemoryKVStore, KVStoreError,
    };
    use qc_14_sharding::{Committee, ShardState};
    use shared_types::HeaderVersion;

    fn genesis() -> Genesis {
        Genesis {
            gas_limit: 5000,
            alloc: std::iter::once(([0xaa; 20], GenesisAccount::with_balance(U256::from(1000u64))))
                .collect(),
            ..Genesis::default()
        }
    }

    #[test]
    fn test_resolve_prefers_spec_config() {
        let mut spec = genesis();
        assert_eq!(
            resolve_chain_config(Some(&spec)),
            ChainConfig::all_protocol_changes()
        );
        assert_eq!(
            resolve_chain_config(None),
            ChainConfig::all_protocol_changes()
        );
        let custom = ChainConfig {
            chain_id: 9,
            ..ChainConfig::all_protocol_changes()
        };
        spec.config = Some(custom.clone());
        assert_eq!(resolve_chain_config(Some(&spec)), custom);
    }

    #[test]
    fn test_scratch_hash_matches_committed_block() {
        let spec = genesis();
        let mut store = InMemoryKVStore::new();
        let block = spec.bootstrap(&mut store).unwrap();
        assert_eq!(spec.hash().unwrap(), block.hash());
        assert_eq!(read_canonical_hash(&store, 0).unwrap(), Some(block.hash()));
    }

    #[test]
    fn test_bootstrap_records_written() {
        let mut store = InMemoryKVStore::new();
        genesis().bootstrap(&mut store).unwrap();
        assert_eq!(
            read_block_reward_accumulator(&store, 0).unwrap(),
            Some(U256::zero())
        );
        assert_eq!(
            read_pending_slashing_candidates(&store).unwrap(),
            Some(vec![0xc0])
        );
    }

    #[test]
    fn test_default_config_gives_latest_header_version() {
        let block = genesis().to_block(&mut InMemoryTrieDb::new()).unwrap();
        assert_eq!(block.header.version, HeaderVersion::V3);
        assert_eq!(block.header.shard_state, vec![0xc0]);
    }

    #[test]
    fn test_factory_override_is_used() {
        #[derive(Debug)]
        struct Legacy;
        impl HeaderFactory for Legacy {
            fn header_version(&self, _epoch: u64) -> HeaderVersion {
                HeaderVersion::V0
            }
        }
        let spec = Genesis {
            factory: Some(Arc::new(Legacy)),
            ..genesis()
        };
        let block = spec.to_block(&mut InMemoryTrieDb::new()).unwrap();
        assert_eq!(block.header.version, HeaderVersion::V0);
    }

    #[test]
    fn test_bad_shard_state_writes_nothing() {
        let committee = Committee {
            shard_id: 1,
            slots: Vec::new(),
        };
        let spec = Genesis {
            shard_state: ShardState {
                epoch: 0,
                shards: vec![committee.clone(), committee],
            },
            ..genesis()
        };
        let mut store = InMemoryKVStore::new();
        let err = spec.bootstrap(&mut store).unwrap_err();
        assert!(matches!(err, GenesisError::ShardState(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_nonzero_number_rejected_before_any_write() {
        let spec = Genesis {
            number: 5,
            ..genesis()
        };
        let mut store = InMemoryKVStore::new();
        assert!(matches!(
            spec.commit(&mut store),
            Err(GenesisError::InvalidNumber(5))
        ));
        assert!(matches!(
            spec.bootstrap(&mut store),
            Err(GenesisError::InvalidNumber(5))
        ));
        assert!(store.is_empty());
    }

    /// Store whose every operation fails, as an unusable handle would.
    #[derive(Default)]
    struct FailingStore {
        attempts: usize,
    }

    fn gone() -> KVStoreError {
        KVStoreError::IOError {
            message: "gone".into(),
        }
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
            Err(gone())
        }

        fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), KVStoreError> {
            self.attempts += 1;
            Err(gone())
        }

        fn delete(&mut self, _key: &[u8]) -> Result<(), KVStoreError> {
            self.attempts += 1;
            Err(gone())
        }

        fn atomic_batch_write(&mut self, _operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
            self.attempts += 1;
            Err(gone())
        }

        fn exists(&self, _key: &[u8]) -> Result<bool, KVStoreError> {
            Err(gone())
        }
    }

    #[test]
    fn test_unusable_store_is_storage_error() {
        let spec = Genesis {
            alloc: std::iter::once((
                [0xcc; 20],
                GenesisAccount {
                    code: vec![0x60, 0x00],
                    ..GenesisAccount::with_balance(U256::one())
                },
            ))
            .collect(),
            ..genesis()
        };
        let mut store = FailingStore::default();
        let err = spec.bootstrap(&mut store).unwrap_err();
        assert!(matches!(err, GenesisError::Storage(_)), "{err:?}");
        // one batch attempted, no separate trie or code writes
        assert_eq!(store.attempts, 1);

        let err = spec.commit(&mut store).unwrap_err();
        assert!(matches!(err, GenesisError::Storage(_)), "{err:?}");
        assert_eq!(store.attempts, 2);
    }

    #[test]
    fn test_bootstrap_is_one_batch_with_state() {
        let mut store = InMemoryKVStore::new();
        let block = genesis().bootstrap(&mut store).unwrap();
        // 1 account trie node + 9 genesis records + 2 bootstrap records
        assert_eq!(store.len(), 12);
        assert!(store
            .get(&qc_02_block_storage::KeyPrefix::trie_node_key(&block.header.root))
            .unwrap()
            .is_some());
    }
}
