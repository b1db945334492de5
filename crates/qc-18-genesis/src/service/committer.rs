use crate::domain::GenesisError;
use qc_02_block_storage::{ChainBatch, KeyValueStore};
use shared_types::{Block, ChainConfig};
use tracing::info;

/// Writes a genesis block and its chain index records.
#[derive(Clone, Debug)]
pub struct BlockCommitter {
    config: ChainConfig,
}

impl BlockCommitter {
    /// `config` is stored under the block hash; pass the resolved configuration.
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    /// Stage the genesis records for `block` without touching any store.
    ///
    /// Staged in order: block, empty receipts, canonical hash, head block,
    /// head header, shard state by epoch and chain config.
    pub fn stage(&self, block: &Block) -> Result<ChainBatch, GenesisError> {
        if block.number() != 0 {
            return Err(GenesisError::InvalidNumber(block.number()));
        }
        let hash = block.hash();

        let mut batch = ChainBatch::new();
        batch.write_block(block);
        batch.write_receipts(&hash, 0, &[]);
        batch.write_canonical_hash(&hash, 0);
        batch.write_head_block_hash(&hash);
        batch.write_head_header_hash(&hash);
        batch.write_shard_state(block.epoch(), &block.header.shard_state);
        batch.write_chain_config(&hash, &self.config)?;
        Ok(batch)
    }

    /// Commit `block` as the genesis block in one atomic batch.
    pub fn commit<KV: KeyValueStore + ?Sized>(
        &self,
        block: Block,
        store: &mut KV,
    ) -> Result<Block, GenesisError> {
        let records = self.stage(&block)?.commit(store)?;
        info!(
            block_hash = %hex::encode(block.hash()),
            records,
            "[qc-18] Genesis block committed"
        );
        Ok(block)
    }
}
