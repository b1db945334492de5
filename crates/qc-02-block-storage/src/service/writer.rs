use crate::domain::errors::StorageError;
use crate::domain::schema::KeyPrefix;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use shared_types::{Block, BlockBody, ChainConfig, Hash, Header, U256};

/// Staged chain records, written to a [`KeyValueStore`] in one atomic batch.
///
/// Nothing reaches the store until [`ChainBatch::commit`].
#[derive(Debug, Default, Clone)]
pub struct ChainBatch {
    operations: Vec<BatchOperation>,
}

impl ChainBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Move every record staged in `other` to the end of this batch.
    pub fn append(&mut self, mut other: ChainBatch) {
        self.operations.append(&mut other.operations);
    }

    /// Latest value staged under `key`, if any.
    pub fn staged(&self, key: &[u8]) -> Option<&[u8]> {
        match self.operations.iter().rev().find(|op| op.key() == key)? {
            BatchOperation::Put { value, .. } => Some(value.as_slice()),
            BatchOperation::Delete { .. } => None,
        }
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.operations.push(BatchOperation::put(key, value));
    }

    /// Header plus its hash-to-number index entry.
    pub fn write_header(&mut self, header: &Header) {
        let hash = header.hash();
        self.put(
            KeyPrefix::header_key(header.number, &hash),
            rlp::encode(header).to_vec(),
        );
        self.put(
            KeyPrefix::header_number_key(&hash),
            header.number.to_be_bytes().to_vec(),
        );
    }

    pub fn write_body(&mut self, hash: &Hash, number: u64, body: &BlockBody) {
        self.put(KeyPrefix::body_key(number, hash), rlp::encode(body).to_vec());
    }

    pub fn write_block(&mut self, block: &Block) {
        self.write_body(&block.hash(), block.number(), &block.body);
        self.write_header(&block.header);
    }

    /// Receipts are stored as an RLP list of already-encoded receipts.
    pub fn write_receipts(&mut self, hash: &Hash, number: u64, receipts: &[Vec<u8>]) {
        let mut stream = rlp::RlpStream::new_list(receipts.len());
        for receipt in receipts {
            stream.append_raw(receipt, 1);
        }
        self.put(KeyPrefix::receipts_key(number, hash), stream.out().to_vec());
    }

    pub fn write_canonical_hash(&mut self, hash: &Hash, number: u64) {
        self.put(KeyPrefix::canonical_hash_key(number), hash.to_vec());
    }

    pub fn write_head_block_hash(&mut self, hash: &Hash) {
        self.put(KeyPrefix::head_block_key(), hash.to_vec());
    }

    pub fn write_head_header_hash(&mut self, hash: &Hash) {
        self.put(KeyPrefix::head_header_key(), hash.to_vec());
    }

    pub fn write_shard_state(&mut self, epoch: u64, shard_state: &[u8]) {
        self.put(KeyPrefix::shard_state_key(epoch), shard_state.to_vec());
    }

    /// Chain configuration, keyed by the genesis hash, stored as JSON.
    pub fn write_chain_config(
        &mut self,
        genesis_hash: &Hash,
        config: &ChainConfig,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_vec(config).map_err(|e| StorageError::SerializationError {
            message: e.to_string(),
        })?;
        self.put(KeyPrefix::chain_config_key(genesis_hash), json);
        Ok(())
    }

    pub fn write_block_reward_accumulator(&mut self, number: u64, amount: &U256) {
        self.put(
            KeyPrefix::reward_accumulator_key(number),
            rlp::encode(amount).to_vec(),
        );
    }

    pub fn write_pending_slashing_candidates(&mut self, encoded: &[u8]) {
        self.put(KeyPrefix::pending_slashing_key(), encoded.to_vec());
    }

    pub fn write_trie_nodes(&mut self, nodes: Vec<(Hash, Vec<u8>)>) {
        for (hash, node) in nodes {
            self.put(KeyPrefix::trie_node_key(&hash), node);
        }
    }

    pub fn write_code(&mut self, hash: &Hash, code: &[u8]) {
        self.put(KeyPrefix::code_key(hash), code.to_vec());
    }

    /// Apply every staged record in one atomic batch. Returns the record count.
    pub fn commit<KV: KeyValueStore + ?Sized>(self, store: &mut KV) -> Result<usize, StorageError> {
        let count = self.operations.len();
        store.atomic_batch_write(self.operations)?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!("[qc-02] 📦 Committed {} chain records", count);

        Ok(count)
    }
}
