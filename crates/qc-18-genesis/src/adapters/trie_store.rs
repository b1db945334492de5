use qc_02_block_storage::{ChainBatch, KeyPrefix};
use qc_04_state_management::{Hash, StateError, TrieDatabase};

/// [`TrieDatabase`] that stages trie nodes (`t ‖ hash`) and code (`c ‖ hash`)
/// into a [`ChainBatch`] instead of writing them.
///
/// Reads only see what has been staged. The store is untouched until the
/// batch from [`into_batch`](Self::into_batch) is committed.
#[derive(Debug, Default)]
pub struct StagedTrieDatabase {
    batch: ChainBatch,
}

impl StagedTrieDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_batch(self) -> ChainBatch {
        self.batch
    }
}

impl TrieDatabase for StagedTrieDatabase {
    fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self
            .batch
            .staged(&KeyPrefix::trie_node_key(hash))
            .map(<[u8]>::to_vec))
    }

    fn batch_put(&mut self, nodes: Vec<(Hash, Vec<u8>)>) -> Result<(), StateError> {
        self.batch.write_trie_nodes(nodes);
        Ok(())
    }

    fn get_code(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self
            .batch
            .staged(&KeyPrefix::code_key(hash))
            .map(<[u8]>::to_vec))
    }

    fn put_code(&mut self, hash: Hash, code: Vec<u8>) -> Result<(), StateError> {
        self.batch.write_code(&hash, &code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_02_block_storage::{read_code, read_trie_node, InMemoryKVStore};

    #[test]
    fn test_nodes_and_code_staged_under_chain_schema() {
        let mut db = StagedTrieDatabase::new();
        db.batch_put(vec![([1; 32], vec![0xc1, 0x80])]).unwrap();
        db.put_code([2; 32], vec![0x60, 0x00]).unwrap();
        assert_eq!(db.get_node(&[1; 32]).unwrap(), Some(vec![0xc1, 0x80]));
        assert_eq!(db.get_code(&[2; 32]).unwrap(), Some(vec![0x60, 0x00]));
        assert_eq!(db.get_code(&[3; 32]).unwrap(), None);

        let batch = db.into_batch();
        assert_eq!(batch.len(), 2);

        let mut store = InMemoryKVStore::new();
        batch.commit(&mut store).unwrap();
        assert_eq!(
            read_trie_node(&store, &[1; 32]).unwrap(),
            Some(vec![0xc1, 0x80])
        );
        assert_eq!(read_code(&store, &[2; 32]).unwrap(), Some(vec![0x60, 0x00]));
    }
}
