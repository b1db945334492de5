use crate::domain::{Hash, StateError};
use crate::ports::TrieDatabase;
use std::collections::HashMap;

/// In-memory implementation of TrieDatabase.
///
/// Used for scratch state and in tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTrieDb {
    nodes: HashMap<Hash, Vec<u8>>,
    code: HashMap<Hash, Vec<u8>>,
}

impl InMemoryTrieDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn code_count(&self) -> usize {
        self.code.len()
    }
}

impl TrieDatabase for InMemoryTrieDb {
    fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.nodes.get(hash).cloned())
    }

    fn batch_put(&mut self, batch: Vec<(Hash, Vec<u8>)>) -> Result<(), StateError> {
        self.nodes.extend(batch);
        Ok(())
    }

    fn get_code(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.code.get(hash).cloned())
    }

    fn put_code(&mut self, hash: Hash, code: Vec<u8>) -> Result<(), StateError> {
        self.code.insert(hash, code);
        Ok(())
    }
}
