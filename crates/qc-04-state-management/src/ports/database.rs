use crate::domain::{Hash, StateError};

/// Trie database abstraction.
///
/// Holds committed trie nodes and contract code, both addressed by their
/// Keccak256 hash.
pub trait TrieDatabase {
    fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError>;
    fn batch_put(&mut self, nodes: Vec<(Hash, Vec<u8>)>) -> Result<(), StateError>;
    fn get_code(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError>;
    fn put_code(&mut self, hash: Hash, code: Vec<u8>) -> Result<(), StateError>;
}
