//! # Adapters
//!
//! - `ChainHeaderFactory`: header versions from a `ChainConfig`
//! - `StagedTrieDatabase`: trie nodes and code staged in a `ChainBatch`

pub mod header_factory;
pub mod trie_store;

pub use header_factory::ChainHeaderFactory;
pub use trie_store::StagedTrieDatabase;
