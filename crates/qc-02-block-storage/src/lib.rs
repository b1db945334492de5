//! # Block Storage Engine (qc-02)
//!
//! The Block Storage subsystem is the persistence layer for chain data: block
//! headers and bodies, the canonical index, head pointers and the auxiliary
//! records written at chain bootstrap.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Atomic Writes | A [`ChainBatch`] lands entirely or not at all |
//! | 2 | Canonical Encoding | Headers and bodies are stored as RLP |
//! | 3 | Stable Schema | Every record lives under a fixed [`KeyPrefix`] layout |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Key schema and error types
//! - `ports/` - Key-value store port
//! - `adapters/` - In-memory and file-backed stores
//! - `service/` - Batched chain writer and record accessors
//!
//! ## Usage
//!
//! ```ignore
//! use qc_02_block_storage::{ChainBatch, InMemoryKVStore, read_canonical_hash};
//!
//! let mut store = InMemoryKVStore::new();
//! let mut batch = ChainBatch::new();
//! batch.write_block(&block);
//! batch.write_canonical_hash(&block.hash(), 0);
//! batch.commit(&mut store)?;
//!
//! assert_eq!(read_canonical_hash(&store, 0)?, Some(block.hash()));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileBackedKVStore, InMemoryKVStore};
pub use domain::errors::{KVStoreError, StorageError};
pub use domain::schema::KeyPrefix;
pub use ports::outbound::{BatchOperation, KeyValueStore};
pub use service::*;
