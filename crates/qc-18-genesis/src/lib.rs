//! # QC-18 Genesis
//!
//! Builds block 0 of a chain from a declarative genesis specification and
//! writes it, with the chain's bootstrap records, to the chain store.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD)
//!
//! ## Bootstrap Sequence
//!
//! 1. Reject a genesis whose number is not 0.
//! 2. Encode the shard state (legacy wrapper mode).
//! 3. Materialize the allocation into the state trie, staging its nodes and
//!    code in a [`ChainBatch`](qc_02_block_storage::ChainBatch).
//! 4. Assemble the header; the header factory picks its version.
//! 5. Stage block, receipts, canonical index, head pointers, shard state,
//!    chain config, reward accumulator and pending slashing records in the
//!    same batch and write it atomically.
//!
//! No function in this crate terminates the process. Callers decide what a
//! failed genesis means.
//!
//! ## Usage
//!
//! ```ignore
//! use qc_18_genesis::{dev_genesis, ChainBootstrapper};
//! use qc_02_block_storage::InMemoryKVStore;
//!
//! let genesis = dev_genesis()?;
//! let mut store = InMemoryKVStore::new();
//! let block = ChainBootstrapper::new(&genesis).bootstrap(&mut store)?;
//! assert_eq!(block.number(), 0);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{ChainHeaderFactory, StagedTrieDatabase};
pub use domain::*;
pub use ports::HeaderFactory;
pub use service::*;
