//! # qc-04-state-management
//!
//! State Management subsystem for Quantum-Chain.
//!
//! ## Role in System
//!
//! - **Genesis Materialization**: accumulates balances, code, nonces and storage
//!   for the initial allocation and derives the state root
//! - **Secure Patricia Merkle Trie**: accounts keyed by `keccak256(address)`,
//!   storage slots keyed by `keccak256(slot)`
//! - **Trie Database Port**: committed nodes and contract code go through
//!   [`TrieDatabase`], so any key-value backend can hold them
//!
//! ## Flow
//!
//! ```text
//! StateDb::add_balance / set_code / set_nonce / set_storage
//!         │
//!         ↓
//! StateDb::intermediate_root ──→ state root (no writes)
//!         │
//!         ↓
//! StateDb::commit ──→ TrieDatabase (nodes + code)
//!         │
//!         ↓
//! StateReader ──→ read back accounts, storage and code by root
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
