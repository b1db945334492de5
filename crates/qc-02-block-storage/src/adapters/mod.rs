//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: In-memory and file-backed key-value stores

pub mod storage;

pub use storage::{FileBackedKVStore, InMemoryKVStore};
