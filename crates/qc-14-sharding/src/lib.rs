//! # QC-14 Sharding
//!
//! Committee assignments per shard and their wire encoding.
//!
//! **Subsystem ID:** 14
//! **Architecture:** Hexagonal (DDD)
//!
//! ## Purpose
//!
//! - [`ShardState`]: which validators sit on which shard committee at an epoch
//! - [`encode_wrapper`]: the versioned byte form carried
//!   in block headers and stored per epoch
//! - [`ShardState::hash`]: the canonical digest of a shard state
//!
//! ## Wrapper Encoding
//!
//! | Mode | Bytes |
//! |------|-------|
//! | Legacy | `rlp([[shard_id, [[ecdsa, bls], ...]], ...])` |
//! | Staking | `0x01 ‖ rlp([epoch, [[shard_id, [[ecdsa, bls, stake], ...]], ...]])` |
//!
//! ## Module Structure
//!
//! ```text
//! qc-14-sharding/
//! └── domain/          # ShardState, Committee, Slot, wrapper codec, errors
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

// Re-exports
pub use domain::{
    encode_wrapper, BlsPublicKey, Committee, ShardError, ShardId, ShardState, Slot,
    BLS_PUBLIC_KEY_LEN, STAKING_VERSION,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
