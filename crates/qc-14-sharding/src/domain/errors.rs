//! # Domain Errors
//!
//! Error types for Sharding subsystem.

use thiserror::Error;

/// Shard identifier.
pub type ShardId = u32;

/// Sharding error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    /// Two committees claim the same shard.
    #[error("duplicate committee for shard {0}")]
    DuplicateShard(ShardId),
}
