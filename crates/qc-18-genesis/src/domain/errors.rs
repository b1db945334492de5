//! # Domain Errors
//!
//! Error types for the Genesis subsystem.

use qc_02_block_storage::StorageError;
use qc_04_state_management::StateError;
use qc_14_sharding::ShardError;
use shared_types::Hash;
use std::fmt;
use thiserror::Error;

/// Genesis construction and commit errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// The genesis path only ever commits block 0.
    #[error("cannot commit genesis block with non-zero number {0}")]
    InvalidNumber(u64),

    /// Reserved for bootstrap flows that require an explicit configuration.
    #[error("genesis has no chain configuration")]
    NoChainConfig,

    #[error("genesis state: {0}")]
    State(#[from] StateError),

    #[error("failed to encode genesis shard state: {0}")]
    ShardState(#[from] ShardError),

    #[error("genesis storage: {0}")]
    Storage(#[from] StorageError),

    #[error("genesis serialization: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GenesisError {
    fn from(err: serde_json::Error) -> Self {
        GenesisError::Serialization(err.to_string())
    }
}

/// Storage key/value text that does not decode to a 32-byte slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageSlotError {
    #[error("too many hex characters in storage key/value {0:?}")]
    TooManyHexCharacters(String),

    #[error("invalid hex storage key/value {0:?}")]
    InvalidHex(String),
}

/// Raised when the store already holds a different genesis block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisMismatchError {
    pub stored: Hash,
    pub new: Hash,
}

impl fmt::Display for GenesisMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "database already contains an incompatible genesis block (have {}, new {})",
            hex::encode(&self.stored[..8]),
            hex::encode(&self.new[..8])
        )
    }
}

impl std::error::Error for GenesisMismatchError {}
