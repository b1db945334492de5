use super::{Address, Hash};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("balance overflow for account 0x{}", hex::encode(address))]
    BalanceOverflow { address: Address },

    #[error("missing trie node 0x{}", hex::encode(hash))]
    MissingNode { hash: Hash },

    #[error("missing code 0x{}", hex::encode(hash))]
    MissingCode { hash: Hash },

    #[error("corrupt trie node: {0}")]
    CorruptNode(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<rlp::DecoderError> for StateError {
    fn from(err: rlp::DecoderError) -> Self {
        StateError::CorruptNode(err.to_string())
    }
}
