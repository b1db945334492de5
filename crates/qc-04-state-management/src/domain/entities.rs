//! # Domain Entities for State Management
//!
//! ## Type Decisions
//!
//! - `balance: U256` - genesis allocations are arbitrary-precision in the
//!   specification file, and 256 bits is the ceiling of the account encoding.

use primitive_types::H256;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

pub use shared_types::{
    Address, Hash, StorageKey, StorageValue, U256, EMPTY_CODE_HASH, EMPTY_ROOT_HASH,
};

/// Account state stored in the Patricia Merkle Trie.
///
/// ## Serialization
///
/// RLP-encoded as: [nonce, balance, storage_root, code_hash]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountState {
    pub nonce: u64,
    pub balance: U256,
    /// Root hash of the account's storage trie.
    pub storage_root: Hash,
    /// Keccak256 of contract code. `EMPTY_CODE_HASH` for plain accounts.
    pub code_hash: Hash,
}

impl Default for AccountState {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::zero(),
            storage_root: EMPTY_ROOT_HASH,
            code_hash: EMPTY_CODE_HASH,
        }
    }
}

impl AccountState {
    /// Zero nonce, zero balance and no code.
    pub fn is_empty(&self) -> bool {
        self.nonce == 0 && self.balance.is_zero() && self.code_hash == EMPTY_CODE_HASH
    }
}

impl Encodable for AccountState {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.nonce);
        s.append(&self.balance);
        s.append(&H256(self.storage_root));
        s.append(&H256(self.code_hash));
    }
}

impl Decodable for AccountState {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            nonce: rlp.val_at(0)?,
            balance: rlp.val_at(1)?,
            storage_root: rlp.val_at::<H256>(2)?.0,
            code_hash: rlp.val_at::<H256>(3)?.0,
        })
    }
}

/// Storage value as held in a storage trie leaf: RLP of the value with leading
/// zero bytes removed.
pub fn encode_storage_value(value: &StorageValue) -> Vec<u8> {
    let first = value.iter().position(|b| *b != 0).unwrap_or(value.len());
    let trimmed: &[u8] = &value[first..];
    rlp::encode(&trimmed).to_vec()
}

/// Inverse of [`encode_storage_value`]; left-pads back to 32 bytes.
pub fn decode_storage_value(encoded: &[u8]) -> Result<StorageValue, DecoderError> {
    let data = Rlp::new(encoded).data()?;
    if data.len() > 32 {
        return Err(DecoderError::RlpIsTooBig);
    }
    let mut value = [0u8; 32];
    value[32 - data.len()..].copy_from_slice(data);
    Ok(value)
}
