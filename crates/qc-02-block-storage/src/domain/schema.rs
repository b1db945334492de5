//! # Key Schema
//!
//! Byte layout of every chain record in the key-value store. Numbers and
//! epochs are 8-byte big-endian so records sort by height.
//!
//! | Record | Key | Value |
//! |--------|-----|-------|
//! | Header | `h` + number + hash | RLP header |
//! | Body | `b` + number + hash | RLP body |
//! | Header number | `H` + hash | number |
//! | Receipts | `r` + number + hash | RLP receipt list |
//! | Canonical hash | `h` + number + `n` | hash |
//! | Head block | `LastBlock` | hash |
//! | Head header | `LastHeader` | hash |
//! | Shard state | `ss` + epoch | wrapped shard state |
//! | Chain config | `ethereum-config-` + hash | JSON |
//! | Reward accumulator | `brab` + number | RLP amount |
//! | Pending slashing | `pendingSlashingCandidates` | RLP records |
//! | Trie node | `t` + hash | RLP node |
//! | Contract code | `c` + hash | code |

use shared_types::Hash;

/// Key prefixes for the chain schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    Header,
    Body,
    HeaderNumber,
    Receipts,
    ShardState,
    ChainConfig,
    RewardAccumulator,
    TrieNode,
    Code,
}

const CANONICAL_SUFFIX: &[u8] = b"n";
const HEAD_BLOCK_KEY: &[u8] = b"LastBlock";
const HEAD_HEADER_KEY: &[u8] = b"LastHeader";
const PENDING_SLASHING_KEY: &[u8] = b"pendingSlashingCandidates";

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Header => b"h",
            KeyPrefix::Body => b"b",
            KeyPrefix::HeaderNumber => b"H",
            KeyPrefix::Receipts => b"r",
            KeyPrefix::ShardState => b"ss",
            KeyPrefix::ChainConfig => b"ethereum-config-",
            KeyPrefix::RewardAccumulator => b"brab",
            KeyPrefix::TrieNode => b"t",
            KeyPrefix::Code => b"c",
        }
    }

    /// Build a full key from the prefix and suffix parts.
    pub fn key(&self, parts: &[&[u8]]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        for part in parts {
            key.extend_from_slice(part);
        }
        key
    }

    pub fn header_key(number: u64, hash: &Hash) -> Vec<u8> {
        KeyPrefix::Header.key(&[&number.to_be_bytes(), hash])
    }

    pub fn body_key(number: u64, hash: &Hash) -> Vec<u8> {
        KeyPrefix::Body.key(&[&number.to_be_bytes(), hash])
    }

    pub fn header_number_key(hash: &Hash) -> Vec<u8> {
        KeyPrefix::HeaderNumber.key(&[hash])
    }

    pub fn receipts_key(number: u64, hash: &Hash) -> Vec<u8> {
        KeyPrefix::Receipts.key(&[&number.to_be_bytes(), hash])
    }

    pub fn canonical_hash_key(number: u64) -> Vec<u8> {
        KeyPrefix::Header.key(&[&number.to_be_bytes(), CANONICAL_SUFFIX])
    }

    pub fn head_block_key() -> Vec<u8> {
        HEAD_BLOCK_KEY.to_vec()
    }

    pub fn head_header_key() -> Vec<u8> {
        HEAD_HEADER_KEY.to_vec()
    }

    pub fn shard_state_key(epoch: u64) -> Vec<u8> {
        KeyPrefix::ShardState.key(&[&epoch.to_be_bytes()])
    }

    pub fn chain_config_key(hash: &Hash) -> Vec<u8> {
        KeyPrefix::ChainConfig.key(&[hash])
    }

    pub fn reward_accumulator_key(number: u64) -> Vec<u8> {
        KeyPrefix::RewardAccumulator.key(&[&number.to_be_bytes()])
    }

    pub fn pending_slashing_key() -> Vec<u8> {
        PENDING_SLASHING_KEY.to_vec()
    }

    pub fn trie_node_key(hash: &Hash) -> Vec<u8> {
        KeyPrefix::TrieNode.key(&[hash])
    }

    pub fn code_key(hash: &Hash) -> Vec<u8> {
        KeyPrefix::Code.key(&[hash])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_distinct_from_header_key() {
        let hash = [0x11; 32];
        let canonical = KeyPrefix::canonical_hash_key(0);
        let header = KeyPrefix::header_key(0, &hash);
        assert_eq!(canonical.len(), 1 + 8 + 1);
        assert_eq!(header.len(), 1 + 8 + 32);
        assert_eq!(&canonical[..9], &header[..9]);
        assert_ne!(canonical, header);
    }

    #[test]
    fn test_numbers_are_big_endian() {
        let key = KeyPrefix::shard_state_key(258);
        assert_eq!(key, b"ss\x00\x00\x00\x00\x00\x00\x01\x02".to_vec());
    }
}
