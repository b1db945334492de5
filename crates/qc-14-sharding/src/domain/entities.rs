//! # Domain Entities
//!
//! Committee assignments for one epoch.

use super::errors::{ShardError, ShardId};
use serde::{Deserialize, Serialize};
use shared_types::codec::{hex_array, hex_or_decimal_u64, opt_hex_or_decimal_u256};
use shared_types::{Address, U256};
use std::collections::BTreeSet;

/// Length of a compressed BLS12-381 public key.
pub const BLS_PUBLIC_KEY_LEN: usize = 48;

/// Serialized BLS public key of a committee member.
pub type BlsPublicKey = [u8; BLS_PUBLIC_KEY_LEN];

/// One seat in a shard committee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Account address of the validator.
    #[serde(rename = "ecdsa-address", with = "hex_array")]
    pub ecdsa_address: Address,
    /// Consensus key of the validator.
    #[serde(rename = "bls-pubkey", with = "hex_array")]
    pub bls_public_key: BlsPublicKey,
    /// Stake backing the seat; absent for seats assigned without staking.
    #[serde(
        rename = "effective-stake",
        default,
        skip_serializing_if = "Option::is_none",
        with = "opt_hex_or_decimal_u256"
    )]
    pub effective_stake: Option<U256>,
}

/// The committee of a single shard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    /// Shard this committee validates.
    #[serde(rename = "shard-id")]
    pub shard_id: ShardId,
    /// Seats, in assignment order.
    #[serde(rename = "subcommittee")]
    pub slots: Vec<Slot>,
}

/// Committee assignments of every shard at an epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardState {
    /// Epoch the assignment applies to.
    #[serde(default, with = "hex_or_decimal_u64")]
    pub epoch: u64,
    /// One committee per shard.
    pub shards: Vec<Committee>,
}

impl ShardState {
    /// Committee of `shard_id`, if assigned.
    pub fn committee(&self, shard_id: ShardId) -> Option<&Committee> {
        self.shards.iter().find(|c| c.shard_id == shard_id)
    }

    /// Total number of seats across all committees.
    pub fn slot_count(&self) -> usize {
        self.shards.iter().map(|c| c.slots.len()).sum()
    }

    /// Reject states where two committees claim the same shard.
    pub fn validate(&self) -> Result<(), ShardError> {
        let mut seen = BTreeSet::new();
        for committee in &self.shards {
            if !seen.insert(committee.shard_id) {
                return Err(ShardError::DuplicateShard(committee.shard_id));
            }
        }
        Ok(())
    }

    /// Copy with committees ordered by shard id.
    pub fn sorted(&self) -> Self {
        let mut sorted = self.clone();
        sorted.shards.sort_by_key(|c| c.shard_id);
        sorted
    }
}
