//! # Wrapper Encoding
//!
//! Byte form of a [`ShardState`] as embedded in headers and stored per epoch.
//! RLP lists start at `0xc0`, so a leading [`STAKING_VERSION`] byte is
//! unambiguous.

use super::entities::{Committee, ShardState, Slot};
use super::errors::ShardError;
use primitive_types::H160;
use rlp::RlpStream;
use shared_types::{keccak256, Hash};

/// Version prefix of the staking encoding.
pub const STAKING_VERSION: u8 = 0x01;

fn append_slot(s: &mut RlpStream, slot: &Slot, is_staking: bool) {
    s.begin_list(if is_staking { 3 } else { 2 });
    s.append(&H160(slot.ecdsa_address));
    s.append(&slot.bls_public_key.as_slice());
    if is_staking {
        match &slot.effective_stake {
            Some(stake) => {
                s.append(stake);
            }
            None => {
                s.append_empty_data();
            }
        }
    }
}

fn append_committees(s: &mut RlpStream, shards: &[Committee], is_staking: bool) {
    s.begin_list(shards.len());
    for committee in shards {
        s.begin_list(2);
        s.append(&committee.shard_id);
        s.begin_list(committee.slots.len());
        for slot in &committee.slots {
            append_slot(s, slot, is_staking);
        }
    }
}

/// Encode `state` for embedding in a header.
///
/// Legacy mode drops the epoch and stakes; staking mode keeps both behind the
/// version prefix.
pub fn encode_wrapper(state: &ShardState, is_staking: bool) -> Result<Vec<u8>, ShardError> {
    state.validate()?;

    let mut s = RlpStream::new();
    if is_staking {
        s.begin_list(2);
        s.append(&state.epoch);
        append_committees(&mut s, &state.shards, true);
        let mut out = vec![STAKING_VERSION];
        out.extend_from_slice(&s.out());
        Ok(out)
    } else {
        append_committees(&mut s, &state.shards, false);
        Ok(s.out().to_vec())
    }
}

impl ShardState {
    /// Canonical digest: Keccak256 of the legacy encoding with committees
    /// ordered by shard id. Epoch and stakes do not contribute.
    pub fn hash(&self) -> Result<Hash, ShardError> {
        Ok(keccak256(&encode_wrapper(&self.sorted(), false)?))
    }
}
