//! Slashing records awaiting processing. Genesis seeds an empty collection.

use primitive_types::H160;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use shared_types::Address;

/// A reported double-sign by `offender`, observed at `(shard_id, epoch, height)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashRecord {
    pub offender: Address,
    pub reporter: Address,
    pub shard_id: u32,
    pub epoch: u64,
    pub height: u64,
}

impl Encodable for SlashRecord {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(5);
        s.append(&H160(self.offender));
        s.append(&H160(self.reporter));
        s.append(&self.shard_id);
        s.append(&self.epoch);
        s.append(&self.height);
    }
}

impl Decodable for SlashRecord {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 5 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            offender: rlp.val_at::<H160>(0)?.0,
            reporter: rlp.val_at::<H160>(1)?.0,
            shard_id: rlp.val_at(2)?,
            epoch: rlp.val_at(3)?,
            height: rlp.val_at(4)?,
        })
    }
}

/// Pending slashing candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlashRecords(pub Vec<SlashRecord>);

impl SlashRecords {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecoderError> {
        rlp::decode(bytes)
    }
}

impl Encodable for SlashRecords {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.append_list::<SlashRecord, SlashRecord>(&self.0);
    }
}

impl Decodable for SlashRecords {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        Ok(Self(rlp.as_list()?))
    }
}
