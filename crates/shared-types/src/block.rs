//! # Block Model
//!
//! Headers, bodies and blocks of the sharded chain, with their RLP codec.
//!
//! The header hash is `keccak256(rlp(header))` and identifies the block.

use crate::entities::{keccak256, Address, Hash, EMPTY_ROOT_HASH, ZERO_ADDRESS, ZERO_HASH};
use primitive_types::{H160, H256};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

/// Header layout revision, chosen by the header factory from the chain config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HeaderVersion {
    /// Base layout.
    #[default]
    V0,
    /// Cross-shard transactions.
    V1,
    /// Cross-links.
    V2,
    /// Pre-staking and staking.
    V3,
}

impl HeaderVersion {
    pub fn as_u8(self) -> u8 {
        match self {
            HeaderVersion::V0 => 0,
            HeaderVersion::V1 => 1,
            HeaderVersion::V2 => 2,
            HeaderVersion::V3 => 3,
        }
    }

    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(HeaderVersion::V0),
            1 => Some(HeaderVersion::V1),
            2 => Some(HeaderVersion::V2),
            3 => Some(HeaderVersion::V3),
            _ => None,
        }
    }
}

/// Block header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: HeaderVersion,
    pub parent_hash: Hash,
    pub coinbase: Address,
    /// Root of the account state trie.
    pub root: Hash,
    pub tx_hash: Hash,
    pub receipt_hash: Hash,
    pub number: u64,
    pub epoch: u64,
    pub shard_id: u32,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub time: u64,
    pub extra: Vec<u8>,
    pub mix_digest: Hash,
    /// Declared hash of the shard state, copied verbatim from the specification.
    pub shard_state_hash: Hash,
    /// Wrapped shard-state encoding.
    pub shard_state: Vec<u8>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: HeaderVersion::V0,
            parent_hash: ZERO_HASH,
            coinbase: ZERO_ADDRESS,
            root: EMPTY_ROOT_HASH,
            tx_hash: EMPTY_ROOT_HASH,
            receipt_hash: EMPTY_ROOT_HASH,
            number: 0,
            epoch: 0,
            shard_id: 0,
            gas_limit: 0,
            gas_used: 0,
            time: 0,
            extra: Vec::new(),
            mix_digest: ZERO_HASH,
            shard_state_hash: ZERO_HASH,
            shard_state: Vec::new(),
        }
    }
}

impl Header {
    /// Keccak-256 of the RLP encoding.
    pub fn hash(&self) -> Hash {
        keccak256(&rlp::encode(self))
    }
}

const HEADER_FIELDS: usize = 16;

impl Encodable for Header {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(HEADER_FIELDS);
        s.append(&self.version.as_u8());
        s.append(&H256(self.parent_hash));
        s.append(&H160(self.coinbase));
        s.append(&H256(self.root));
        s.append(&H256(self.tx_hash));
        s.append(&H256(self.receipt_hash));
        s.append(&self.number);
        s.append(&self.epoch);
        s.append(&self.shard_id);
        s.append(&self.gas_limit);
        s.append(&self.gas_used);
        s.append(&self.time);
        s.append(&self.extra);
        s.append(&H256(self.mix_digest));
        s.append(&H256(self.shard_state_hash));
        s.append(&self.shard_state);
    }
}

impl Decodable for Header {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != HEADER_FIELDS {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let version = HeaderVersion::from_u8(rlp.val_at(0)?)
            .ok_or(DecoderError::Custom("unknown header version"))?;
        Ok(Self {
            version,
            parent_hash: rlp.val_at::<H256>(1)?.0,
            coinbase: rlp.val_at::<H160>(2)?.0,
            root: rlp.val_at::<H256>(3)?.0,
            tx_hash: rlp.val_at::<H256>(4)?.0,
            receipt_hash: rlp.val_at::<H256>(5)?.0,
            number: rlp.val_at(6)?,
            epoch: rlp.val_at(7)?,
            shard_id: rlp.val_at(8)?,
            gas_limit: rlp.val_at(9)?,
            gas_used: rlp.val_at(10)?,
            time: rlp.val_at(11)?,
            extra: rlp.val_at(12)?,
            mix_digest: rlp.val_at::<H256>(13)?.0,
            shard_state_hash: rlp.val_at::<H256>(14)?.0,
            shard_state: rlp.val_at(15)?,
        })
    }
}

/// Block body. Each entry is an already-encoded RLP item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockBody {
    pub transactions: Vec<Vec<u8>>,
    pub staking_transactions: Vec<Vec<u8>>,
    pub incoming_receipts: Vec<Vec<u8>>,
}

impl BlockBody {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.staking_transactions.is_empty()
            && self.incoming_receipts.is_empty()
    }
}

fn append_raw_list(s: &mut RlpStream, items: &[Vec<u8>]) {
    s.begin_list(items.len());
    for item in items {
        s.append_raw(item, 1);
    }
}

fn raw_list_at(rlp: &Rlp, index: usize) -> Result<Vec<Vec<u8>>, DecoderError> {
    let list = rlp.at(index)?;
    if !list.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }
    Ok(list.iter().map(|item| item.as_raw().to_vec()).collect())
}

impl Encodable for BlockBody {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        append_raw_list(s, &self.transactions);
        append_raw_list(s, &self.staking_transactions);
        append_raw_list(s, &self.incoming_receipts);
    }
}

impl Decodable for BlockBody {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 3 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            transactions: raw_list_at(rlp, 0)?,
            staking_transactions: raw_list_at(rlp, 1)?,
            incoming_receipts: raw_list_at(rlp, 2)?,
        })
    }
}

/// A header together with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: Header,
    pub body: BlockBody,
}

impl Block {
    /// A block with empty transaction, staking-transaction and receipt lists.
    ///
    /// The transaction and receipt roots are forced to the empty trie root.
    pub fn with_header(mut header: Header) -> Self {
        header.tx_hash = EMPTY_ROOT_HASH;
        header.receipt_hash = EMPTY_ROOT_HASH;
        Self {
            header,
            body: BlockBody::default(),
        }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn epoch(&self) -> u64 {
        self.header.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        Header {
            version: HeaderVersion::V3,
            shard_id: 2,
            gas_limit: 10_000_000,
            time: 1_561_736_306,
            extra: b"quantum".to_vec(),
            coinbase: [0xaa; 20],
            shard_state: vec![0x01, 0xc0],
            ..Header::default()
        }
    }

    #[test]
    fn test_header_rlp_roundtrip() {
        let header = sample_header();
        let decoded: Header = rlp::decode(&rlp::encode(&header)).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_header_hash_changes_with_fields() {
        let a = sample_header();
        let mut b = sample_header();
        b.time += 1;
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.hash(), sample_header().hash());
    }

    #[test]
    fn test_header_rejects_unknown_version() {
        let mut stream = RlpStream::new_list(HEADER_FIELDS);
        stream.append(&9u8);
        for _ in 1..HEADER_FIELDS {
            stream.append_empty_data();
        }
        let result: Result<Header, _> = rlp::decode(&stream.out());
        assert!(result.is_err());
    }

    #[test]
    fn test_block_with_header_forces_empty_roots() {
        let mut header = sample_header();
        header.tx_hash = [1u8; 32];
        let block = Block::with_header(header);
        assert_eq!(block.header.tx_hash, EMPTY_ROOT_HASH);
        assert_eq!(block.header.receipt_hash, EMPTY_ROOT_HASH);
        assert!(block.body.is_empty());
    }

    #[test]
    fn test_body_roundtrip_keeps_raw_items() {
        let body = BlockBody {
            transactions: vec![rlp::encode(&42u64).to_vec()],
            staking_transactions: vec![],
            incoming_receipts: vec![rlp::encode_list::<u64, u64>(&[1, 2]).to_vec()],
        };
        let decoded: BlockBody = rlp::decode(&rlp::encode(&body)).unwrap();
        assert_eq!(decoded, body);
    }
}
