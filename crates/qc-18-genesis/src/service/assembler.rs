use crate::domain::{Genesis, GENESIS_EPOCH};
use crate::ports::HeaderFactory;
use shared_types::{Hash, Header, EMPTY_ROOT_HASH};

/// Build the genesis header from `genesis`, the materialized state `root` and
/// the wrapper-encoded shard state.
pub fn assemble_header(
    genesis: &Genesis,
    factory: &dyn HeaderFactory,
    root: Hash,
    shard_state: Vec<u8>,
) -> Header {
    Header {
        version: factory.header_version(GENESIS_EPOCH),
        parent_hash: genesis.parent_hash,
        coinbase: genesis.coinbase,
        root,
        tx_hash: EMPTY_ROOT_HASH,
        receipt_hash: EMPTY_ROOT_HASH,
        number: genesis.number,
        epoch: GENESIS_EPOCH,
        shard_id: genesis.shard_id,
        gas_limit: genesis.gas_limit,
        gas_used: genesis.gas_used,
        time: genesis.timestamp,
        extra: genesis.extra_data.clone(),
        mix_digest: genesis.mix_hash,
        shard_state_hash: genesis.shard_state_hash,
        shard_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::HeaderVersion;

    #[derive(Debug)]
    struct FixedVersion(HeaderVersion);

    impl HeaderFactory for FixedVersion {
        fn header_version(&self, _epoch: u64) -> HeaderVersion {
            self.0
        }
    }

    #[test]
    fn test_header_carries_spec_fields() {
        let genesis = Genesis {
            timestamp: 99,
            extra_data: b"hello".to_vec(),
            gas_limit: 5000,
            gas_used: 12,
            shard_id: 2,
            mix_hash: [3; 32],
            coinbase: [4; 20],
            parent_hash: [5; 32],
            shard_state_hash: [6; 32],
            ..Genesis::default()
        };
        let header = assemble_header(&genesis, &FixedVersion(HeaderVersion::V1), [7; 32], vec![0xc0]);

        assert_eq!(header.version, HeaderVersion::V1);
        assert_eq!(header.number, 0);
        assert_eq!(header.epoch, GENESIS_EPOCH);
        assert_eq!(header.time, 99);
        assert_eq!(header.extra, b"hello".to_vec());
        assert_eq!(header.gas_limit, 5000);
        assert_eq!(header.gas_used, 12);
        assert_eq!(header.shard_id, 2);
        assert_eq!(header.mix_digest, [3; 32]);
        assert_eq!(header.coinbase, [4; 20]);
        assert_eq!(header.parent_hash, [5; 32]);
        assert_eq!(header.shard_state_hash, [6; 32]);
        assert_eq!(header.root, [7; 32]);
        assert_eq!(header.shard_state, vec![0xc0]);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let genesis = Genesis {
            gas_limit: 1,
            ..Genesis::default()
        };
        let factory = FixedVersion(HeaderVersion::V0);
        let first = assemble_header(&genesis, &factory, [1; 32], vec![0xc0]);
        let second = assemble_header(&genesis, &factory, [1; 32], vec![0xc0]);
        assert_eq!(first.hash(), second.hash());
    }
}
