//! Built-in development genesis, used when the node is given no genesis file.

use super::errors::GenesisError;
use super::spec::{Genesis, GenesisAccount, GenesisAlloc, GENESIS_EPOCH};
use qc_14_sharding::{Committee, ShardState, Slot};
use shared_types::{Address, U256};

/// Funded developer account.
pub const DEV_ACCOUNT: Address = [
    0x0b, 0x58, 0x5f, 0x8d, 0xae, 0xfb, 0xc6, 0x8a, 0x31, 0x1f, 0xbd, 0x4c, 0xb2, 0x0d, 0x91,
    0x74, 0xad, 0x17, 0x40, 0x16,
];

pub const DEV_GAS_LIMIT: u64 = 10_000_000;

const DEV_TIMESTAMP: u64 = 1_561_734_000;

/// Single-shard, single-seat development chain funding [`DEV_ACCOUNT`] with
/// 10^9 whole tokens.
pub fn dev_genesis() -> Result<Genesis, GenesisError> {
    let shard_state = ShardState {
        epoch: GENESIS_EPOCH,
        shards: vec![Committee {
            shard_id: 0,
            slots: vec![Slot {
                ecdsa_address: DEV_ACCOUNT,
                bls_public_key: [0x11; 48],
                effective_stake: None,
            }],
        }],
    };

    let mut alloc = GenesisAlloc::new();
    alloc.insert(DEV_ACCOUNT, GenesisAccount::with_balance(U256::exp10(27)));

    Ok(Genesis {
        timestamp: DEV_TIMESTAMP,
        extra_data: b"Quantum-Chain devnet".to_vec(),
        gas_limit: DEV_GAS_LIMIT,
        alloc,
        shard_state_hash: shard_state.hash()?,
        shard_state,
        ..Genesis::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_genesis_is_consistent() {
        let genesis = dev_genesis().unwrap();
        assert!(genesis.config.is_none());
        assert_eq!(genesis.alloc.len(), 1);
        assert_eq!(genesis.shard_state_hash, genesis.shard_state.hash().unwrap());
        assert_eq!(
            genesis.alloc.get(&DEV_ACCOUNT).unwrap().balance,
            U256::exp10(27)
        );
    }
}
