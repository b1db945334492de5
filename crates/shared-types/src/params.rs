//! # Chain Parameters
//!
//! Chain configuration persisted alongside the genesis block. Fork epochs
//! decide which header layout and shard-state encoding a block uses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel epoch meaning "not scheduled".
pub const EPOCH_TBD: u64 = 10_000_000;

fn epoch_tbd() -> u64 {
    EPOCH_TBD
}

/// Protocol parameters of a chain.
///
/// Unrecognised keys are kept in `extra` so a stored configuration survives a
/// decode/encode cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChainConfig {
    pub chain_id: u64,
    #[serde(default)]
    pub eth_compatible_chain_id: u64,
    #[serde(default = "epoch_tbd")]
    pub cross_tx_epoch: u64,
    #[serde(default = "epoch_tbd")]
    pub cross_link_epoch: u64,
    #[serde(default = "epoch_tbd")]
    pub staking_epoch: u64,
    #[serde(rename = "prestaking-epoch", default = "epoch_tbd")]
    pub pre_staking_epoch: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ChainConfig {
    /// Every protocol change active from epoch 0. Used when no configuration is supplied.
    pub fn all_protocol_changes() -> Self {
        Self {
            chain_id: 100,
            eth_compatible_chain_id: 1337,
            cross_tx_epoch: 0,
            cross_link_epoch: 0,
            staking_epoch: 0,
            pre_staking_epoch: 0,
            extra: BTreeMap::new(),
        }
    }

    pub fn is_cross_tx(&self, epoch: u64) -> bool {
        epoch >= self.cross_tx_epoch
    }

    pub fn is_cross_link(&self, epoch: u64) -> bool {
        epoch >= self.cross_link_epoch
    }

    pub fn is_pre_staking(&self, epoch: u64) -> bool {
        epoch >= self.pre_staking_epoch
    }

    pub fn is_staking(&self, epoch: u64) -> bool {
        epoch >= self.staking_epoch
    }
}
