use crate::ports::HeaderFactory;
use shared_types::{ChainConfig, HeaderVersion};

/// Header versions follow the fork schedule of a chain configuration.
#[derive(Clone, Debug)]
pub struct ChainHeaderFactory {
    config: ChainConfig,
}

impl ChainHeaderFactory {
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl HeaderFactory for ChainHeaderFactory {
    fn header_version(&self, epoch: u64) -> HeaderVersion {
        let config = &self.config;
        if config.is_staking(epoch) || config.is_pre_staking(epoch) {
            HeaderVersion::V3
        } else if config.is_cross_link(epoch) {
            HeaderVersion::V2
        } else if config.is_cross_tx(epoch) {
            HeaderVersion::V1
        } else {
            HeaderVersion::V0
        }
    }
}
