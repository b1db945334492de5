use shared_types::HeaderVersion;
use std::fmt;

/// Chooses header versions per epoch.
///
/// Production: `ChainHeaderFactory`, driven by the resolved chain config.
pub trait HeaderFactory: Send + Sync + fmt::Debug {
    /// Version of headers produced at `epoch`.
    fn header_version(&self, epoch: u64) -> HeaderVersion;
}
