//! # Quantum-Chain Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (environment, then command-line arguments)
//! 2. Initialize logging
//! 3. Open the chain store under the data directory
//! 4. Write the genesis block, or check the stored one against it
//!
//! A failure in any step is logged and ends the process with status 1.

pub mod config;
pub mod genesis;

pub use config::{NodeConfig, CHAIN_STORE_FILE};
pub use genesis::{load_genesis, setup_genesis_block, SetupError, SetupOutcome};

use anyhow::Context;
use qc_02_block_storage::FileBackedKVStore;
use tracing::info;

/// Open the chain store for `config` and set up its genesis block.
pub fn run(config: &NodeConfig) -> anyhow::Result<SetupOutcome> {
    info!("===========================================");
    info!("  Quantum-Chain Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("failed to create data directory {}", config.data_dir.display())
    })?;

    let genesis = load_genesis(config.genesis_file.as_deref())?;

    let path = config.chain_store_path();
    let mut store = FileBackedKVStore::open(&path)
        .with_context(|| format!("failed to open chain store {}", path.display()))?;

    let outcome = setup_genesis_block(&mut store, &genesis).context("genesis setup failed")?;
    match &outcome {
        SetupOutcome::Created(block) => info!(
            block_hash = %hex::encode(block.hash()),
            root = %hex::encode(block.header.root),
            "[node] Genesis block written"
        ),
        SetupOutcome::Existing(hash) => info!(
            block_hash = %hex::encode(hash),
            "[node] Chain store already initialized"
        ),
    }
    Ok(outcome)
}
