//! # Quantum-Chain Node Runtime
//!
//! Entry point. See the library crate for the startup sequence.

use anyhow::Result;
use node_runtime::NodeConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &NodeConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.json_logs {
        builder.json().try_init().map_err(|e| anyhow::anyhow!("{}", e))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    Ok(())
}

fn main() {
    let config = NodeConfig::from_env().with_args(std::env::args().skip(1));

    if let Err(e) = init_logging(&config) {
        eprintln!("failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = node_runtime::run(&config) {
        error!("Fatal: {:#}", e);
        std::process::exit(1);
    }
}
