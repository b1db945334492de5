//! # Node Configuration
//!
//! Read from the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `QC_DATA_DIR` | `./data` | Directory holding the chain store |
//! | `QC_GENESIS_FILE` | unset | Genesis JSON; the built-in dev genesis when unset |
//! | `QC_LOG_LEVEL` | `info` | Log filter when `RUST_LOG` is unset |
//! | `QC_JSON_LOGS` | `false` | Emit JSON log lines |
//!
//! A genesis path given as the first command-line argument overrides
//! `QC_GENESIS_FILE`.

use std::path::PathBuf;

/// File name of the chain store inside the data directory.
pub const CHAIN_STORE_FILE: &str = "chaindata.bin";

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub data_dir: PathBuf,
    pub genesis_file: Option<PathBuf>,
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            genesis_file: None,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for variable values. Unset and empty values keep
    /// the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(dir) = var("QC_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = var("QC_GENESIS_FILE") {
            config.genesis_file = Some(PathBuf::from(file));
        }
        if let Some(level) = var("QC_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(json) = var("QC_JSON_LOGS") {
            config.json_logs = matches!(json.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        config
    }

    /// Apply command-line arguments (program name excluded).
    pub fn with_args<I>(mut self, mut args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        if let Some(path) = args.next() {
            self.genesis_file = Some(PathBuf::from(path));
        }
        self
    }

    pub fn chain_store_path(&self) -> PathBuf {
        self.data_dir.join(CHAIN_STORE_FILE)
    }
}
