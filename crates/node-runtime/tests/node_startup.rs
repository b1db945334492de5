//! Node startup against a real data directory.

use node_runtime::{run, NodeConfig, SetupError, SetupOutcome};
use qc_02_block_storage::{read_canonical_hash, FileBackedKVStore};
use qc_18_genesis::{dev_genesis, GenesisAccount};
use shared_types::U256;

fn config(dir: &std::path::Path, genesis_file: Option<std::path::PathBuf>) -> NodeConfig {
    NodeConfig {
        data_dir: dir.join("data"),
        genesis_file,
        ..NodeConfig::default()
    }
}

#[test]
fn test_restart_reuses_stored_genesis() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), None);

    let first = run(&config).unwrap();
    assert!(matches!(first, SetupOutcome::Created(_)));

    let second = run(&config).unwrap();
    assert_eq!(second, SetupOutcome::Existing(first.genesis_hash()));

    let store = FileBackedKVStore::open(config.chain_store_path()).unwrap();
    assert_eq!(
        read_canonical_hash(&store, 0).unwrap(),
        Some(first.genesis_hash())
    );
}

#[test]
fn test_changed_genesis_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("genesis.json");

    let mut genesis = dev_genesis().unwrap();
    std::fs::write(&path, genesis.to_json().unwrap()).unwrap();
    let config = config(dir.path(), Some(path.clone()));
    let created = run(&config).unwrap();
    assert_eq!(created.genesis_hash(), genesis.hash().unwrap());

    genesis
        .alloc
        .insert([0x77; 20], GenesisAccount::with_balance(U256::from(5u64)));
    std::fs::write(&path, genesis.to_json().unwrap()).unwrap();

    let err = run(&config).unwrap_err();
    let mismatch = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<SetupError>())
        .unwrap();
    assert!(matches!(mismatch, SetupError::Mismatch(_)));
    assert!(format!("{:#}", err).contains("incompatible genesis block"));
}
