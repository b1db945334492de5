use crate::domain::{GenesisAlloc, GenesisError};
use qc_04_state_management::{Hash, StateDb, TrieDatabase};
use tracing::debug;

/// Apply `alloc` to an empty state, commit the tries to `db` and return the
/// state root.
///
/// Empty accounts are kept. The root only depends on the set of accounts.
pub fn materialize<DB: TrieDatabase + ?Sized>(
    alloc: &GenesisAlloc,
    db: &mut DB,
) -> Result<Hash, GenesisError> {
    let mut state = StateDb::new();
    for (address, account) in alloc {
        state.add_balance(*address, account.balance)?;
        state.set_code(*address, account.code.clone());
        state.set_nonce(*address, account.nonce);
        for (key, value) in &account.storage {
            state.set_storage(*address, *key, *value);
        }
    }

    let root = state.intermediate_root(false);
    state.commit(db)?;

    debug!(
        root = %hex::encode(root),
        accounts = alloc.len(),
        "[qc-18] Genesis state materialized"
    );
    Ok(root)
}
