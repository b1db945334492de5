use super::{
    encode_storage_value, AccountState, Address, Hash, SecureTrie, StateError, StorageKey,
    StorageValue, TrieCommit, EMPTY_CODE_HASH, U256,
};
use crate::ports::TrieDatabase;
use shared_types::keccak256;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
struct StateObject {
    nonce: u64,
    balance: U256,
    code: Vec<u8>,
    storage: BTreeMap<StorageKey, StorageValue>,
}

impl StateObject {
    fn code_hash(&self) -> Hash {
        if self.code.is_empty() {
            EMPTY_CODE_HASH
        } else {
            keccak256(&self.code)
        }
    }

    fn is_empty(&self) -> bool {
        self.nonce == 0 && self.balance.is_zero() && self.code.is_empty()
    }

    fn storage_trie(&self) -> SecureTrie {
        let mut trie = SecureTrie::new();
        for (key, value) in &self.storage {
            trie.insert(key, encode_storage_value(value));
        }
        trie
    }
}

/// Mutable account state accumulated before it is committed.
///
/// Touching an account through any setter creates it. Zero-valued storage
/// writes clear the slot.
#[derive(Clone, Debug, Default)]
pub struct StateDb {
    objects: BTreeMap<Address, StateObject>,
}

impl StateDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn object_mut(&mut self, address: Address) -> &mut StateObject {
        self.objects.entry(address).or_default()
    }

    pub fn add_balance(&mut self, address: Address, amount: U256) -> Result<(), StateError> {
        let object = self.object_mut(address);
        object.balance = object
            .balance
            .checked_add(amount)
            .ok_or(StateError::BalanceOverflow { address })?;
        Ok(())
    }

    pub fn set_code(&mut self, address: Address, code: Vec<u8>) {
        self.object_mut(address).code = code;
    }

    pub fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.object_mut(address).nonce = nonce;
    }

    pub fn set_storage(&mut self, address: Address, key: StorageKey, value: StorageValue) {
        let storage = &mut self.object_mut(address).storage;
        if value == [0u8; 32] {
            storage.remove(&key);
        } else {
            storage.insert(key, value);
        }
    }

    pub fn exists(&self, address: &Address) -> bool {
        self.objects.contains_key(address)
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.objects
            .get(address)
            .map(|o| o.balance)
            .unwrap_or_default()
    }

    pub fn nonce(&self, address: &Address) -> u64 {
        self.objects.get(address).map(|o| o.nonce).unwrap_or(0)
    }

    pub fn storage(&self, address: &Address, key: &StorageKey) -> StorageValue {
        self.objects
            .get(address)
            .and_then(|o| o.storage.get(key).copied())
            .unwrap_or([0u8; 32])
    }

    /// Current state root. When `delete_empty` is set, empty accounts are
    /// dropped first; otherwise they stay in the trie.
    pub fn intermediate_root(&mut self, delete_empty: bool) -> Hash {
        if delete_empty {
            self.objects.retain(|_, object| !object.is_empty());
        }
        self.build().0.root
    }

    /// Write contract code, then the storage and account trie nodes in a
    /// single `batch_put`, to `db`.
    ///
    /// Returns the state root.
    pub fn commit<DB: TrieDatabase + ?Sized>(&self, db: &mut DB) -> Result<Hash, StateError> {
        let (accounts, storage) = self.build();

        for object in self.objects.values() {
            if !object.code.is_empty() {
                db.put_code(object.code_hash(), object.code.clone())?;
            }
        }
        let root = accounts.root;
        let mut nodes: Vec<_> = storage.into_iter().flat_map(|c| c.nodes).collect();
        nodes.extend(accounts.nodes);
        if !nodes.is_empty() {
            db.batch_put(nodes)?;
        }
        Ok(root)
    }

    fn build(&self) -> (TrieCommit, Vec<TrieCommit>) {
        let mut accounts = SecureTrie::new();
        let mut storage = Vec::new();
        for (address, object) in &self.objects {
            let storage_commit = object.storage_trie().commit();
            let account = AccountState {
                nonce: object.nonce,
                balance: object.balance,
                storage_root: storage_commit.root,
                code_hash: object.code_hash(),
            };
            accounts.insert(address, rlp::encode(&account).to_vec());
            storage.push(storage_commit);
        }
        (accounts.commit(), storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTrieDb;
    use crate::domain::EMPTY_ROOT_HASH;

    fn addr(n: u8) -> Address {
        let mut a = [0u8; 20];
        a[19] = n;
        a
    }

    #[test]
    fn test_empty_state_root() {
        let mut state = StateDb::new();
        assert_eq!(state.intermediate_root(false), EMPTY_ROOT_HASH);
    }

    #[test]
    fn test_add_balance_accumulates() {
        let mut state = StateDb::new();
        state.add_balance(addr(1), U256::from(5u64)).unwrap();
        state.add_balance(addr(1), U256::from(7u64)).unwrap();
        assert_eq!(state.balance(&addr(1)), U256::from(12u64));
    }

    #[test]
    fn test_add_balance_overflow() {
        let mut state = StateDb::new();
        state.add_balance(addr(1), U256::MAX).unwrap();
        let err = state.add_balance(addr(1), U256::one()).unwrap_err();
        assert_eq!(err, StateError::BalanceOverflow { address: addr(1) });
    }

    #[test]
    fn test_zero_storage_write_clears_slot() {
        let mut state = StateDb::new();
        let mut one = [0u8; 32];
        one[31] = 1;
        state.set_storage(addr(1), [0u8; 32], one);
        let with_slot = state.intermediate_root(false);
        state.set_storage(addr(1), [0u8; 32], [0u8; 32]);
        assert_eq!(state.storage(&addr(1), &[0u8; 32]), [0u8; 32]);
        assert_ne!(state.intermediate_root(false), with_slot);
    }

    #[test]
    fn test_empty_accounts_kept_unless_deleted() {
        let mut state = StateDb::new();
        state.add_balance(addr(1), U256::zero()).unwrap();
        assert!(state.exists(&addr(1)));
        assert_ne!(state.intermediate_root(false), EMPTY_ROOT_HASH);
        assert_eq!(state.intermediate_root(true), EMPTY_ROOT_HASH);
        assert!(!state.exists(&addr(1)));
    }

    #[test]
    fn test_commit_matches_intermediate_root() {
        let mut state = StateDb::new();
        state.add_balance(addr(1), U256::exp10(18)).unwrap();
        state.set_code(addr(2), vec![0x60, 0x00, 0x60, 0x00]);
        state.set_nonce(addr(2), 3);
        let root = state.intermediate_root(false);

        let mut db = InMemoryTrieDb::new();
        assert_eq!(state.commit(&mut db).unwrap(), root);
        assert_eq!(db.code_count(), 1);
        assert!(db.get_node(&root).unwrap().is_some());
    }

    /// Counts `batch_put` calls on top of an in-memory database.
    #[derive(Default)]
    struct CountingDb {
        inner: InMemoryTrieDb,
        batches: usize,
    }

    impl TrieDatabase for CountingDb {
        fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError> {
            self.inner.get_node(hash)
        }

        fn batch_put(&mut self, nodes: Vec<(Hash, Vec<u8>)>) -> Result<(), StateError> {
            self.batches += 1;
            self.inner.batch_put(nodes)
        }

        fn get_code(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError> {
            self.inner.get_code(hash)
        }

        fn put_code(&mut self, hash: Hash, code: Vec<u8>) -> Result<(), StateError> {
            self.inner.put_code(hash, code)
        }
    }

    #[test]
    fn test_commit_writes_nodes_in_one_batch() {
        let mut state = StateDb::new();
        for n in 1..=200 {
            state.add_balance(addr(n), U256::from(n)).unwrap();
        }
        let mut one = [0u8; 32];
        one[31] = 1;
        state.set_storage(addr(7), one, one);

        let mut db = CountingDb::default();
        let root = state.commit(&mut db).unwrap();
        assert_eq!(db.batches, 1);
        assert!(db.inner.get_node(&root).unwrap().is_some());
    }

    #[test]
    fn test_empty_state_commit_writes_nothing() {
        let mut db = CountingDb::default();
        assert_eq!(StateDb::new().commit(&mut db).unwrap(), EMPTY_ROOT_HASH);
        assert_eq!(db.batches, 0);
        assert_eq!(db.inner.node_count(), 0);
    }
}
