use super::{
    decode_storage_value, nibbles::Nibbles, node::NodeRef, node::TrieNode, AccountState, Address,
    Hash, StateError, StorageKey, StorageValue, EMPTY_CODE_HASH, EMPTY_ROOT_HASH,
};
use crate::ports::TrieDatabase;
use shared_types::keccak256;

/// Read-only view of a committed secure trie.
pub struct TrieReader<'db, DB: TrieDatabase + ?Sized> {
    db: &'db DB,
    root: Hash,
}

impl<'db, DB: TrieDatabase + ?Sized> TrieReader<'db, DB> {
    pub fn new(db: &'db DB, root: Hash) -> Self {
        Self { db, root }
    }

    fn resolve(&self, node: &NodeRef) -> Result<Vec<u8>, StateError> {
        match node {
            NodeRef::Inline(raw) => Ok(raw.clone()),
            NodeRef::Hash(hash) => self
                .db
                .get_node(hash)?
                .ok_or(StateError::MissingNode { hash: *hash }),
        }
    }

    /// Look up `key` (hashed before the walk).
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        if self.root == EMPTY_ROOT_HASH {
            return Ok(None);
        }
        let path = Nibbles::from_bytes(&keccak256(key));
        let mut encoded = self.resolve(&NodeRef::Hash(self.root))?;
        let mut depth = 0;

        loop {
            match TrieNode::decode(&encoded)? {
                TrieNode::Leaf { path: rest, value } => {
                    return Ok((path.slice(depth) == rest).then_some(value));
                }
                TrieNode::Extension { path: prefix, child } => {
                    if !path.starts_with_at(depth, &prefix) {
                        return Ok(None);
                    }
                    depth += prefix.len();
                    encoded = self.resolve(&child)?;
                }
                TrieNode::Branch { children, value } => {
                    if depth == path.len() {
                        return Ok(value);
                    }
                    match &children[path.at(depth) as usize] {
                        Some(child) => {
                            depth += 1;
                            encoded = self.resolve(child)?;
                        }
                        None => return Ok(None),
                    }
                }
            }
        }
    }

    /// Every `(hashed key, value)` pair, in key order.
    pub fn entries(&self) -> Result<Vec<(Hash, Vec<u8>)>, StateError> {
        let mut out = Vec::new();
        if self.root != EMPTY_ROOT_HASH {
            let encoded = self.resolve(&NodeRef::Hash(self.root))?;
            self.collect(&encoded, Nibbles::default(), &mut out)?;
        }
        Ok(out)
    }

    fn collect(
        &self,
        encoded: &[u8],
        prefix: Nibbles,
        out: &mut Vec<(Hash, Vec<u8>)>,
    ) -> Result<(), StateError> {
        match TrieNode::decode(encoded)? {
            TrieNode::Leaf { path, value } => push_entry(&prefix.join(&path), value, out),
            TrieNode::Extension { path, child } => {
                let child = self.resolve(&child)?;
                self.collect(&child, prefix.join(&path), out)
            }
            TrieNode::Branch { children, value } => {
                if let Some(value) = value {
                    push_entry(&prefix, value, out)?;
                }
                for (nibble, child) in children.iter().enumerate() {
                    if let Some(child) = child {
                        let child = self.resolve(child)?;
                        self.collect(&child, prefix.push(nibble as u8), out)?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn push_entry(
    path: &Nibbles,
    value: Vec<u8>,
    out: &mut Vec<(Hash, Vec<u8>)>,
) -> Result<(), StateError> {
    let key: Hash = path
        .to_bytes()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| StateError::CorruptNode(format!("key path of {} nibbles", path.len())))?;
    out.push((key, value));
    Ok(())
}

/// Reads accounts, storage and code back from a committed state root.
pub struct StateReader<'db, DB: TrieDatabase + ?Sized> {
    db: &'db DB,
    accounts: TrieReader<'db, DB>,
}

impl<'db, DB: TrieDatabase + ?Sized> StateReader<'db, DB> {
    pub fn new(db: &'db DB, root: Hash) -> Self {
        Self {
            db,
            accounts: TrieReader::new(db, root),
        }
    }

    pub fn account(&self, address: &Address) -> Result<Option<AccountState>, StateError> {
        self.accounts
            .get(address)?
            .map(|encoded| rlp::decode::<AccountState>(&encoded).map_err(StateError::from))
            .transpose()
    }

    pub fn storage(&self, address: &Address, key: &StorageKey) -> Result<StorageValue, StateError> {
        let Some(account) = self.account(address)? else {
            return Ok([0u8; 32]);
        };
        match TrieReader::new(self.db, account.storage_root).get(key)? {
            Some(encoded) => Ok(decode_storage_value(&encoded)?),
            None => Ok([0u8; 32]),
        }
    }

    pub fn code(&self, address: &Address) -> Result<Vec<u8>, StateError> {
        let Some(account) = self.account(address)? else {
            return Ok(Vec::new());
        };
        if account.code_hash == EMPTY_CODE_HASH {
            return Ok(Vec::new());
        }
        self.db
            .get_code(&account.code_hash)?
            .ok_or(StateError::MissingCode {
                hash: account.code_hash,
            })
    }

    pub fn account_count(&self) -> Result<usize, StateError> {
        Ok(self.accounts.entries()?.len())
    }
}
