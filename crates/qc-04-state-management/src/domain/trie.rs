use super::{
    nibbles::Nibbles,
    node::{NodeRef, TrieNode},
    Hash, EMPTY_ROOT_HASH,
};
use shared_types::keccak256;
use std::collections::BTreeMap;

/// Root hash of a trie plus every node a database needs to serve it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrieCommit {
    pub root: Hash,
    /// `(keccak256(encoding), encoding)` for each hashed node, root included.
    pub nodes: Vec<(Hash, Vec<u8>)>,
}

/// Secure Patricia Merkle Trie.
///
/// Keys are hashed with Keccak256 before insertion. Entries are held in a
/// sorted map and the node structure is derived on demand, so the root depends
/// only on the key/value set, never on insertion order.
#[derive(Clone, Debug, Default)]
pub struct SecureTrie {
    entries: BTreeMap<Hash, Vec<u8>>,
}

impl SecureTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &[u8], value: Vec<u8>) {
        self.entries.insert(keccak256(key), value);
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.remove(&keccak256(key))
    }

    pub fn get(&self, key: &[u8]) -> Option<&Vec<u8>> {
        self.entries.get(&keccak256(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn root_hash(&self) -> Hash {
        self.commit().root
    }

    /// Build the node structure and return the root with all hashed nodes.
    pub fn commit(&self) -> TrieCommit {
        if self.entries.is_empty() {
            return TrieCommit {
                root: EMPTY_ROOT_HASH,
                nodes: Vec::new(),
            };
        }

        let items: Vec<(Nibbles, &[u8])> = self
            .entries
            .iter()
            .map(|(key, value)| (Nibbles::from_bytes(key), value.as_slice()))
            .collect();

        let mut nodes = Vec::new();
        let encoded = build_node(&items, 0, &mut nodes).rlp_encode();
        // The root is always referenced by hash, however short.
        let root = keccak256(&encoded);
        nodes.push((root, encoded));
        TrieCommit { root, nodes }
    }
}

/// Build the node covering `items`, all of which share their first `depth` nibbles.
///
/// `items` must be sorted and non-empty.
fn build_node(items: &[(Nibbles, &[u8])], depth: usize, nodes: &mut Vec<(Hash, Vec<u8>)>) -> TrieNode {
    if let [(path, value)] = items {
        return TrieNode::Leaf {
            path: path.slice(depth),
            value: value.to_vec(),
        };
    }

    // Sorted input: the common prefix of first and last is shared by all.
    let first = &items[0].0;
    let last = &items[items.len() - 1].0;
    let shared = first.slice(depth).common_prefix_len(&last.slice(depth));
    if shared > 0 {
        let child = build_node(items, depth + shared, nodes);
        return TrieNode::Extension {
            path: first.slice_range(depth, depth + shared),
            child: NodeRef::from_encoded(child.rlp_encode(), nodes),
        };
    }

    let mut children: [Option<NodeRef>; 16] = Default::default();
    let mut value = None;
    let mut start = 0;
    if first.len() == depth {
        value = Some(items[0].1.to_vec());
        start = 1;
    }
    while start < items.len() {
        let nibble = items[start].0.at(depth);
        let end = start
            + items[start..]
                .iter()
                .take_while(|(path, _)| path.at(depth) == nibble)
                .count();
        let child = build_node(&items[start..end], depth + 1, nodes);
        children[nibble as usize] = Some(NodeRef::from_encoded(child.rlp_encode(), nodes));
        start = end;
    }

    TrieNode::Branch {
        children: Box::new(children),
        value,
    }
}
