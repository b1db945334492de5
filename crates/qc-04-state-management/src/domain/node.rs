use super::{nibbles::Nibbles, Hash, StateError};
use primitive_types::H256;
use rlp::{Rlp, RlpStream};
use shared_types::keccak256;

// =============================================================================
// TRIE NODE: Leaf, extension and branch nodes of the MPT
// =============================================================================

/// Reference from a parent node to a child.
///
/// Children whose encoding is shorter than 32 bytes are embedded in the parent;
/// everything else is referenced by the Keccak256 of its encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Hash(Hash),
    Inline(Vec<u8>),
}

impl NodeRef {
    /// Reference an encoded child, recording it in `nodes` when it is hashed.
    pub fn from_encoded(encoded: Vec<u8>, nodes: &mut Vec<(Hash, Vec<u8>)>) -> Self {
        if encoded.len() < 32 {
            NodeRef::Inline(encoded)
        } else {
            let hash = keccak256(&encoded);
            nodes.push((hash, encoded));
            NodeRef::Hash(hash)
        }
    }

    fn append_to(&self, s: &mut RlpStream) {
        match self {
            NodeRef::Hash(hash) => {
                s.append(&H256(*hash));
            }
            NodeRef::Inline(raw) => {
                s.append_raw(raw, 1);
            }
        }
    }

    fn decode(item: &Rlp) -> Result<Option<Self>, StateError> {
        if item.is_list() {
            return Ok(Some(NodeRef::Inline(item.as_raw().to_vec())));
        }
        let data = item.data()?;
        match data.len() {
            0 => Ok(None),
            32 => {
                let mut hash = [0u8; 32];
                hash.copy_from_slice(data);
                Ok(Some(NodeRef::Hash(hash)))
            }
            n => Err(StateError::CorruptNode(format!(
                "child reference of {} bytes",
                n
            ))),
        }
    }
}

/// Node types in the Patricia Merkle Trie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieNode {
    /// RLP: [hex_prefix(path, true), value]
    Leaf { path: Nibbles, value: Vec<u8> },

    /// RLP: [hex_prefix(path, false), child]
    Extension { path: Nibbles, child: NodeRef },

    /// RLP: \[child\[0\], ..., child\[15\], value\]
    Branch {
        children: Box<[Option<NodeRef>; 16]>,
        value: Option<Vec<u8>>,
    },
}

impl TrieNode {
    pub fn rlp_encode(&self) -> Vec<u8> {
        match self {
            TrieNode::Leaf { path, value } => {
                let mut s = RlpStream::new_list(2);
                s.append(&path.encode_hex_prefix(true));
                s.append(value);
                s.out().to_vec()
            }

            TrieNode::Extension { path, child } => {
                let mut s = RlpStream::new_list(2);
                s.append(&path.encode_hex_prefix(false));
                child.append_to(&mut s);
                s.out().to_vec()
            }

            TrieNode::Branch { children, value } => {
                let mut s = RlpStream::new_list(17);
                for child in children.iter() {
                    match child {
                        Some(child) => child.append_to(&mut s),
                        None => {
                            s.append_empty_data();
                        }
                    }
                }
                match value {
                    Some(value) => {
                        s.append(value);
                    }
                    None => {
                        s.append_empty_data();
                    }
                }
                s.out().to_vec()
            }
        }
    }

    pub fn decode(encoded: &[u8]) -> Result<Self, StateError> {
        let rlp = Rlp::new(encoded);
        match rlp.item_count()? {
            2 => {
                let (path, is_leaf) = Nibbles::decode_hex_prefix(rlp.at(0)?.data()?)
                    .ok_or_else(|| StateError::CorruptNode("bad hex-prefix path".into()))?;
                if is_leaf {
                    Ok(TrieNode::Leaf {
                        path,
                        value: rlp.at(1)?.data()?.to_vec(),
                    })
                } else {
                    let child = NodeRef::decode(&rlp.at(1)?)?.ok_or_else(|| {
                        StateError::CorruptNode("extension without child".into())
                    })?;
                    Ok(TrieNode::Extension { path, child })
                }
            }
            17 => {
                let mut children: [Option<NodeRef>; 16] = Default::default();
                for (i, slot) in children.iter_mut().enumerate() {
                    *slot = NodeRef::decode(&rlp.at(i)?)?;
                }
                let value = rlp.at(16)?.data()?;
                Ok(TrieNode::Branch {
                    children: Box::new(children),
                    value: (!value.is_empty()).then(|| value.to_vec()),
                })
            }
            n => Err(StateError::CorruptNode(format!("node with {} items", n))),
        }
    }
}
