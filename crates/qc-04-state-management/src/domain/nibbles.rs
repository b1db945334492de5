// =============================================================================
// NIBBLES: Half-byte path representation
// =============================================================================

/// Nibble path for trie traversal.
///
/// Keys are hashed before insertion, so every full path is 64 nibbles.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Nibbles(pub Vec<u8>);

impl Nibbles {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut nibbles = Vec::with_capacity(bytes.len() * 2);
        for byte in bytes {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        Nibbles(nibbles)
    }

    /// Pack back into bytes. Returns `None` for an odd-length path.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        if self.len() % 2 == 1 {
            return None;
        }
        Some(
            self.0
                .chunks(2)
                .map(|pair| (pair[0] << 4) | pair[1])
                .collect(),
        )
    }

    /// Get a slice of nibbles starting at offset.
    pub fn slice(&self, start: usize) -> Self {
        Nibbles(self.0[start..].to_vec())
    }

    pub fn slice_range(&self, start: usize, end: usize) -> Self {
        Nibbles(self.0[start..end].to_vec())
    }

    pub fn common_prefix_len(&self, other: &Nibbles) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    pub fn starts_with_at(&self, offset: usize, prefix: &Nibbles) -> bool {
        self.0.len() >= offset && self.0[offset..].starts_with(&prefix.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn at(&self, index: usize) -> u8 {
        self.0[index]
    }

    pub fn join(&self, other: &Nibbles) -> Self {
        let mut joined = self.0.clone();
        joined.extend_from_slice(&other.0);
        Nibbles(joined)
    }

    pub fn push(&self, nibble: u8) -> Self {
        let mut extended = self.0.clone();
        extended.push(nibble);
        Nibbles(extended)
    }

    /// Encode nibbles with hex-prefix for RLP encoding.
    ///
    /// First nibble encodes flags: 0=extension even, 1=extension odd,
    /// 2=leaf even, 3=leaf odd. An odd path carries its first nibble in the
    /// flag byte.
    pub fn encode_hex_prefix(&self, is_leaf: bool) -> Vec<u8> {
        let odd = self.len() % 2 == 1;
        let flag = if is_leaf { 2 } else { 0 } + u8::from(odd);

        let mut result = Vec::with_capacity(self.len() / 2 + 1);
        let rest = if odd {
            result.push((flag << 4) | self.0[0]);
            &self.0[1..]
        } else {
            result.push(flag << 4);
            &self.0[..]
        };
        for pair in rest.chunks(2) {
            result.push((pair[0] << 4) | pair[1]);
        }
        result
    }

    /// Decode hex-prefix encoded bytes back to nibbles and the leaf flag.
    pub fn decode_hex_prefix(encoded: &[u8]) -> Option<(Self, bool)> {
        let (&first, rest) = encoded.split_first()?;
        let flag = first >> 4;
        if flag > 3 {
            return None;
        }
        let is_leaf = flag >= 2;

        let mut nibbles = Vec::with_capacity(rest.len() * 2 + 1);
        if flag % 2 == 1 {
            nibbles.push(first & 0x0F);
        }
        for &byte in rest {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        Some((Nibbles(nibbles), is_leaf))
    }
}
