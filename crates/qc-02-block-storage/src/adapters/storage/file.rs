use super::apply_batch;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed key-value store.
///
/// The whole map is held in memory and rewritten to disk on every mutation
/// through a temp file and rename, so the file always holds a complete
/// snapshot. File format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = decode_snapshot(&bytes)?;
                #[cfg(feature = "tracing-log")]
                tracing::info!(
                    "[qc-02] 💾 Loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing-log")]
                tracing::info!("[qc-02] 📁 No existing storage file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn save(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(&encode_snapshot(data))?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Persist `next` and only then make it the live map.
    fn replace(&mut self, next: BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), KVStoreError> {
        self.save(&next)?;
        self.data = next;
        Ok(())
    }
}

fn encode_snapshot(data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (key, value) in data {
        bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
    }
    bytes
}

fn decode_snapshot(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
    let mut data = BTreeMap::new();
    let mut cursor = 0;
    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        data.insert(key, value);
    }
    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let truncated = || KVStoreError::CorruptionError {
        message: format!("storage file truncated at offset {}", cursor),
    };
    let len_end = cursor.checked_add(4).filter(|end| *end <= bytes.len()).ok_or_else(truncated)?;
    let mut len = [0u8; 4];
    len.copy_from_slice(&bytes[*cursor..len_end]);
    let end = len_end
        .checked_add(u32::from_le_bytes(len) as usize)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(truncated)?;
    let chunk = bytes[len_end..end].to_vec();
    *cursor = end;
    Ok(chunk)
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        next.insert(key.to_vec(), value.to_vec());
        self.replace(next)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        next.remove(key);
        self.replace(next)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        apply_batch(&mut next, operations);
        self.replace(next)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}
