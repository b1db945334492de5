use super::apply_batch;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::collections::BTreeMap;

/// In-memory key-value store.
///
/// Batches are applied under `&mut self`, so no reader observes a partial batch.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        apply_batch(&mut self.data, operations);
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_kv_store() {
        let mut store = InMemoryKVStore::new();

        store.put(b"key1", b"value1").unwrap();
        store.put(b"key2", b"value2").unwrap();

        assert_eq!(store.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get(b"key3").unwrap(), None);
        assert!(store.exists(b"key2").unwrap());

        store.delete(b"key1").unwrap();
        assert!(!store.exists(b"key1").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_batch_applies_puts_and_deletes() {
        let mut store = InMemoryKVStore::new();
        store
            .atomic_batch_write(vec![
                BatchOperation::put(b"h1".to_vec(), b"a".to_vec()),
                BatchOperation::put(b"h2".to_vec(), b"b".to_vec()),
                BatchOperation::put(b"x1".to_vec(), b"c".to_vec()),
                BatchOperation::delete(b"x1".to_vec()),
            ])
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b"h2").unwrap(), Some(b"b".to_vec()));
        assert!(!store.exists(b"x1").unwrap());
    }
}
