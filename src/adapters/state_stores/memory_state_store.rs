use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::core::errors::{CertchainError, Result};
use crate::core::traits::state_store::StateStore;

/// In-process state store. Batches are applied under a single lock, so
/// other readers never observe half of one.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries.lock().map_err(|_| CertchainError::Store {
            detail: "memory store lock poisoned".into(),
        })
    }

    /// Copy of every key and value currently stored.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_batch(&self, writes: &[(String, Vec<u8>)]) -> Result<()> {
        let mut entries = self.lock()?;
        for (key, value) in writes {
            entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStateStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn put_overwrites() {
        let store = MemoryStateStore::new();
        store.put("k", b"1").unwrap();
        store.put("k", b"2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn batch_applies_all() {
        let store = MemoryStateStore::new();
        store
            .put_batch(&[("a".into(), b"1".to_vec()), ("b".into(), b"2".to_vec())])
            .unwrap();
        assert_eq!(store.snapshot().len(), 2);
    }
}
