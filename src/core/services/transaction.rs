use std::collections::BTreeMap;

use crate::core::errors::Result;
use crate::core::traits::state_store::StateStore;

/// Staged writes of a single invocation.
///
/// Reads see the invocation's own writes first, then the store. Nothing
/// reaches the store until `commit`, which submits every staged key in
/// one `put_batch`. Dropping a transaction discards its writes.
pub struct Transaction<'s, S: StateStore> {
    store: &'s S,
    pending: BTreeMap<String, Vec<u8>>,
}

impl<'s, S: StateStore> Transaction<'s, S> {
    pub fn begin(store: &'s S) -> Self {
        Self {
            store,
            pending: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.pending.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.store.get(key),
        }
    }

    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.pending.insert(key.into(), value);
    }

    /// Number of keys staged so far.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Submit all staged writes together. Returns how many keys were written.
    pub fn commit(self) -> Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        let writes: Vec<(String, Vec<u8>)> = self.pending.into_iter().collect();
        self.store.put_batch(&writes)?;
        Ok(writes.len())
    }
}
