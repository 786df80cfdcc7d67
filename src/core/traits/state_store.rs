use crate::core::errors::Result;

/// Port for the external key-value state the ledger replicates.
///
/// Implementations live in `adapters::state_stores`. Keys are built by the
/// registries and are namespaced per entity kind; values are opaque bytes.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Submit all writes of one invocation together.
    ///
    /// The default applies them one by one. Backends that can commit a
    /// set of keys atomically should override this.
    fn put_batch(&self, writes: &[(String, Vec<u8>)]) -> Result<()> {
        for (key, value) in writes {
            self.put(key, value)?;
        }
        Ok(())
    }
}
