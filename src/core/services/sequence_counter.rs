use crate::core::errors::{CertchainError, Result};
use crate::core::services::transaction::Transaction;
use crate::core::traits::state_store::StateStore;

/// Key of the singleton counter.
pub const COUNTER_KEY: &str = "#Counter#";

/// Hands out increasing sequence numbers persisted under `#Counter#`.
///
/// The value is stored as decimal text.
pub struct SequenceCounter;

impl SequenceCounter {
    /// Write `start` unless a counter already exists. Returns the value the
    /// counter holds afterwards.
    pub fn init<S: StateStore>(&self, tx: &mut Transaction<'_, S>, start: u64) -> Result<u64> {
        if let Some(current) = self.current(tx)? {
            return Ok(current);
        }
        tx.put(COUNTER_KEY, start.to_string().into_bytes());
        Ok(start)
    }

    pub fn current<S: StateStore>(&self, tx: &Transaction<'_, S>) -> Result<Option<u64>> {
        let Some(bytes) = tx.get(COUNTER_KEY)? else {
            return Ok(None);
        };
        let text = String::from_utf8_lossy(&bytes);
        text.trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| CertchainError::Store {
                detail: format!("counter value '{text}' is not a number: {e}"),
            })
    }

    /// Advance the counter and return the new value.
    pub fn next<S: StateStore>(&self, tx: &mut Transaction<'_, S>) -> Result<u64> {
        let current = self.current(tx)?.ok_or(CertchainError::NotInitialized)?;
        let next = current.checked_add(1).ok_or_else(|| CertchainError::Store {
            detail: "sequence counter overflowed".into(),
        })?;
        tx.put(COUNTER_KEY, next.to_string().into_bytes());
        Ok(next)
    }
}
