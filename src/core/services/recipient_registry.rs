use crate::core::errors::{CertchainError, Result};
use crate::core::models::recipient::Recipient;
use crate::core::services::transaction::Transaction;
use crate::core::traits::state_store::StateStore;

/// Key namespace for recipient records.
pub const RECIPIENT_PREFIX: &str = "recipient/";

/// Stores recipient records keyed by recipient id.
pub struct RecipientRegistry;

impl RecipientRegistry {
    pub fn key(id: &str) -> String {
        format!("{RECIPIENT_PREFIX}{id}")
    }

    /// Stage the record. An existing record with the same id is replaced.
    pub fn put<S: StateStore>(
        &self,
        tx: &mut Transaction<'_, S>,
        recipient: &Recipient,
    ) -> Result<()> {
        let bytes = serde_json::to_vec(recipient).map_err(|e| CertchainError::Store {
            detail: format!("cannot serialize recipient '{}': {e}", recipient.id()),
        })?;
        tx.put(Self::key(recipient.id()), bytes);
        Ok(())
    }

    pub fn get<S: StateStore>(&self, tx: &Transaction<'_, S>, id: &str) -> Result<Recipient> {
        let bytes = tx
            .get(&Self::key(id))?
            .ok_or_else(|| CertchainError::NotFound {
                kind: "Recipient",
                id: id.to_string(),
            })?;
        serde_json::from_slice(&bytes).map_err(|e| CertchainError::Store {
            detail: format!("corrupt recipient record '{id}': {e}"),
        })
    }
}
