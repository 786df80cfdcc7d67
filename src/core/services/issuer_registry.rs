use crate::core::errors::{CertchainError, Result};
use crate::core::models::issuer::{Issuer, IssuerRecord};
use crate::core::services::key_codec::KeyCodec;
use crate::core::services::transaction::Transaction;
use crate::core::traits::state_store::StateStore;

/// Key namespace for issuer records.
pub const ISSUER_PREFIX: &str = "issuer/";

/// Stores issuers with their encoded verification keys, keyed by name.
pub struct IssuerRegistry;

impl IssuerRegistry {
    pub fn key(name: &str) -> String {
        format!("{ISSUER_PREFIX}{name}")
    }

    /// Stage the issuer. The encoded key is persisted; the parsed key is
    /// rebuilt on every `get`.
    pub fn put<S: StateStore>(&self, tx: &mut Transaction<'_, S>, issuer: &Issuer) -> Result<()> {
        let bytes = serde_json::to_vec(&issuer.record).map_err(|e| CertchainError::Store {
            detail: format!("cannot serialize issuer '{}': {e}", issuer.name()),
        })?;
        tx.put(Self::key(issuer.name()), bytes);
        Ok(())
    }

    pub fn get<S: StateStore>(&self, tx: &Transaction<'_, S>, name: &str) -> Result<Issuer> {
        let bytes = tx
            .get(&Self::key(name))?
            .ok_or_else(|| CertchainError::NotFound {
                kind: "Issuer",
                id: name.to_string(),
            })?;
        let record: IssuerRecord =
            serde_json::from_slice(&bytes).map_err(|e| CertchainError::Store {
                detail: format!("corrupt issuer record '{name}': {e}"),
            })?;
        let verification_key = KeyCodec
            .parse_public_key(&record.public_key_pem)
            .map_err(|e| CertchainError::Store {
                detail: format!("stored key for issuer '{name}' no longer parses: {e}"),
            })?;
        Ok(Issuer {
            record,
            verification_key,
        })
    }
}
