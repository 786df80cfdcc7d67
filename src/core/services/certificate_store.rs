use crate::core::errors::{CertchainError, Result};
use crate::core::models::certificate::{CertListEntry, Certificate};
use crate::core::services::transaction::Transaction;
use crate::core::traits::state_store::StateStore;

/// Key namespace for certificate records.
pub const CERT_PREFIX: &str = "cert/";

/// Key namespace for the recipient → certificate ids index.
pub const RECIPIENT_INDEX_PREFIX: &str = "recipient-certs/";

/// Stores issued certificates and the per-recipient index over them.
///
/// The certificate record and its index entry are always staged in the
/// same transaction, so a commit either writes both or neither.
pub struct CertificateStore;

impl CertificateStore {
    pub fn cert_key(id: &str) -> String {
        format!("{CERT_PREFIX}{id}")
    }

    pub fn index_key(recipient_id: &str) -> String {
        format!("{RECIPIENT_INDEX_PREFIX}{recipient_id}")
    }

    /// Stage `cert` under `id` and append `id` to its recipient's index.
    ///
    /// Certificates are immutable: an id that is already taken is an error.
    pub fn put<S: StateStore>(
        &self,
        tx: &mut Transaction<'_, S>,
        id: &str,
        cert: &Certificate,
    ) -> Result<()> {
        let cert_key = Self::cert_key(id);
        if tx.get(&cert_key)?.is_some() {
            return Err(CertchainError::Store {
                detail: format!("certificate id '{id}' is already in use"),
            });
        }

        let bytes = serde_json::to_vec(cert).map_err(|e| CertchainError::Store {
            detail: format!("cannot serialize certificate '{id}': {e}"),
        })?;

        let recipient_id = &cert.fields.recipient.id;
        let mut ids = self.index(tx, recipient_id)?;
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
        let index_bytes = serde_json::to_vec(&ids).map_err(|e| CertchainError::Store {
            detail: format!("cannot serialize index for '{recipient_id}': {e}"),
        })?;

        tx.put(cert_key, bytes);
        tx.put(Self::index_key(recipient_id), index_bytes);
        Ok(())
    }

    pub fn get<S: StateStore>(&self, tx: &Transaction<'_, S>, id: &str) -> Result<Certificate> {
        let bytes = tx
            .get(&Self::cert_key(id))?
            .ok_or_else(|| CertchainError::NotFound {
                kind: "Certificate",
                id: id.to_string(),
            })?;
        serde_json::from_slice(&bytes).map_err(|e| CertchainError::Store {
            detail: format!("corrupt certificate record '{id}': {e}"),
        })
    }

    /// Certificate ids issued to `recipient_id`, in issuance order.
    pub fn index<S: StateStore>(
        &self,
        tx: &Transaction<'_, S>,
        recipient_id: &str,
    ) -> Result<Vec<String>> {
        match tx.get(&Self::index_key(recipient_id))? {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| CertchainError::Store {
                detail: format!("corrupt certificate index for '{recipient_id}': {e}"),
            }),
        }
    }

    /// Lazily resolve every certificate indexed under `recipient_id`.
    ///
    /// An absent index yields nothing. An index entry without a stored
    /// certificate surfaces as a `Store` error for that element.
    pub fn list_by_recipient<'t, 's, S: StateStore>(
        &self,
        tx: &'t Transaction<'s, S>,
        recipient_id: &str,
    ) -> Result<impl Iterator<Item = Result<CertListEntry>> + use<'t, 's, S>> {
        let ids = self.index(tx, recipient_id)?;
        Ok(ids.into_iter().map(move |id| {
            let cert = CertificateStore.get(tx, &id).map_err(|e| match e {
                CertchainError::NotFound { .. } => CertchainError::Store {
                    detail: format!("index references missing certificate '{id}'"),
                },
                other => other,
            })?;
            Ok(CertListEntry { id, cert })
        }))
    }
}
