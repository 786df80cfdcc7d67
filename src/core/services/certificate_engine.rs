use tracing::{debug, info, warn};

use crate::core::errors::{CertchainError, Result};
use crate::core::models::certificate::{CertListEntry, Certificate};
use crate::core::models::issuer::{Issuer, IssuerRecord};
use crate::core::models::recipient::{Recipient, RecipientRef};
use crate::core::models::request::{
    AddIssuerRequest, AddRecipientRequest, EngineRequest, EngineResponse, IssueCertRequest,
};
use crate::core::services::certificate_store::CertificateStore;
use crate::core::services::issuer_registry::IssuerRegistry;
use crate::core::services::key_codec::KeyCodec;
use crate::core::services::recipient_registry::RecipientRegistry;
use crate::core::services::sequence_counter::SequenceCounter;
use crate::core::services::signature_verifier::SignatureVerifier;
use crate::core::services::transaction::Transaction;
use crate::core::traits::state_store::StateStore;

/// Default starting value of the sequence counter.
pub const DEFAULT_COUNTER_START: u64 = 0;

/// Orchestrates the certificate lifecycle over a `StateStore`.
///
/// Every operation runs in its own `Transaction`: lookups and signature
/// checks happen first, writes are staged, and a single commit at the end
/// publishes them. Any error before the commit leaves the store untouched.
pub struct CertificateEngine<S: StateStore> {
    store: S,
    counter_start: u64,
}

impl<S: StateStore> CertificateEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            counter_start: DEFAULT_COUNTER_START,
        }
    }

    /// Use `start` as the counter value written by `init`.
    pub fn with_counter_start(mut self, start: u64) -> Self {
        self.counter_start = start;
        self
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one request to completion.
    pub fn handle(&self, request: EngineRequest) -> Result<EngineResponse> {
        match request {
            EngineRequest::Init => self
                .init()
                .map(|counter| EngineResponse::Initialized { counter }),
            EngineRequest::AddRecipient(req) => {
                self.add_recipient(&req).map(EngineResponse::RecipientAdded)
            }
            EngineRequest::AddIssuer(req) => self.add_issuer(&req).map(EngineResponse::IssuerAdded),
            EngineRequest::IssueCert(req) => self.issue_cert(&req).map(EngineResponse::CertIssued),
            EngineRequest::GetCertList(query) => {
                self.get_cert_list(&query).map(EngineResponse::CertList)
            }
        }
    }

    /// Create the sequence counter if it does not exist yet.
    ///
    /// Re-running against existing state keeps the current counter value.
    pub fn init(&self) -> Result<u64> {
        let mut tx = Transaction::begin(&self.store);
        let counter = SequenceCounter.init(&mut tx, self.counter_start)?;
        let written = tx.commit()?;
        if written == 0 {
            debug!(counter, "counter already present, left untouched");
        } else {
            info!(counter, "ledger state initialized");
        }
        Ok(counter)
    }

    /// Register (or overwrite) a recipient. Returns the recipient id.
    pub fn add_recipient(&self, req: &AddRecipientRequest) -> Result<String> {
        req.recipient.validate()?;
        let recipient = Recipient {
            reference: req.recipient.clone(),
            public_key_pem: req.public_key_pem.clone(),
        };

        let mut tx = Transaction::begin(&self.store);
        RecipientRegistry.put(&mut tx, &recipient)?;
        tx.commit()?;

        debug!(recipient = %recipient.reference, "recipient stored");
        Ok(recipient.reference.id)
    }

    /// Register (or overwrite) an issuer. The key must parse before
    /// anything is written. Returns the issuer name.
    pub fn add_issuer(&self, req: &AddIssuerRequest) -> Result<String> {
        let verification_key = KeyCodec
            .parse_public_key(&req.public_key_pem)
            .map_err(|e| CertchainError::InvalidKey {
                issuer: req.name.clone(),
                reason: match e {
                    CertchainError::KeyFormat { reason } => reason,
                    other => other.to_string(),
                },
            })?;

        let issuer = Issuer {
            record: IssuerRecord {
                name: req.name.clone(),
                public_key_pem: req.public_key_pem.clone(),
            },
            verification_key,
        };

        let mut tx = Transaction::begin(&self.store);
        IssuerRegistry.put(&mut tx, &issuer)?;
        tx.commit()?;

        debug!(
            issuer = issuer.name(),
            key_bits = issuer.verification_key.bits(),
            "issuer stored"
        );
        Ok(issuer.record.name)
    }

    /// Verify and store a certificate. Returns the generated certificate id.
    ///
    /// The signature is checked against the exact submitted payload bytes
    /// under the named issuer's registered key.
    pub fn issue_cert(&self, req: &IssueCertRequest) -> Result<String> {
        let mut tx = Transaction::begin(&self.store);

        let issuer_name = &req.fields.issuer;
        let issuer = IssuerRegistry
            .get(&tx, issuer_name)
            .map_err(|e| match e {
                CertchainError::NotFound { .. } => CertchainError::UnknownIssuer {
                    name: issuer_name.clone(),
                },
                other => other,
            })?;

        if !SignatureVerifier.verify(&req.payload, &req.signature, &issuer.verification_key) {
            warn!(
                issuer = issuer_name.as_str(),
                recipient = %req.fields.recipient,
                "certificate signature rejected"
            );
            return Err(CertchainError::SignatureInvalid {
                issuer: issuer_name.clone(),
            });
        }

        let id = SequenceCounter.next(&mut tx)?.to_string();
        let cert = Certificate {
            fields: req.fields.clone(),
            signature: req.signature.clone(),
        };
        CertificateStore.put(&mut tx, &id, &cert)?;
        debug!(
            cert_id = id.as_str(),
            staged = tx.len(),
            "committing certificate"
        );
        tx.commit()?;

        info!(
            cert_id = id.as_str(),
            issuer = issuer_name.as_str(),
            recipient = %req.fields.recipient,
            "certificate issued"
        );
        Ok(id)
    }

    /// Look up a registered recipient.
    pub fn get_recipient(&self, id: &str) -> Result<Recipient> {
        let tx = Transaction::begin(&self.store);
        RecipientRegistry.get(&tx, id)
    }

    /// Look up a registered issuer together with its parsed key.
    pub fn get_issuer(&self, name: &str) -> Result<Issuer> {
        let tx = Transaction::begin(&self.store);
        IssuerRegistry.get(&tx, name)
    }

    /// All certificates issued to the queried recipient, in issuance order.
    /// Unknown recipients simply have no certificates.
    pub fn get_cert_list(&self, query: &RecipientRef) -> Result<Vec<CertListEntry>> {
        let tx = Transaction::begin(&self.store);
        let entries = CertificateStore
            .list_by_recipient(&tx, &query.id)?
            .collect::<Result<Vec<_>>>()?;
        debug!(
            recipient = %query,
            count = entries.len(),
            "certificate list resolved"
        );
        Ok(entries)
    }
}
