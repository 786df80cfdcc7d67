use serde::{Deserialize, Serialize};

use crate::core::services::key_codec::VerificationKey;

/// Persisted form of an issuer: the name plus the key exactly as it was
/// registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerRecord {
    #[serde(rename = "Issuer")]
    pub name: String,
    #[serde(rename = "PubKeyPem")]
    pub public_key_pem: String,
}

/// An issuer loaded from the registry, with its key ready for verification.
#[derive(Debug, Clone)]
pub struct Issuer {
    pub record: IssuerRecord,
    pub verification_key: VerificationKey,
}

impl Issuer {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}
