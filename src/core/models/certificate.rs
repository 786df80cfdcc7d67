use serde::{Deserialize, Serialize};

use crate::core::errors::{CertchainError, Result};
use crate::core::models::recipient::RecipientRef;

/// The signed part of a certificate.
///
/// Field order matches the payload issuers sign:
/// `Issuer`, `Link`, `Hash`, `Description`, `Recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateFields {
    #[serde(rename = "Issuer")]
    pub issuer: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Hash")]
    pub content_hash: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Recipient")]
    pub recipient: RecipientRef,
}

impl CertificateFields {
    pub fn validate(&self) -> Result<()> {
        if self.issuer.trim().is_empty() {
            return Err(CertchainError::PayloadFormat {
                detail: "certificate \"Issuer\" must not be empty".into(),
            });
        }
        self.recipient.validate()
    }
}

/// An issued certificate: the signed fields plus the signature that
/// was verified before it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(flatten)]
    pub fields: CertificateFields,
    #[serde(rename = "Signature", with = "signature_base64")]
    pub signature: Vec<u8>,
}

/// One element of a recipient's certificate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertListEntry {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Cert")]
    pub cert: Certificate,
}

mod signature_base64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::decode(&encoded).map_err(serde::de::Error::custom)
    }
}
