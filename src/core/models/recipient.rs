use serde::{Deserialize, Serialize};

use crate::core::errors::{CertchainError, Result};

/// Identifies a recipient by id and display name, as carried inside
/// certificates and list queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientRef {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl RecipientRef {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Reject references whose id cannot be used as a storage key.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CertchainError::PayloadFormat {
                detail: "recipient \"ID\" must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for RecipientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}

/// A registered recipient.
///
/// The encoded public key is kept verbatim when the registration carried
/// one; it is never parsed or used for verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(flatten)]
    pub reference: RecipientRef,
    #[serde(
        rename = "PubKeyPem",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key_pem: Option<String>,
}

impl Recipient {
    pub fn id(&self) -> &str {
        &self.reference.id
    }
}
