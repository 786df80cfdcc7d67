use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{CertchainError, Result};
use crate::core::models::certificate::{CertListEntry, CertificateFields};
use crate::core::models::recipient::RecipientRef;

/// Every operation the engine accepts. Dispatch is an exhaustive match,
/// so there is no such thing as an unknown method.
#[derive(Debug, Clone)]
pub enum EngineRequest {
    Init,
    AddRecipient(AddRecipientRequest),
    AddIssuer(AddIssuerRequest),
    IssueCert(IssueCertRequest),
    GetCertList(RecipientRef),
}

/// What each operation hands back on success.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineResponse {
    Initialized { counter: u64 },
    RecipientAdded(String),
    IssuerAdded(String),
    CertIssued(String),
    CertList(Vec<CertListEntry>),
}

/// `{"Rp":{"ID":..,"Name":..},"PubKeyPem":..}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddRecipientRequest {
    #[serde(rename = "Rp")]
    pub recipient: RecipientRef,
    #[serde(rename = "PubKeyPem", default)]
    pub public_key_pem: Option<String>,
}

impl AddRecipientRequest {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let req: Self = parse_payload(raw, "recipient")?;
        req.recipient.validate()?;
        Ok(req)
    }
}

/// `{"Issuer":..,"PubKeyPem":..}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddIssuerRequest {
    #[serde(rename = "Issuer")]
    pub name: String,
    #[serde(rename = "PubKeyPem")]
    pub public_key_pem: String,
}

impl AddIssuerRequest {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let req: Self = parse_payload(raw, "issuer")?;
        if req.name.trim().is_empty() {
            return Err(CertchainError::PayloadFormat {
                detail: "issuer \"Issuer\" must not be empty".into(),
            });
        }
        Ok(req)
    }
}

/// A certificate payload together with its signature.
///
/// `payload` keeps the exact submitted bytes: they are the message the
/// signature is checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueCertRequest {
    pub payload: Vec<u8>,
    pub fields: CertificateFields,
    pub signature: Vec<u8>,
}

impl IssueCertRequest {
    pub fn parse(payload: &[u8], signature: Vec<u8>) -> Result<Self> {
        let fields: CertificateFields = parse_payload(payload, "certificate")?;
        fields.validate()?;
        Ok(Self {
            payload: payload.to_vec(),
            fields,
            signature,
        })
    }
}

/// Parse a `{"ID":..,"Name":..}` list query.
pub fn parse_cert_list_query(raw: &[u8]) -> Result<RecipientRef> {
    let query: RecipientRef = parse_payload(raw, "query")?;
    query.validate()?;
    Ok(query)
}

fn parse_payload<T: DeserializeOwned>(raw: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(raw).map_err(|e| CertchainError::PayloadFormat {
        detail: format!("invalid {what} payload: {e}"),
    })
}
