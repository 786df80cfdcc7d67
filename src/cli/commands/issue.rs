use std::path::Path;

use crate::cli::output;
use crate::core::errors::{CertchainError, Result};
use crate::core::models::audit_entry::AuditAction;
use crate::core::models::request::{EngineRequest, EngineResponse, IssueCertRequest};

use super::ledger_helpers::{open_engine, read_payload, unexpected_response};

/// Execute the `certchain issue` command.
///
/// The certificate JSON is verified byte-for-byte as given; the signature
/// comes either base64-encoded on the command line or raw from a file.
pub fn execute(cert: &str, signature: Option<&str>, signature_file: Option<&Path>) -> Result<()> {
    let engine = open_engine(crate::cli::context::home_dir())?;
    let payload = read_payload(cert)?;
    let signature = load_signature(signature, signature_file)?;
    let req = IssueCertRequest::parse(&payload, signature)?;
    let issuer = req.fields.issuer.clone();
    let recipient = req.fields.recipient.id.clone();

    match engine.handle(EngineRequest::IssueCert(req)) {
        Ok(EngineResponse::CertIssued(id)) => {
            output::success(&format!("Certificate issued: {id}"));
            output::detail(&format!("issuer {issuer} → recipient {recipient}"));
            super::audit_helpers::log_audit(
                AuditAction::IssueCert,
                Some(id),
                Some(format!("{issuer} → {recipient}")),
            );
            Ok(())
        }
        Ok(other) => Err(unexpected_response(&other)),
        Err(e @ CertchainError::SignatureInvalid { .. }) => {
            super::audit_helpers::log_audit(
                AuditAction::RejectCert,
                Some(recipient),
                Some(format!("bad signature for issuer {issuer}")),
            );
            Err(e)
        }
        Err(e) => Err(e),
    }
}

fn load_signature(signature: Option<&str>, signature_file: Option<&Path>) -> Result<Vec<u8>> {
    match (signature, signature_file) {
        (Some(encoded), _) => {
            base64::decode(encoded.trim()).map_err(|e| CertchainError::PayloadFormat {
                detail: format!("signature is not valid base64: {e}"),
            })
        }
        (None, Some(path)) => {
            if !path.exists() {
                return Err(CertchainError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(std::fs::read(path)?)
        }
        (None, None) => Err(CertchainError::PayloadFormat {
            detail: "a signature is required (--signature or --signature-file)".into(),
        }),
    }
}
