use std::path::PathBuf;

/// All domain errors for certchain.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum CertchainError {
    #[error(
        "Malformed payload: {detail}\n\n  \
         Payloads are JSON objects with fixed field names, e.g.:\n    \
         → recipient: {{\"Rp\":{{\"ID\":\"jj\",\"Name\":\"jj\"}},\"PubKeyPem\":\"...\"}}\n    \
         → issuer:    {{\"Issuer\":\"IssuerA\",\"PubKeyPem\":\"...\"}}\n    \
         → query:     {{\"ID\":\"jj\",\"Name\":\"jj\"}}"
    )]
    PayloadFormat { detail: String },

    #[error("Malformed public key: {reason}")]
    KeyFormat { reason: String },

    #[error(
        "Invalid key for issuer '{issuer}': {reason}\n\n  \
         Expected a PEM-encoded RSA public key (PKIX or PKCS#1 body).\n  \
         Nothing was registered."
    )]
    InvalidKey { issuer: String, reason: String },

    #[error(
        "Unknown issuer '{name}'\n\n  \
         Register it first: certchain issuer add '{{\"Issuer\":\"{name}\",\"PubKeyPem\":\"...\"}}'"
    )]
    UnknownIssuer { name: String },

    #[error(
        "Signature rejected for issuer '{issuer}'\n\n  \
         The signature does not match the issuer's registered key over the\n  \
         exact certificate payload. No certificate was stored.\n\n  \
         Check that:\n    \
         → the payload was signed byte-for-byte as submitted\n    \
         → the signing key belongs to '{issuer}'"
    )]
    SignatureInvalid { issuer: String },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error(
        "Ledger state is not initialized\n\n  \
         The sequence counter is missing. Run 'certchain init' first."
    )]
    NotInitialized,

    #[error("State store error: {detail}")]
    Store { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Audit log error: {detail}")]
    AuditError { detail: String },

    #[error(
        "This ledger uses format version {project_version}, but this build \
         only supports up to version {supported_version}.\n\n  \
         Update certchain to work with this state directory."
    )]
    FormatVersionTooNew {
        project_version: u32,
        supported_version: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CertchainError>;
