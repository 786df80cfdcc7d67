use rsa::RsaPublicKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::pkcs8::der::pem;
use rsa::traits::PublicKeyParts;

use crate::core::errors::{CertchainError, Result};

/// Smallest RSA modulus accepted for issuer keys.
pub const MIN_KEY_BITS: usize = 1024;

/// Largest RSA modulus accepted for issuer keys.
pub const MAX_KEY_BITS: usize = 4096;

/// PEM labels accepted for public keys.
///
/// Existing clients emit PKIX bodies under `RSA PUBLIC KEY`, so the label
/// is only used as a gate, never to pick the DER decoder.
const ACCEPTED_LABELS: &[&str] = &["PUBLIC KEY", "RSA PUBLIC KEY"];

/// Base64 line width required by the strict PEM decoder.
const PEM_LINE_WIDTH: usize = 64;

/// A parsed public key, ready for signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey(RsaPublicKey);

impl VerificationKey {
    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

/// Turns externally supplied key encodings into `VerificationKey`s.
pub struct KeyCodec;

impl KeyCodec {
    /// Parse a PEM-encoded RSA public key.
    ///
    /// The DER body may be a SubjectPublicKeyInfo or a PKCS#1
    /// `RSAPublicKey`; both are tried in that order.
    pub fn parse_public_key(&self, encoded: &str) -> Result<VerificationKey> {
        let reframed = reframe_pem(encoded);
        let input = reframed.as_deref().unwrap_or(encoded.trim());
        let (label, der) = pem::decode_vec(input.as_bytes()).map_err(|e| CertchainError::KeyFormat {
            reason: format!("bad PEM framing: {e}"),
        })?;

        if !ACCEPTED_LABELS.contains(&label) {
            return Err(CertchainError::KeyFormat {
                reason: format!("unsupported PEM label '{label}'"),
            });
        }

        let key = RsaPublicKey::from_public_key_der(&der)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
            .map_err(|e| CertchainError::KeyFormat {
                reason: format!("not an RSA public key: {e}"),
            })?;

        let key = VerificationKey(key);
        let bits = key.bits();
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
            return Err(CertchainError::KeyFormat {
                reason: format!(
                    "unsupported key size {bits} bits (expected {MIN_KEY_BITS}-{MAX_KEY_BITS})"
                ),
            });
        }

        Ok(key)
    }
}

/// Rebuild the first PEM block with its body rewrapped at
/// `PEM_LINE_WIDTH` columns.
///
/// Bodies may arrive on a single line or wrapped at any width. Text outside
/// the BEGIN/END lines and `Key: value` headers are dropped. Returns `None`
/// when no complete block is found.
fn reframe_pem(encoded: &str) -> Option<String> {
    let mut lines = encoded.lines().map(str::trim);
    let begin = lines.find(|line| line.starts_with("-----BEGIN "))?;

    let mut body = String::new();
    for line in lines {
        if line.starts_with("-----END ") {
            let mut pem = String::with_capacity(begin.len() + body.len() * 2 + line.len());
            pem.push_str(begin);
            pem.push('\n');
            for (i, c) in body.chars().enumerate() {
                if i > 0 && i % PEM_LINE_WIDTH == 0 {
                    pem.push('\n');
                }
                pem.push(c);
            }
            pem.push('\n');
            pem.push_str(line);
            pem.push('\n');
            return Some(pem);
        }
        if line.contains(':') {
            continue;
        }
        body.extend(line.chars().filter(|c| !c.is_whitespace()));
    }
    None
}
