use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};

use crate::core::services::key_codec::VerificationKey;

/// Checks RSASSA-PKCS1-v1_5 signatures over SHA-256 digests.
pub struct SignatureVerifier;

impl SignatureVerifier {
    /// SHA-256 digest of `message`.
    pub fn digest(message: &[u8]) -> Vec<u8> {
        Sha256::digest(message).to_vec()
    }

    /// Returns `true` only when `signature` is a valid signature of
    /// `message` under `key`. Malformed signatures are a plain `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8], key: &VerificationKey) -> bool {
        let hashed = Self::digest(message);
        key.as_rsa()
            .verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
            .is_ok()
    }
}
