pub mod certificate_engine;
pub mod certificate_store;
pub mod issuer_registry;
pub mod key_codec;
pub mod recipient_registry;
pub mod sequence_counter;
pub mod signature_verifier;
pub mod transaction;

#[cfg(test)]
pub mod test_support;
