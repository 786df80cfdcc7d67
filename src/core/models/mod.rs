pub mod audit_entry;
pub mod certificate;
pub mod issuer;
pub mod recipient;
pub mod request;
