pub mod audit_helpers;
pub mod certs;
pub mod init;
pub mod issue;
pub mod issuer;
pub mod ledger_helpers;
pub mod log;
pub mod recipient;
