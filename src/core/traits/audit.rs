use crate::core::errors::Result;
use crate::core::models::audit_entry::{AuditEntry, AuditFilter};

/// Port for the audit journal of ledger operations.
pub trait AuditLogger: Send + Sync {
    /// Append one entry.
    fn record(&self, entry: &AuditEntry) -> Result<()>;

    /// Entries selected by `filter`, oldest first.
    fn entries(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>>;
}
