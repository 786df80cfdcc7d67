use chrono::Utc;

use crate::adapters::audit::journal::AuditJournal;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::traits::audit::AuditLogger;

/// Name recorded as the operator of an audited action.
///
/// Taken from `CERTCHAIN_OPERATOR`, then `USER`/`USERNAME`, else "unknown".
pub fn operator() -> String {
    ["CERTCHAIN_OPERATOR", "USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Record an audit event. Failures are printed as warnings and never
/// fail the command.
pub fn log_audit(action: AuditAction, subject: Option<String>, detail: Option<String>) {
    let home = crate::cli::context::home_dir();
    let config = AppConfig::load(home).ok();
    let audit_section = config.as_ref().and_then(|c| c.audit.as_ref());
    let Some(journal) = AuditJournal::open(home, audit_section) else {
        return;
    };

    let entry = AuditEntry {
        timestamp: Utc::now(),
        operator: operator(),
        action,
        subject,
        detail,
    };

    if let Err(e) = journal.record(&entry) {
        tracing::warn!(error = %e, "audit entry not written");
        output::warning(&format!("Could not write audit log: {e}"));
    }
}
