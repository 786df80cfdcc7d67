use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::CertchainError;

/// Ledger operations recorded in the audit journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Init,
    AddRecipient,
    AddIssuer,
    IssueCert,
    RejectCert,
}

impl AuditAction {
    pub const ALL: [AuditAction; 5] = [
        AuditAction::Init,
        AuditAction::AddRecipient,
        AuditAction::AddIssuer,
        AuditAction::IssueCert,
        AuditAction::RejectCert,
    ];

    /// Name as written to the journal and accepted by `log --action`.
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Init => "init",
            AuditAction::AddRecipient => "add_recipient",
            AuditAction::AddIssuer => "add_issuer",
            AuditAction::IssueCert => "issue_cert",
            AuditAction::RejectCert => "reject_cert",
        }
    }
}

impl FromStr for AuditAction {
    type Err = CertchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        AuditAction::ALL
            .into_iter()
            .find(|action| action.as_str() == wanted)
            .ok_or_else(|| CertchainError::InvalidConfig {
                detail: format!(
                    "Unknown audit action '{s}'. Expected one of: {}",
                    AuditAction::ALL.map(AuditAction::as_str).join(", ")
                ),
            })
    }
}

/// One journal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operator: String,
    pub action: AuditAction,
    /// Recipient id, issuer name or certificate id the action touched.
    pub subject: Option<String>,
    pub detail: Option<String>,
}

/// Selects journal entries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Case-insensitive substring of the operator name.
    pub operator: Option<String>,
    pub action: Option<AuditAction>,
    /// Exact recipient id, issuer name or certificate id.
    pub subject: Option<String>,
    pub since: Option<DateTime<Utc>>,
}

impl AuditFilter {
    pub fn is_unfiltered(&self) -> bool {
        self.operator.is_none()
            && self.action.is_none()
            && self.subject.is_none()
            && self.since.is_none()
    }

    pub fn matches(&self, entry: &AuditEntry) -> bool {
        let operator = entry.operator.to_lowercase();
        let operator_ok = self
            .operator
            .as_ref()
            .is_none_or(|wanted| operator.contains(&wanted.to_lowercase()));
        let action_ok = self.action.is_none_or(|wanted| entry.action == wanted);
        let subject_ok = self
            .subject
            .as_ref()
            .is_none_or(|wanted| entry.subject.as_ref() == Some(wanted));
        let since_ok = self.since.is_none_or(|since| entry.timestamp >= since);

        operator_ok && action_ok && subject_ok && since_ok
    }
}
