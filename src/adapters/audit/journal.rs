use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::app_config::AuditSection;
use crate::core::errors::{CertchainError, Result};
use crate::core::models::audit_entry::{AuditEntry, AuditFilter};
use crate::core::traits::audit::AuditLogger;

const DEFAULT_JOURNAL_FILE: &str = "audit.log";

/// Append-only journal of ledger operations, one JSON object per line,
/// kept next to the state document in the ledger home.
pub struct AuditJournal {
    path: PathBuf,
}

impl AuditJournal {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Journal configured by the `[audit]` section of `home`, or `None`
    /// when auditing is switched off. A missing section means enabled.
    pub fn open(home: &Path, section: Option<&AuditSection>) -> Option<Self> {
        match section {
            Some(audit) if !audit.enabled => None,
            Some(audit) => Some(Self::new(home.join(&audit.log_file))),
            None => Some(Self::new(home.join(DEFAULT_JOURNAL_FILE))),
        }
    }

    fn parse_line(&self, number: usize, line: &str) -> Result<AuditEntry> {
        serde_json::from_str(line).map_err(|e| CertchainError::AuditError {
            detail: format!(
                "{} line {number} is not an audit entry: {e}",
                self.path.display()
            ),
        })
    }
}

impl AuditLogger for AuditJournal {
    fn record(&self, entry: &AuditEntry) -> Result<()> {
        let mut line = serde_json::to_vec(entry).map_err(|e| CertchainError::AuditError {
            detail: format!("cannot encode {:?} entry: {e}", entry.action),
        })?;
        line.push(b'\n');

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| CertchainError::AuditError {
                detail: format!("cannot append to {}: {e}", self.path.display()),
            })
    }

    fn entries(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CertchainError::AuditError {
                    detail: format!("cannot read {}: {e}", self.path.display()),
                });
            }
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| self.parse_line(i + 1, line.trim()))
            .filter(|parsed| parsed.as_ref().map_or(true, |entry| filter.matches(entry)))
            .collect()
    }
}
