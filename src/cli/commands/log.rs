use chrono::{NaiveDate, TimeZone, Utc};
use colored::Colorize;

use crate::adapters::audit::journal::AuditJournal;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{CertchainError, Result};
use crate::core::models::audit_entry::{AuditAction, AuditEntry, AuditFilter};
use crate::core::traits::audit::AuditLogger;

/// Execute the `certchain log` command.
///
/// Displays the audit journal, narrowed by operator, action, subject and
/// date, keeping only the last N entries when asked.
pub fn execute(
    operator: Option<&str>,
    action: Option<&str>,
    subject: Option<&str>,
    since: Option<&str>,
    last: Option<usize>,
) -> Result<()> {
    let home = crate::cli::context::home_dir();
    if !home.exists() {
        return Err(CertchainError::InvalidConfig {
            detail: "Ledger not initialized. Run 'certchain init' first.".into(),
        });
    }

    let config = AppConfig::load(home)?;
    let filter = AuditFilter {
        operator: operator.map(str::to_string),
        action: action.map(str::parse::<AuditAction>).transpose()?,
        subject: subject.map(str::to_string),
        since: since.map(parse_since).transpose()?,
    };

    let entries = match AuditJournal::open(home, config.audit.as_ref()) {
        Some(journal) => journal.entries(&filter)?,
        None => {
            output::header("certchain log");
            output::warning("Auditing is disabled in config.toml");
            return Ok(());
        }
    };

    if entries.is_empty() {
        output::header("certchain log");
        output::warning("No audit entries found");
        if !filter.is_unfiltered() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    let skip = last.map_or(0, |n| entries.len().saturating_sub(n));
    let display = &entries[skip..];

    output::header(&format!("certchain log ({} entries)", display.len()));
    println!();

    for entry in display {
        print_entry(entry);
    }

    Ok(())
}

/// Parse a date string (ISO 8601: `YYYY-MM-DD`) into a UTC DateTime.
fn parse_since(s: &str) -> Result<chrono::DateTime<Utc>> {
    let date =
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CertchainError::InvalidConfig {
            detail: format!(
                "Invalid date format: '{s}'. Expected ISO 8601 (YYYY-MM-DD), e.g. 2026-01-15"
            ),
        })?;
    Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
}

fn print_entry(entry: &AuditEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let subject = entry.subject.as_deref().unwrap_or("—");
    let detail = entry.detail.as_deref().unwrap_or("").dimmed().to_string();

    println!(
        "  {} {} {:<14} {:<12} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        format_action(entry.action),
        subject,
        entry.operator.dimmed(),
        detail,
    );
}

fn format_action(action: AuditAction) -> String {
    match action {
        AuditAction::Init => "init".cyan().to_string(),
        AuditAction::AddRecipient => "recipient add".green().to_string(),
        AuditAction::AddIssuer => "issuer add".green().to_string(),
        AuditAction::IssueCert => "issue".blue().to_string(),
        AuditAction::RejectCert => "rejected".red().to_string(),
    }
}
