use crate::cli::RecipientAction;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;
use crate::core::models::request::{AddRecipientRequest, EngineRequest, EngineResponse};

use super::ledger_helpers::{open_engine, read_payload, unexpected_response};

/// Execute the `certchain recipient` command.
pub fn execute(action: &RecipientAction) -> Result<()> {
    match action {
        RecipientAction::Add { payload } => execute_add(payload),
        RecipientAction::Show { id } => execute_show(id),
    }
}

fn execute_add(payload: &str) -> Result<()> {
    let engine = open_engine(crate::cli::context::home_dir())?;
    let req = AddRecipientRequest::parse(&read_payload(payload)?)?;
    let name = req.recipient.name.clone();

    let id = match engine.handle(EngineRequest::AddRecipient(req))? {
        EngineResponse::RecipientAdded(id) => id,
        other => return Err(unexpected_response(&other)),
    };
    output::success(&format!("Recipient stored: {id} ({name})"));
    super::audit_helpers::log_audit(AuditAction::AddRecipient, Some(id), None);
    Ok(())
}

fn execute_show(id: &str) -> Result<()> {
    let engine = open_engine(crate::cli::context::home_dir())?;
    let recipient = engine.get_recipient(id)?;

    output::header(&format!("Recipient {}", recipient.reference));
    match &recipient.public_key_pem {
        Some(pem) => {
            println!("  Public key:");
            for line in pem.lines() {
                output::detail(line);
            }
        }
        None => output::detail("no public key on record"),
    }
    Ok(())
}
