use crate::cli::IssuerAction;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;
use crate::core::models::request::{AddIssuerRequest, EngineRequest, EngineResponse};

use super::ledger_helpers::{open_engine, read_payload, unexpected_response};

/// Execute the `certchain issuer` command.
pub fn execute(action: &IssuerAction) -> Result<()> {
    match action {
        IssuerAction::Add { payload } => execute_add(payload),
        IssuerAction::Show { name } => execute_show(name),
    }
}

fn execute_add(payload: &str) -> Result<()> {
    let engine = open_engine(crate::cli::context::home_dir())?;
    let req = AddIssuerRequest::parse(&read_payload(payload)?)?;

    let name = match engine.handle(EngineRequest::AddIssuer(req))? {
        EngineResponse::IssuerAdded(name) => name,
        other => return Err(unexpected_response(&other)),
    };
    output::success(&format!("Issuer stored: {name}"));
    println!("\n  Certificates signed with this issuer's private key can now be issued.");
    super::audit_helpers::log_audit(AuditAction::AddIssuer, Some(name), None);
    Ok(())
}

fn execute_show(name: &str) -> Result<()> {
    let engine = open_engine(crate::cli::context::home_dir())?;
    let issuer = engine.get_issuer(name)?;

    output::header(&format!("Issuer {}", issuer.name()));
    output::success(&format!("RSA key, {} bits", issuer.verification_key.bits()));
    for line in issuer.record.public_key_pem.lines() {
        output::detail(line);
    }
    Ok(())
}
