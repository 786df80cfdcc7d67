use crate::core::errors::{CertchainError, Result};
use crate::core::models::request::{EngineRequest, EngineResponse, parse_cert_list_query};

use super::ledger_helpers::{open_engine, read_payload, unexpected_response};

/// Execute the `certchain certs` command.
///
/// Prints the recipient's certificates as a JSON array on stdout, so the
/// output can be piped into other tools. No certificates prints `[]`.
pub fn execute(query: &str) -> Result<()> {
    let engine = open_engine(crate::cli::context::home_dir())?;
    let query = parse_cert_list_query(&read_payload(query)?)?;

    let entries = match engine.handle(EngineRequest::GetCertList(query))? {
        EngineResponse::CertList(entries) => entries,
        other => return Err(unexpected_response(&other)),
    };

    let json = serde_json::to_string_pretty(&entries).map_err(|e| CertchainError::Store {
        detail: format!("cannot render certificate list: {e}"),
    })?;
    println!("{json}");
    Ok(())
}
