use crate::adapters::state_stores::file_state_store::FileStateStore;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;
use crate::core::models::request::{EngineRequest, EngineResponse};
use crate::core::services::certificate_engine::CertificateEngine;

use super::ledger_helpers::unexpected_response;

/// Execute the `certchain init` command.
///
/// Creates the home directory with a default `config.toml` and an empty
/// state document, then creates the sequence counter. Safe to re-run: an
/// existing config and counter are kept as they are.
pub fn execute() -> Result<()> {
    let home = crate::cli::context::home_dir();

    output::header("certchain — Initializing ledger");

    if !home.exists() {
        std::fs::create_dir_all(home)?;
        output::success(&format!("Created {}/", home.display()));
    }

    if !home.join("config.toml").exists() {
        AppConfig::default().save(home)?;
        output::success("Generated config.toml with defaults");
    } else {
        output::success("Using existing config.toml");
    }

    let config = AppConfig::load(home)?;
    let store = FileStateStore::new(config.state_path(home));
    if store.create_if_missing()? {
        output::success(&format!("Created {}", store.path().display()));
    }

    let engine = CertificateEngine::new(store).with_counter_start(config.certchain.counter_start);
    let counter = match engine.handle(EngineRequest::Init)? {
        EngineResponse::Initialized { counter } => counter,
        other => return Err(unexpected_response(&other)),
    };
    output::success(&format!("Sequence counter at {counter}"));

    super::audit_helpers::log_audit(
        AuditAction::Init,
        None,
        Some(format!("counter at {counter}")),
    );

    println!("\n  Next: register an issuer with 'certchain issuer add <json>'");
    Ok(())
}
