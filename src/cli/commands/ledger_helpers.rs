use std::path::Path;

use crate::adapters::state_stores::file_state_store::FileStateStore;
use crate::config::app_config::AppConfig;
use crate::core::errors::{CertchainError, Result};
use crate::core::models::request::EngineResponse;
use crate::core::services::certificate_engine::CertificateEngine;

/// Open the engine over the file-backed state of an initialized home.
pub fn open_engine(home: &Path) -> Result<CertificateEngine<FileStateStore>> {
    if !home.exists() {
        return Err(CertchainError::InvalidConfig {
            detail: format!(
                "Ledger not initialized at {}. Run 'certchain init' first.",
                home.display()
            ),
        });
    }

    let config = AppConfig::load(home)?;
    let store = FileStateStore::new(config.state_path(home));
    Ok(CertificateEngine::new(store).with_counter_start(config.certchain.counter_start))
}

/// Error for an engine response that does not belong to the request sent.
pub fn unexpected_response(response: &EngineResponse) -> CertchainError {
    CertchainError::Store {
        detail: format!("engine answered with an unexpected response: {response:?}"),
    }
}

/// Resolve a payload argument: `@path` reads the file verbatim, anything
/// else is taken as the payload itself.
pub fn read_payload(arg: &str) -> Result<Vec<u8>> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                return Err(CertchainError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(std::fs::read(path)?)
        }
        None => Ok(arg.as_bytes().to_vec()),
    }
}
