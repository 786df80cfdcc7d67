use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::errors::{CertchainError, Result};

/// Current format version supported by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Top-level configuration read from `<home>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub certchain: LedgerSection,
    pub audit: Option<AuditSection>,
}

impl AppConfig {
    /// Load the configuration from `<home>/config.toml`.
    ///
    /// File names from the config are validated so a tampered config cannot
    /// point the state or audit log outside the home directory.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join("config.toml");
        if !config_path.exists() {
            return Err(CertchainError::InvalidConfig {
                detail: "config.toml not found. Run 'certchain init' first.".into(),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config = Self::parse(&content)?;

        if config.certchain.format_version > CURRENT_FORMAT_VERSION {
            return Err(CertchainError::FormatVersionTooNew {
                project_version: config.certchain.format_version,
                supported_version: CURRENT_FORMAT_VERSION,
            });
        }

        validate_simple_filename(&config.certchain.state_file, "state file")?;
        if let Some(audit) = &config.audit {
            validate_simple_filename(&audit.log_file, "audit log file")?;
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CertchainError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// Write this configuration to `<home>/config.toml`.
    pub fn save(&self, home: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CertchainError::InvalidConfig {
            detail: format!("Failed to serialize config: {e}"),
        })?;
        std::fs::write(home.join("config.toml"), content)?;
        Ok(())
    }

    /// Path of the state document inside `home`.
    pub fn state_path(&self, home: &Path) -> PathBuf {
        home.join(&self.certchain.state_file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            certchain: LedgerSection {
                version: env!("CARGO_PKG_VERSION").to_string(),
                format_version: CURRENT_FORMAT_VERSION,
                state_file: default_state_file(),
                counter_start: 0,
            },
            audit: Some(AuditSection {
                enabled: true,
                log_file: "audit.log".to_string(),
            }),
        }
    }
}

/// The `[certchain]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// Value written to `#Counter#` by `init` when no counter exists.
    #[serde(default)]
    pub counter_start: u64,
}

fn default_format_version() -> u32 {
    1
}

fn default_state_file() -> String {
    "state.json".to_string()
}

/// The `[audit]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSection {
    pub enabled: bool,
    pub log_file: String,
}

/// Reject names that would escape the home directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(CertchainError::InvalidConfig {
            detail: format!("Invalid {what} name '{name}': must be a plain file name"),
        });
    }
    Ok(())
}
