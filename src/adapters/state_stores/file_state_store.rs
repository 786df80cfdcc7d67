use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::errors::{CertchainError, Result};
use crate::core::traits::state_store::StateStore;

/// State store persisted as a single JSON document.
///
/// Format: a JSON object mapping each key to its UTF-8 value.
///
/// ```text
/// {
///   "#Counter#": "2",
///   "issuer/IssuerA": "{\"Issuer\":\"IssuerA\",...}"
/// }
/// ```
///
/// The document is re-read on every access and rewritten through a
/// temporary file plus rename, so a batch lands completely or not at all.
#[derive(Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty document unless the file already exists. Returns
    /// `true` when a new file was created.
    pub fn create_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&BTreeMap::new())?;
        Ok(true)
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| CertchainError::Store {
            detail: format!("corrupt state file {}: {e}", self.path.display()),
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries).map_err(|e| CertchainError::Store {
            detail: format!("cannot serialize state: {e}"),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| CertchainError::Store {
            detail: format!("cannot replace {}: {}", self.path.display(), e.error),
        })?;
        Ok(())
    }

    fn encode(key: &str, value: &[u8]) -> Result<String> {
        String::from_utf8(value.to_vec()).map_err(|_| CertchainError::Store {
            detail: format!("value for '{key}' is not UTF-8"),
        })
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.load()?.remove(key).map(String::into_bytes))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.put_batch(&[(key.to_string(), value.to_vec())])
    }

    fn put_batch(&self, writes: &[(String, Vec<u8>)]) -> Result<()> {
        let mut entries = self.load()?;
        for (key, value) in writes {
            entries.insert(key.clone(), Self::encode(key, value)?);
        }
        self.save(&entries)
    }
}
