use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static HOME_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global ledger home path.
/// If `custom` is provided, uses that path; otherwise defaults to `.certchain`.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".certchain"));
    let _ = HOME_DIR.set(dir);
}

/// Get the current ledger home path.
pub fn home_dir() -> &'static Path {
    HOME_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".certchain"))
}
