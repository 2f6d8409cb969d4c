//! Locked, crash-safe file writes
//!
//! Writers take an exclusive `fs2` lock on a sibling `<name>.lock` file (kept
//! apart from the data file so the rename below never touches it), write
//! `<name>.tmp`, sync it and rename it over the target.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Run `f` while holding the exclusive lock for `path`.
///
/// Blocks until any other holder is done. The parent directory is created
/// if needed.
pub fn with_exclusive_lock<T>(path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let lock_path = sibling(path, ".lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| format!("Failed to acquire lock: {}", lock_path.display()))?;

    // Lock is released when lock_file is dropped
    f()
}

/// Replace `path` with `content` through a temp file and a rename.
///
/// Callers that race with other writers hold [`with_exclusive_lock`].
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = sibling(path, ".tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    temp_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Lock `path` and replace its content
pub fn write_locked(path: &Path, content: &[u8]) -> Result<()> {
    with_exclusive_lock(path, || write_atomic(path, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_locked_creates_parent_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("list.json");

        write_locked(&path, b"[1]").unwrap();
        write_locked(&path, b"[1,2]").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1,2]");
        assert!(!dir.path().join("nested").join("list.json.tmp").exists());
        assert!(dir.path().join("nested").join("list.json.lock").exists());
    }

    #[test]
    fn test_lock_result_is_passed_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let value = with_exclusive_lock(&path, || Ok(42)).unwrap();
        assert_eq!(value, 42);
        assert!(with_exclusive_lock(&path, || -> Result<()> { anyhow::bail!("nope") }).is_err());
    }
}
