//! Whole-file replacement shared by the config and snapshot writers
//!
//! New contents go to a temporary file in the target's directory, which is
//! then renamed over the target. Readers see either the old file or the new
//! one, never a mix.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// `<path>.backup`, next to the file itself
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}

/// Directory holding `path`; `.` for a bare file name
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Copies `path` to its [`backup_path`] and returns the copy's location
pub fn write_backup(path: &Path) -> io::Result<PathBuf> {
    let backup = backup_path(path);
    fs::copy(path, &backup)?;
    log::debug!("Backed up {} to {}", path.display(), backup.display());
    Ok(backup)
}

/// Replaces `path` with `contents`, creating missing parent directories
pub fn write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = parent_dir(path);
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        log::info!("Created directory {}", dir.display());
    }

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(contents)?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_replaces_contents() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("books.json");

        write(&path, b"first").unwrap();
        write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary files must not linger");
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("a").join("b").join("config.toml");

        write(&path, b"version = 1\n").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_write_under_a_file_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = dir.path().join("plain-file");
        fs::write(&blocker, "x").unwrap();

        assert!(write(&blocker.join("config.toml"), b"x").is_err());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
    }

    #[test]
    fn test_backup_copies_current_contents() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "old").unwrap();

        let backup = write_backup(&path).unwrap();
        write(&path, b"new").unwrap();

        assert_eq!(backup, dir.path().join("config.toml.backup"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "old");
    }

    #[test]
    fn test_backup_of_missing_file_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        assert!(write_backup(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("library_data.json")), Path::new("."));
        assert_eq!(
            parent_dir(Path::new("/data/library_data.json")),
            Path::new("/data")
        );
    }
}
