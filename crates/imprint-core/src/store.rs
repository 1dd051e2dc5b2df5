//! Timestamp-versioned manifest output store
//!
//! Every generation writes into a fresh `manifests/<namespace>/<timestamp>`
//! directory. Versions are immutable once written; the apply pipeline only
//! reads them back. The timestamp key is fixed-width, so lexicographic order
//! coincides with chronological order and "latest" is simply the greatest key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{CoreError, Result};

/// Fixed-width, lexicographically sortable version key format
pub const VERSION_KEY_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

fn namespace_dir(repo_root: &Path, namespace: &str) -> PathBuf {
    repo_root.join("manifests").join(namespace)
}

/// Create a fresh version directory for a namespace.
///
/// Two calls within the same second do not collide: on an existing key the
/// store appends `_2`, `_3`, ... — a suffix that still sorts after the bare
/// key and before the following second.
pub fn new_version(repo_root: &Path, namespace: &str) -> Result<PathBuf> {
    let parent = namespace_dir(repo_root, namespace);
    std::fs::create_dir_all(&parent)?;

    let stamp = Local::now().format(VERSION_KEY_FORMAT).to_string();
    let mut key = stamp.clone();
    let mut attempt = 1u32;
    loop {
        let dir = parent.join(&key);
        match std::fs::create_dir(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                attempt += 1;
                key = format!("{stamp}_{attempt}");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// List existing version keys for a namespace, in ascending order
pub fn versions(repo_root: &Path, namespace: &str) -> Result<Vec<String>> {
    let parent = namespace_dir(repo_root, namespace);
    let mut keys = Vec::new();
    let entries = match std::fs::read_dir(&parent) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(keys),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            keys.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    keys.sort();
    Ok(keys)
}

/// Resolve the latest version directory for a namespace
pub fn latest_version(repo_root: &Path, namespace: &str) -> Result<PathBuf> {
    let parent = namespace_dir(repo_root, namespace);
    versions(repo_root, namespace)?
        .pop()
        .map(|key| parent.join(key))
        .ok_or_else(|| CoreError::NoVersionsFound {
            namespace: namespace.to_string(),
            dir: parent.display().to_string(),
        })
}

/// Resolve a specific version directory, checking it exists
pub fn pick_version(repo_root: &Path, namespace: &str, key: &str) -> Result<PathBuf> {
    let dir = namespace_dir(repo_root, namespace).join(key);
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(CoreError::NoVersionsFound {
            namespace: namespace.to_string(),
            dir: dir.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_new_version_creates_directory() {
        let root = tempdir().unwrap();
        let dir = new_version(root.path(), "staging").unwrap();
        assert!(dir.is_dir());
        assert!(dir.starts_with(root.path().join("manifests").join("staging")));
    }

    #[test]
    fn test_same_second_versions_do_not_collide() {
        let root = tempdir().unwrap();
        let first = new_version(root.path(), "default").unwrap();
        let second = new_version(root.path(), "default").unwrap();
        assert_ne!(first, second);
        assert!(first.is_dir());
        assert!(second.is_dir());

        // The suffixed key still sorts after the bare key
        let keys = versions(root.path(), "default").unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys[0] < keys[1]);
    }

    #[test]
    fn test_latest_version_is_lexicographic_max() {
        let root = tempdir().unwrap();
        let ns_dir = root.path().join("manifests").join("prod");
        fs::create_dir_all(ns_dir.join("2024-01-01_00-00-00")).unwrap();
        fs::create_dir_all(ns_dir.join("2024-06-01_00-00-00")).unwrap();

        let latest = latest_version(root.path(), "prod").unwrap();
        assert_eq!(
            latest.file_name().unwrap().to_str().unwrap(),
            "2024-06-01_00-00-00"
        );
    }

    #[test]
    fn test_latest_version_empty() {
        let root = tempdir().unwrap();
        let err = latest_version(root.path(), "missing").unwrap_err();
        assert!(matches!(err, CoreError::NoVersionsFound { .. }));
    }

    #[test]
    fn test_versions_ignores_plain_files() {
        let root = tempdir().unwrap();
        let ns_dir = root.path().join("manifests").join("dev");
        fs::create_dir_all(ns_dir.join("2024-01-01_00-00-00")).unwrap();
        fs::write(ns_dir.join("stray.yaml"), "x").unwrap();

        let keys = versions(root.path(), "dev").unwrap();
        assert_eq!(keys, vec!["2024-01-01_00-00-00".to_string()]);
    }

    #[test]
    fn test_pick_version() {
        let root = tempdir().unwrap();
        let ns_dir = root.path().join("manifests").join("dev");
        fs::create_dir_all(ns_dir.join("2024-01-01_00-00-00")).unwrap();

        assert!(pick_version(root.path(), "dev", "2024-01-01_00-00-00").is_ok());
        assert!(pick_version(root.path(), "dev", "2024-02-02_00-00-00").is_err());
    }
}
