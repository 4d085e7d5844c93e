//! File-backed port: one `<key>.json` file per key inside a storage directory.

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::KvStore;
use crate::error::StorageError;

static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the storage directory.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !KEY_RE.is_match(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Last modification time of `key`, `None` when it was never written.
    pub fn modified(&self, key: &str) -> Option<SystemTime> {
        let path = self.path_for(key).ok()?;
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

fn io_err(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Write next to the target and rename, so readers never see a partial value
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| io_err(key, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| io_err(key, e))?;
        tmp.persist(&path).map_err(|e| io_err(key, e.error))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert_eq!(store.get("sentMessages").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();
        store.set("readMessageIds", "[\"1\"]").unwrap();
        assert_eq!(
            store.get("readMessageIds").unwrap().as_deref(),
            Some("[\"1\"]")
        );
        assert!(tmp.path().join("readMessageIds.json").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.get("../escape"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_modified_tracks_writes() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();
        assert!(store.modified("sentMessages").is_none());
        store.set("sentMessages", "[]").unwrap();
        assert!(store.modified("sentMessages").is_some());
    }
}
