//! File-backed blob store.
//!
//! Each key is stored as `<dir>/<key>.json`.

use std::io::ErrorKind;
use std::path::PathBuf;

use super::{data_dir, BlobStore};
use crate::error::{PersistenceError, Result};

/// Blob store writing one JSON file per key.
pub struct JsonFileBlobStore {
    dir: PathBuf,
}

impl JsonFileBlobStore {
    /// Open the store rooted at the data directory.
    pub fn open() -> Result<Self> {
        Ok(Self { dir: data_dir()? })
    }

    /// Create a store rooted at a custom directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for JsonFileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Read {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        let to_write_err = |e: std::io::Error| PersistenceError::Write {
            key: key.to_string(),
            message: e.to_string(),
        };
        std::fs::create_dir_all(&self.dir).map_err(to_write_err)?;

        // Write to a sibling file first so a crash never leaves a truncated blob.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, blob).map_err(to_write_err)?;
        std::fs::rename(&tmp, &path).map_err(to_write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileBlobStore::with_dir(dir.path());
        assert!(store.read("habits").unwrap().is_none());
    }

    #[test]
    fn store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileBlobStore::with_dir(dir.path());
        store.write("habits", "[]").unwrap();
        assert_eq!(store.read("habits").unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("habits").exists());
        assert!(!dir.path().join("habits.json.tmp").exists());
    }

    #[test]
    fn write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileBlobStore::with_dir(dir.path().join("nested"));
        store.write("habits", "[]").unwrap();
        assert!(store.path_for("habits").exists());
    }
}
