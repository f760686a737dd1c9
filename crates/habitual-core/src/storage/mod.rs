//! Key-value blob persistence and configuration.
//!
//! The habit store only needs to read and write one opaque blob under a fixed
//! key, so every backend implements the small [`BlobStore`] trait:
//!
//! - [`SqliteBlobStore`]: `kv` table in `habitual.db` (default)
//! - [`JsonFileBlobStore`]: one `<key>.json` file per key
//! - [`MemoryBlobStore`]: in-process map, used by tests

mod config;
pub mod json_file;
pub mod sqlite;

pub use config::{CalendarConfig, Config, LoggingConfig, StorageBackend, StorageConfig};
pub use json_file::JsonFileBlobStore;
pub use sqlite::SqliteBlobStore;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{PersistenceError, Result};

/// Logical key under which the habit sequence is stored.
pub const HABITS_KEY: &str = "habits";

/// Returns the data directory, creating it if needed.
///
/// Resolution order:
/// 1. `HABITUAL_DATA_DIR` when set
/// 2. `~/.config/habitual-dev/` when `HABITUAL_ENV=dev`
/// 3. `~/.config/habitual/`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HABITUAL_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITUAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitual-dev")
            } else {
                base_dir.join("habitual")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Open the backend selected by `config.storage.backend`.
///
/// # Errors
/// Returns an error if the data directory or database cannot be opened.
pub fn open_backend(config: &Config) -> Result<Box<dyn BlobStore>> {
    let backend: Box<dyn BlobStore> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteBlobStore::open()?),
        StorageBackend::Json => Box::new(JsonFileBlobStore::open()?),
    };
    tracing::debug!(backend = ?config.storage.backend, "blob store opened");
    Ok(backend)
}

/// Opaque blob persistence keyed by a logical name.
pub trait BlobStore {
    /// Read the blob stored under `key`, or `None` if nothing was stored.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the blob stored under `key`.
    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError>;
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        (**self).write(key, blob)
    }
}

/// In-memory blob store.
///
/// Reads and writes can be made to fail to simulate a broken backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
    writes: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one blob.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let mut store = Self::default();
        store.blobs.insert(key.to_string(), blob.to_string());
        store
    }

    /// Raw blob currently stored under `key`.
    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.fail_reads {
            return Err(PersistenceError::Read {
                key: key.to_string(),
                message: "memory store configured to fail reads".into(),
            });
        }
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Write {
                key: key.to_string(),
                message: "memory store configured to fail writes".into(),
            });
        }
        self.blobs.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        Ok(())
    }
}
