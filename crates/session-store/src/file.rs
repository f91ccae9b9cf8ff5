//! File-backed key/value storage.
//!
//! Each key is one file under a client-local data directory. The session
//! record is the only persisted state, so this stays deliberately small.

use crate::{SessionStorage, StorageError, StorageResult};
use std::fs;
use std::path::PathBuf;

/// Durable storage writing one file per key.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at the platform data dir for the given app name.
    pub fn new(app_name: &str) -> StorageResult<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| StorageError::Backend("No data directory available".to_string()))?;
        let dir = base.join(app_name);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Create storage rooted at an explicit directory.
    pub fn with_dir(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        // Keys are fixed identifiers, never user input, but reject separators
        // so a bad key cannot escape the storage directory.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StorageError::Backend(format!("Invalid storage key: {key}")));
        }
        Ok(self.dir.join(key))
    }
}

impl SessionStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        // Write to a sibling temp file first so readers never see a torn value.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
