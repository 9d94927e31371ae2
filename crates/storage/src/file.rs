use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// File-backed [`KeyValueStore`]: one file per key under a data directory.
///
/// The desktop analog of browser local storage. Writes replace the whole
/// file; there is no cross-process locking, so two processes sharing a
/// data directory can overwrite each other's entries.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir)?;
        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed internal names, but never trust them as paths.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(safe)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trip_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = FileStore::open(tmp.path()).unwrap();
            store.set("faranga-token", "tok123").unwrap();
        }
        let store = FileStore::open(tmp.path()).unwrap();
        assert_eq!(
            store.get("faranga-token").unwrap().as_deref(),
            Some("tok123")
        );
    }

    #[test]
    fn absent_key_reads_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        store.set("../outside", "v").unwrap();
        assert!(tmp.path().join(".._outside").exists());
        assert!(!tmp.path().parent().unwrap().join("outside").exists());
    }

    #[test]
    fn remove_then_get_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
