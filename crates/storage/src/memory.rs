use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// In-memory [`KeyValueStore`], primarily for tests.
///
/// `fail_writes` simulates a full or broken backing store (the browser
/// quota-exceeded case): while set, every `set` call fails but reads
/// keep working, which is exactly the situation the record store's
/// best-effort persistence has to survive.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Toggle simulated write failure.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Backend("poisoned store lock".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(
                "simulated write failure".to_string(),
            ));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Backend("poisoned store lock".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Backend("poisoned store lock".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
