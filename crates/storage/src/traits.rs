use crate::error::StorageError;

/// Durable key-value storage behind the session and farm-record stores.
///
/// Keys and values are plain strings; list-valued entries hold a
/// JSON-serialized sequence. The platform treats client-side storage as
/// a single shared mutable resource with no locking: concurrent writers
/// (two processes on the same data directory) can race and overwrite
/// each other. That is an accepted limitation, not something
/// implementations defend against.
///
/// Implementations must be `Send + Sync` so one store instance can back
/// every call site, including the blocking scoring tasks.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
