//! Durable client-side storage for Faranga.
//!
//! Everything here sits behind the [`KeyValueStore`] trait so call sites
//! depend on an injected abstraction rather than ambient globals: tests
//! substitute [`MemoryStore`], the CLI uses [`FileStore`] under its data
//! directory. On top of the trait sit the session-credential store and
//! the append-only farm-record store with CSV export.

mod error;
mod file;
mod memory;
mod record;
mod session;
mod store;
mod traits;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{Employee, FarmRecord, FertilizerApplication, ProductionRecord, SeedStock};
pub use session::{SessionStore, LANGUAGE_KEY, TOKEN_KEY, USER_KEY};
pub use store::{Append, RecordStore};
pub use traits::KeyValueStore;
