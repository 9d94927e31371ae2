use std::path::PathBuf;
use std::sync::Arc;

use faranga_client::ApiGateway;
use faranga_core::Language;
use faranga_storage::{FileStore, KeyValueStore, SessionStore};

/// Environment variable overriding the on-disk store location.
pub(crate) const DATA_DIR_ENV: &str = "FARANGA_DATA_DIR";

/// Everything a command needs: the gateway and the durable stores,
/// resolved once per invocation.
pub(crate) struct AppContext {
    pub gateway: ApiGateway,
    pub store: Arc<dyn KeyValueStore>,
    pub session: SessionStore,
}

impl AppContext {
    pub fn init() -> Result<Self, String> {
        let dir = data_dir()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(
            FileStore::open(&dir)
                .map_err(|e| format!("could not open data directory '{}': {e}", dir.display()))?,
        );
        let session = SessionStore::new(store.clone());
        Ok(AppContext {
            gateway: ApiGateway::from_env(),
            store,
            session,
        })
    }

    /// The stored display language (English when none is set).
    pub fn language(&self) -> Language {
        self.session.language()
    }
}

fn data_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    directories::ProjectDirs::from("rw", "Faranga", "faranga")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            format!("could not determine a data directory; set {DATA_DIR_ENV}")
        })
}
