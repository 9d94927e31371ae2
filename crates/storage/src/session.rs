use std::sync::Arc;

use faranga_core::{Language, Session, User};

use crate::traits::KeyValueStore;

/// Storage key for the opaque bearer token.
pub const TOKEN_KEY: &str = "faranga-token";
/// Storage key for the serialized current-user record.
pub const USER_KEY: &str = "faranga-user";
/// Storage key for the selected display language.
pub const LANGUAGE_KEY: &str = "faranga-lang";

/// Persists the session credential and display language over an injected
/// [`KeyValueStore`].
///
/// Reads are parse-or-absent: malformed stored data reads as logged-out
/// rather than erroring. Writes are best-effort; the boolean results
/// exist for tests, and callers are free to ignore them.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        SessionStore { store }
    }

    /// Persist a login: token plus serialized user. Returns whether both
    /// writes landed.
    pub fn save(&self, session: &Session) -> bool {
        let user_json = match serde_json::to_string(&session.user) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("could not serialize user record: {e}");
                return false;
            }
        };
        let token_ok = self.store.set(TOKEN_KEY, &session.token).is_ok();
        let user_ok = self.store.set(USER_KEY, &user_json).is_ok();
        if !(token_ok && user_ok) {
            log::warn!("session write failed; credential kept in memory only");
        }
        token_ok && user_ok
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.store
            .get(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    /// The stored user record, if present and parsable.
    pub fn user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    /// The full credential, when both halves are present.
    pub fn session(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.user()?,
        })
    }

    /// Remove the credential (logout). Best-effort.
    pub fn clear(&self) {
        if self.store.remove(TOKEN_KEY).is_err() || self.store.remove(USER_KEY).is_err() {
            log::warn!("could not remove stored session");
        }
    }

    /// The stored display language, defaulting to English.
    pub fn language(&self) -> Language {
        match self.store.get(LANGUAGE_KEY) {
            Ok(Some(raw)) => Language::parse(&raw),
            _ => Language::default(),
        }
    }

    pub fn set_language(&self, language: Language) -> bool {
        self.store.set(LANGUAGE_KEY, language.code()).is_ok()
    }
}
