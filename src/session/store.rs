//! Session persistence
//!
//! One well-known key holds the serialized [`Session`]. Whatever is stored
//! there is trusted: there is no expiry and no integrity check.

use std::sync::Mutex;
use thiserror::Error;

use crate::models::Session;

/// Well-known storage key for the session record
pub const SESSION_KEY: &str = "cs_user";

/// Errors raised by session storage backends
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session storage operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Persistent storage for the logged-in user's session
pub trait SessionStore: Send + Sync {
    /// Persist `session` under [`SESSION_KEY`], replacing any previous value
    fn save(&self, session: &Session) -> SessionResult<()>;

    /// The stored session, or `None` when nothing usable is stored
    fn load(&self) -> SessionResult<Option<Session>>;

    /// Remove the stored session
    fn clear(&self) -> SessionResult<()>;
}

/// Decode a raw stored value. Values that are not a user record count as
/// absent.
pub fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str::<Option<Session>>(raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(key = SESSION_KEY, error = %e, "Ignoring unreadable stored session");
            None
        }
    }
}

/// In-process store. Nothing survives the process.
#[derive(Default)]
pub struct MemorySessionStore {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an arbitrary raw value, as another writer sharing the key might
    pub fn put_raw(&self, raw: &str) {
        *self.lock() = Some(raw.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.raw.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> SessionResult<()> {
        *self.lock() = Some(serde_json::to_string(session)?);
        Ok(())
    }

    fn load(&self) -> SessionResult<Option<Session>> {
        Ok(self.lock().as_deref().and_then(decode_session))
    }

    fn clear(&self) -> SessionResult<()> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileSessionStore;

#[cfg(feature = "native")]
mod file {
    use std::path::{Path, PathBuf};

    use super::{decode_session, SessionResult, SessionStore, SESSION_KEY};
    use crate::models::Session;

    /// Session stored as `cs_user.json` in a data directory
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(data_dir: impl AsRef<Path>) -> Self {
            Self {
                path: data_dir.as_ref().join(format!("{}.json", SESSION_KEY)),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl SessionStore for FileSessionStore {
        fn save(&self, session: &Session) -> SessionResult<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(session)?;

            // Write to a sibling file and rename so a crash never leaves half a record
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, content)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }

        fn load(&self) -> SessionResult<Option<Session>> {
            match std::fs::read_to_string(&self.path) {
                Ok(raw) => Ok(decode_session(&raw)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn clear(&self) -> SessionResult<()> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::session;

    #[test]
    fn test_memory_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        let s = session("u1", "Ada");
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), Some(s));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_garbage_counts_as_absent() {
        let store = MemorySessionStore::new();
        store.put_raw("{not json");
        assert!(store.load().unwrap().is_none());

        store.put_raw("null");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_foreign_user_record_is_trusted() {
        let store = MemorySessionStore::new();
        store.put_raw(r#"{"id": 3, "name": "Grace", "email": "grace@school.edu"}"#);
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.user.name, "Grace");
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let s = session("u1", "Ada");

        FileSessionStore::new(dir.path()).save(&s).unwrap();

        let reopened = FileSessionStore::new(dir.path());
        assert!(reopened.path().ends_with("cs_user.json"));
        assert_eq!(reopened.load().unwrap(), Some(s));

        reopened.clear().unwrap();
        assert!(reopened.load().unwrap().is_none());
        // clearing twice is fine
        reopened.clear().unwrap();
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileSessionStore::new(&nested);
        store.save(&session("u1", "Ada")).unwrap();
        assert!(nested.join("cs_user.json").exists());
    }
}
