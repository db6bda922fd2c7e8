//! Persisted identity of the logged-in user.
//!
//! A session records who is logged in and survives restarts. It never holds
//! the password.

use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use waymark_core::{User, UserId};

/// The logged-in user as remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier of the logged-in user.
    pub user_id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub username: String,
}

impl Session {
    /// Capture the identity of `user`.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }

    /// Rebuild a user record from the session.
    ///
    /// The password is left empty and preferences are unknown.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.user_id,
            email: self.email,
            password: String::new(),
            username: self.username,
            preferences: String::new(),
        }
    }
}

/// Errors raised while reading or writing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session file could not be read.
    #[error("failed to read session file {path}")]
    Read {
        /// Location of the session file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The session file could not be written or removed.
    #[error("failed to write session file {path}")]
    Write {
        /// Location of the session file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The session file does not contain a valid session.
    #[error("session file {path} is malformed")]
    Decode {
        /// Location of the session file.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The session could not be serialised.
    #[error("failed to encode session")]
    Encode {
        /// JSON encoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A previous writer panicked while holding the session lock.
    #[error("session lock poisoned by an earlier failure")]
    Poisoned,
}

/// Storage for the current session.
pub trait SessionStore {
    /// The saved session, if any.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the saved session.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget the saved session. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session kept as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: Utf8PathBuf,
}

impl FileSessionStore {
    /// Use the JSON file at `path`; it is created on first save.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let Some(contents) =
            waymark_fs::read_utf8_file_if_exists(&self.path).map_err(|source| {
                SessionError::Read {
                    path: self.path.clone(),
                    source,
                }
            })?
        else {
            return Ok(None);
        };
        let session = serde_json::from_str(&contents).map_err(|source| SessionError::Decode {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let contents = serde_json::to_string_pretty(session)
            .map_err(|source| SessionError::Encode { source })?;
        waymark_fs::write_utf8_file(&self.path, &contents).map_err(|source| {
            SessionError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!("saved session for user {} to {}", session.user_id, self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let removed = waymark_fs::remove_file_if_exists(&self.path).map_err(|source| {
            SessionError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        if removed {
            debug!("cleared session at {}", self.path);
        }
        Ok(())
    }
}

/// Session held in memory; useful for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self
            .session
            .lock()
            .map_err(|_| SessionError::Poisoned)?
            .clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.lock().map_err(|_| SessionError::Poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock().map_err(|_| SessionError::Poisoned)? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            user_id: 4,
            email: String::from("ann@example.com"),
            username: String::from("Ann"),
        }
    }

    #[fixture]
    fn file_store() -> (TempDir, FileSessionStore) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        let store = FileSessionStore::new(root.join("state/session.json"));
        (dir, store)
    }

    #[rstest]
    fn missing_file_means_no_session(file_store: (TempDir, FileSessionStore)) {
        let (_dir, store) = file_store;
        assert_eq!(store.load().expect("load"), None);
    }

    #[rstest]
    fn saved_session_is_reloaded(file_store: (TempDir, FileSessionStore)) {
        let (_dir, store) = file_store;
        store.save(&session()).expect("save");
        assert_eq!(store.load().expect("load"), Some(session()));
    }

    #[rstest]
    fn session_file_never_contains_password(file_store: (TempDir, FileSessionStore)) {
        let (_dir, store) = file_store;
        let user = User {
            id: 1,
            email: String::from("ann@example.com"),
            password: String::from("hunter2"),
            username: String::from("Ann"),
            preferences: String::new(),
        };
        store.save(&Session::for_user(&user)).expect("save");
        let raw = std::fs::read_to_string(store.path()).expect("read raw file");
        assert!(!raw.contains("hunter2"));
    }

    #[rstest]
    fn clear_is_idempotent(file_store: (TempDir, FileSessionStore)) {
        let (_dir, store) = file_store;
        store.save(&session()).expect("save");
        store.clear().expect("first clear");
        store.clear().expect("second clear");
        assert_eq!(store.load().expect("load"), None);
    }

    #[rstest]
    fn malformed_file_is_reported(file_store: (TempDir, FileSessionStore)) {
        let (_dir, store) = file_store;
        waymark_fs::write_utf8_file(store.path(), "{not json").expect("write garbage");
        let err = store.load().expect_err("decode should fail");
        match err {
            SessionError::Decode { path, .. } => assert_eq!(path, store.path()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn memory_store_round_trips() {
        let store = MemorySessionStore::default();
        store.save(&session()).expect("save");
        assert_eq!(store.load().expect("load"), Some(session()));
        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }

    #[rstest]
    fn into_user_drops_secrets() {
        let user = session().into_user();
        assert_eq!(user.id, 4);
        assert!(user.password.is_empty());
    }
}
