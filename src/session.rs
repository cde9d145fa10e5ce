//! Session Flag Store
//!
//! The client's only notion of "logged in": a boolean stored under
//! [`SESSION_KEY`]. No token, no expiry. The browser keeps it in
//! `sessionStorage`; native front-ends use [`MemorySession`] or
//! [`FileSession`].

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Key under which the flag is stored
pub const SESSION_KEY: &str = "authenticated";

/// Errors while persisting the flag
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error on session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Storage for the authenticated flag
pub trait SessionStore: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Set the flag after a successful login
    fn set_authenticated(&self) -> SessionResult<()>;

    /// Remove the flag on logout
    fn clear(&self) -> SessionResult<()>;
}

/// In-process flag, lost when the process exits
#[derive(Debug, Default)]
pub struct MemorySession {
    flag: AtomicBool,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn is_authenticated(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn set_authenticated(&self) -> SessionResult<()> {
        self.flag.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        self.flag.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Flag persisted as a small JSON object so it survives between CLI runs
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> SessionResult<Map<String, Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(entries) => Ok(entries),
            _ => Ok(Map::new()),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> SessionResult<()> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(io_err(e)),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

impl SessionStore for FileSession {
    fn is_authenticated(&self) -> bool {
        match self.read_entries() {
            Ok(entries) => entries
                .get(SESSION_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Unreadable session file");
                false
            }
        }
    }

    fn set_authenticated(&self) -> SessionResult<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(SESSION_KEY.to_string(), Value::Bool(true));
        self.write_entries(&entries)
    }

    fn clear(&self) -> SessionResult<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.remove(SESSION_KEY);
        self.write_entries(&entries)
    }
}

/// Default session file location
pub fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("estate").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./estate_session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_session() {
        let session = MemorySession::new();
        assert!(!session.is_authenticated());

        session.set_authenticated().unwrap();
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_session_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let session = FileSession::new(&path);

        assert!(!session.is_authenticated());

        session.set_authenticated().unwrap();
        assert!(path.exists());

        // A second handle on the same file sees the flag
        assert!(FileSession::new(&path).is_authenticated());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_session_uses_fixed_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSession::new(&path).set_authenticated().unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[SESSION_KEY], Value::Bool(true));
    }

    #[test]
    fn test_corrupt_file_is_not_authenticated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let session = FileSession::new(&path);
        assert!(!session.is_authenticated());

        // Logging in again overwrites the garbage
        session.set_authenticated().unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_clear_without_file() {
        let dir = tempdir().unwrap();
        let session = FileSession::new(dir.path().join("missing.json"));
        session.clear().unwrap();
        assert!(!session.is_authenticated());
    }
}
