//! Session context: the credential and cached user record
//!
//! The shell owns one `Session` and hands clones of it to the gateway.
//! Both slots are written together on login/registration and removed
//! together on logout.

use dashmap::DashMap;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::SessionError;

const DATA_DIR: &str = ".invoice_desk";
const SESSION_DIR: &str = "session";

/// Named storage slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Token,
    User,
}

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::Token => "token",
            Slot::User => "user",
        }
    }
}

/// Persistent key/value storage for the two session slots
pub trait SessionStore: Send + Sync {
    fn get(&self, slot: Slot) -> Result<Option<String>, SessionError>;
    fn set(&self, slot: Slot, value: &str) -> Result<(), SessionError>;
    fn remove(&self, slot: Slot) -> Result<(), SessionError>;
}

/// Process-local store, lost when the process exits
#[derive(Default)]
pub struct MemoryStore {
    slots: DashMap<Slot, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, slot: Slot) -> Result<Option<String>, SessionError> {
        Ok(self.slots.get(&slot).map(|v| v.value().clone()))
    }

    fn set(&self, slot: Slot, value: &str) -> Result<(), SessionError> {
        self.slots.insert(slot, value.to_string());
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<(), SessionError> {
        self.slots.remove(&slot);
        Ok(())
    }
}

/// One file per slot under a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(slot.name())
    }
}

impl SessionStore for FileStore {
    fn get(&self, slot: Slot) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, slot: Slot, value: &str) -> Result<(), SessionError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.slot_path(slot), value)?;
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<(), SessionError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Get the default session directory (~/.invoice_desk/session)
pub fn default_session_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR)
        .join(SESSION_DIR)
}

/// Shared session context
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(dir)))
    }

    /// The bearer credential, if one is stored
    pub fn credential(&self) -> Result<Option<String>, SessionError> {
        self.store.get(Slot::Token)
    }

    /// The cached user record, if one is stored. A stored `null` counts as absent.
    pub fn current_user(&self) -> Result<Option<Value>, SessionError> {
        match self.store.get(Slot::User)? {
            Some(raw) => match serde_json::from_str(&raw)? {
                Value::Null => Ok(None),
                user => Ok(Some(user)),
            },
            None => Ok(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        match self.credential() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read credential: {}", e);
                false
            }
        }
    }

    /// Store the credential and user record after a successful login
    pub fn establish(&self, token: &str, user: &Value) -> Result<(), SessionError> {
        self.store.set(Slot::Token, token)?;
        self.store.set(Slot::User, &serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Remove both slots
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove(Slot::Token)?;
        self.store.remove(Slot::User)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_session_lifecycle() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());
        assert_eq!(session.current_user().unwrap(), None);

        let user = json!({"id": 7, "email": "a@b.co"});
        session.establish("T", &user).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.credential().unwrap().as_deref(), Some("T"));
        assert_eq!(session.current_user().unwrap(), Some(user));

        session.clear().unwrap();
        assert_eq!(session.credential().unwrap(), None);
        assert_eq!(session.current_user().unwrap(), None);
    }

    #[test]
    fn clones_share_slots() {
        let session = Session::in_memory();
        let other = session.clone();
        session.establish("abc", &json!(null)).unwrap();
        assert_eq!(other.credential().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");

        let first = Session::on_disk(&path);
        first
            .establish("persisted", &json!({"company_name": "Acme"}))
            .unwrap();

        let second = Session::on_disk(&path);
        assert_eq!(second.credential().unwrap().as_deref(), Some("persisted"));
        assert_eq!(
            second.current_user().unwrap(),
            Some(json!({"company_name": "Acme"}))
        );

        second.clear().unwrap();
        assert!(!first.is_authenticated());
        // clearing an empty store is fine
        second.clear().unwrap();
    }

    #[test]
    fn null_user_record_reads_as_absent() {
        let session = Session::in_memory();
        session.establish("T", &Value::Null).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap(), None);
    }

    #[test]
    fn corrupt_user_record_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.set(Slot::User, "{not json").unwrap();
        let session = Session::new(store);
        assert!(matches!(
            session.current_user(),
            Err(SessionError::Decode(_))
        ));
    }
}
