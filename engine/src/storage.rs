//! Persistence port.
//!
//! Modeled on a browser's local storage: a flat key-value map of JSON
//! strings, read once at startup and written after every mutation. Absence of
//! a key means empty/default state. The port is infallible from the caller's
//! perspective; the file-backed implementation logs and swallows I/O errors
//! because nothing upstream can retry them.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Roster of user records.
pub const USERS_KEY: &str = "casino-users";
/// Promotional/referral codes and their redemption state.
pub const CODES_KEY: &str = "casino-referral-codes";
/// Snapshot of the currently authenticated user.
pub const SESSION_KEY: &str = "casino-current-user";

/// Key-value persistence for JSON blobs.
pub trait StoragePort {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory storage. State evaporates with the process; useful for tests
/// and ephemeral lobbies.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Clone, Debug)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StoragePort for DirStorage {
    fn load(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(%key, %err, "failed to read persisted blob");
                None
            }
        }
    }

    fn store(&mut self, key: &str, value: &str) {
        if let Err(err) = std::fs::write(self.path_for(key), value) {
            warn!(%key, %err, "failed to persist blob");
        }
    }

    fn remove(&mut self, key: &str) {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(%key, %err, "failed to remove persisted blob"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let mut storage = MemoryStorage::default();
        assert_eq!(storage.load(USERS_KEY), None);

        storage.store(USERS_KEY, "[]");
        assert_eq!(storage.load(USERS_KEY).as_deref(), Some("[]"));

        storage.remove(USERS_KEY);
        assert_eq!(storage.load(USERS_KEY), None);
    }

    #[test]
    fn dir_storage_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = DirStorage::open(dir.path()).expect("open");

        assert_eq!(storage.load(SESSION_KEY), None);
        storage.store(SESSION_KEY, r#"{"id":"u1"}"#);
        assert_eq!(storage.load(SESSION_KEY).as_deref(), Some(r#"{"id":"u1"}"#));

        storage.remove(SESSION_KEY);
        assert_eq!(storage.load(SESSION_KEY), None);
        // Removing an absent key is a no-op, not an error.
        storage.remove(SESSION_KEY);
    }

    #[test]
    fn dir_storage_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let mut storage = DirStorage::open(dir.path()).expect("open");
            storage.store(CODES_KEY, "[]");
        }
        let storage = DirStorage::open(dir.path()).expect("reopen");
        assert_eq!(storage.load(CODES_KEY).as_deref(), Some("[]"));
    }
}
