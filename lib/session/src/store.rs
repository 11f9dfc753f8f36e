//! Persistence of the active conversation id.
//!
//! Stores never fail toward the caller. A store that cannot reach its
//! backing medium logs the problem and the session keeps its id in memory.

use crate::error::StoreError;
use krx_chat_core::{ConversationId, Result};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Trait for conversation id persistence.
pub trait ConversationStore: Send + Sync {
    /// Returns the stored id, if any.
    fn read(&self) -> Option<ConversationId>;

    /// Replaces the stored id.
    fn write(&self, id: &ConversationId);

    /// Removes the stored id.
    fn clear(&self);
}

/// A store holding the id in one plain-text file.
///
/// Writes land in a temporary sibling file that is renamed over the target,
/// so readers in other processes see either the old or the new id.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_read(&self) -> Result<Option<ConversationId>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }
                .into());
            }
        };
        Ok(contents.trim().parse().ok())
    }

    fn try_write(&self, id: &ConversationId) -> Result<(), StoreError> {
        let write_failed = |e: std::io::Error| StoreError::WriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(write_failed)?;

        let mut file = NamedTempFile::new_in(parent).map_err(write_failed)?;
        file.write_all(id.as_str().as_bytes())
            .map_err(write_failed)?;
        file.persist(&self.path).map_err(|e| write_failed(e.error))?;
        Ok(())
    }

    fn try_clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::ClearFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            }
            .into()),
        }
    }
}

impl ConversationStore for FileStore {
    fn read(&self) -> Option<ConversationId> {
        self.try_read().unwrap_or_else(|e| {
            warn!(error = %e, "conversation store unreadable, starting without an id");
            None
        })
    }

    fn write(&self, id: &ConversationId) {
        match self.try_write(id) {
            Ok(()) => debug!(conversation_id = %id, "conversation id stored"),
            Err(e) => warn!(error = %e, "conversation id kept in memory only"),
        }
    }

    fn clear(&self) {
        if let Err(e) = self.try_clear() {
            warn!(error = %e, "stale conversation id could not be removed");
        }
    }
}

/// An in-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    id: Mutex<Option<ConversationId>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `id`.
    #[must_use]
    pub fn with_id(id: ConversationId) -> Self {
        Self {
            id: Mutex::new(Some(id)),
        }
    }
}

impl ConversationStore for MemoryStore {
    fn read(&self) -> Option<ConversationId> {
        self.id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self, id: &ConversationId) {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = Some(id.clone());
    }

    fn clear(&self) {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("conversation_id"))
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().expect("temp dir");
        assert!(store_in(&dir).read().is_none());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        store.write(&ConversationId::new("c-123"));
        assert_eq!(store.read(), Some(ConversationId::new("c-123")));
        assert_eq!(
            std::fs::read_to_string(store.path()).expect("file exists"),
            "c-123"
        );
    }

    #[test]
    fn last_write_wins() {
        let dir = TempDir::new().expect("temp dir");
        let first = store_in(&dir);
        let second = store_in(&dir);
        first.write(&ConversationId::new("a"));
        second.write(&ConversationId::new("b"));
        assert_eq!(first.read(), Some(ConversationId::new("b")));
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        store.write(&ConversationId::new("c-1"));
        store.clear();
        assert!(!store.path().exists());
        store.clear();
        assert!(store.read().is_none());
    }

    #[test]
    fn blank_file_reads_as_none() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        std::fs::write(store.path(), "  \n").expect("seed file");
        assert!(store.read().is_none());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::new(dir.path().join("nested/deeper/id"));
        store.write(&ConversationId::new("c-2"));
        assert_eq!(store.read(), Some(ConversationId::new("c-2")));
    }

    #[test]
    fn unwritable_location_is_swallowed() {
        let dir = TempDir::new().expect("temp dir");
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").expect("seed blocker");
        let store = FileStore::new(blocker.join("id"));

        store.write(&ConversationId::new("c-3"));
        store.clear();

        assert!(store.read().is_none());
        assert!(store.try_write(&ConversationId::new("c-3")).is_err());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::with_id(ConversationId::new("m-1"));
        assert_eq!(store.read(), Some(ConversationId::new("m-1")));
        store.clear();
        assert!(store.read().is_none());
        store.write(&ConversationId::new("m-2"));
        assert_eq!(store.read(), Some(ConversationId::new("m-2")));
    }
}
