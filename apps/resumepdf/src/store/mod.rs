//! Form State Store: the single owner of a session's [`Record`].
//!
//! `FormStore` persists the whole record as one JSON blob under
//! [`STORAGE_KEY`] in session-scoped storage. Storage backends are pluggable
//! behind [`SessionStorage`]; `AppState` carries an `Arc<dyn SessionStorage>`.

pub mod memory;
pub mod redis;

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::record::Record;

pub use memory::MemorySessionStorage;
pub use self::redis::RedisSessionStorage;

/// Fixed key the serialized record lives under.
pub const STORAGE_KEY: &str = "pdf-form-storage";

/// Envelope version written by this store. Blobs with another version are discarded.
pub const STORAGE_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Storage trait
// ────────────────────────────────────────────────────────────────────────────

/// Session-scoped string storage, the server-side counterpart of a browser's
/// `sessionStorage`. Items vanish once the session expires.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Short backend label for diagnostics.
    fn backend_name(&self) -> &'static str;

    async fn get_item(&self, session: Uuid, name: &str) -> Result<Option<String>, StorageError>;

    async fn set_item(&self, session: Uuid, name: &str, value: String) -> Result<(), StorageError>;

    async fn remove_item(&self, session: Uuid, name: &str) -> Result<(), StorageError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted envelope
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    state: PersistedData,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedData {
    data: Record,
}

// ────────────────────────────────────────────────────────────────────────────
// Session write locks
// ────────────────────────────────────────────────────────────────────────────

/// One write lock per live session, shared by every `FormStore` built from
/// the same `AppState`. Entries are dropped once no writer holds them.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<Uuid, Weak<Mutex<()>>>>,
}

impl SessionLocks {
    async fn acquire(&self, session: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            match locks.get(&session).and_then(Weak::upgrade) {
                Some(lock) => lock,
                None => {
                    locks.retain(|_, lock| lock.strong_count() > 0);
                    let lock = Arc::new(Mutex::new(()));
                    locks.insert(session, Arc::downgrade(&lock));
                    lock
                }
            }
        };
        lock.lock_owned().await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FormStore
// ────────────────────────────────────────────────────────────────────────────

/// A session's view of the record store.
///
/// Replacement semantics only: callers merge field edits before `set_data`,
/// or hand the merge to [`FormStore::update`]. Writes for one session are
/// serialized through [`SessionLocks`].
#[derive(Clone)]
pub struct FormStore {
    storage: Arc<dyn SessionStorage>,
    locks: Arc<SessionLocks>,
    session: Uuid,
}

impl FormStore {
    pub fn new(storage: Arc<dyn SessionStorage>, locks: Arc<SessionLocks>, session: Uuid) -> Self {
        Self {
            storage,
            locks,
            session,
        }
    }

    /// Returns the stored record, or an all-empty one if nothing usable is stored.
    pub async fn get_data(&self) -> Result<Record, StorageError> {
        let Some(raw) = self.storage.get_item(self.session, STORAGE_KEY).await? else {
            debug!(session = %self.session, "No stored form data; starting empty");
            return Ok(Record::default());
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(persisted) if persisted.version == STORAGE_VERSION => Ok(persisted.state.data),
            Ok(persisted) => {
                warn!(
                    session = %self.session,
                    version = persisted.version,
                    "Discarding stored form data with unknown version"
                );
                Ok(Record::default())
            }
            Err(e) => {
                warn!(session = %self.session, "Discarding unreadable stored form data: {e}");
                Ok(Record::default())
            }
        }
    }

    /// Replaces the stored record wholesale.
    pub async fn set_data(&self, data: Record) -> Result<(), StorageError> {
        let _guard = self.locks.acquire(self.session).await;
        self.write(data).await
    }

    /// Reads the stored record, applies `edit` and stores the result while
    /// holding the session's write lock, so overlapping edits never drop
    /// each other's changes.
    pub async fn update<F>(&self, edit: F) -> Result<Record, StorageError>
    where
        F: FnOnce(Record) -> Record + Send,
    {
        let _guard = self.locks.acquire(self.session).await;
        let record = edit(self.get_data().await?);
        self.write(record.clone()).await?;
        Ok(record)
    }

    /// Drops the stored record for this session.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.locks.acquire(self.session).await;
        self.storage.remove_item(self.session, STORAGE_KEY).await
    }

    async fn write(&self, data: Record) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&PersistedState {
            state: PersistedData { data },
            version: STORAGE_VERSION,
        })?;
        self.storage.set_item(self.session, STORAGE_KEY, blob).await?;
        debug!(session = %self.session, "Stored form data");
        Ok(())
    }
}
