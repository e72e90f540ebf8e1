//! In-process session storage with idle expiry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use super::{SessionStorage, StorageError};

struct SessionItems {
    items: HashMap<String, String>,
    touched: Instant,
}

/// Keeps every session's items in memory. A session idle for longer than
/// `ttl` is treated as gone and purged on the next write.
pub struct MemorySessionStorage {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, SessionItems>>,
}

impl MemorySessionStorage {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn is_live(&self, entry: &SessionItems, now: Instant) -> bool {
        now.duration_since(entry.touched) < self.ttl
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_item(&self, session: Uuid, name: &str) -> Result<Option<String>, StorageError> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&session)
            .filter(|s| self.is_live(s, now))
            .and_then(|s| s.items.get(name).cloned()))
    }

    async fn set_item(&self, session: Uuid, name: &str, value: String) -> Result<(), StorageError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| now.duration_since(s.touched) < self.ttl);

        let entry = sessions.entry(session).or_insert_with(|| SessionItems {
            items: HashMap::new(),
            touched: now,
        });
        entry.items.insert(name.to_string(), value);
        entry.touched = now;
        Ok(())
    }

    async fn remove_item(&self, session: Uuid, name: &str) -> Result<(), StorageError> {
        let mut sessions = self.sessions.write().await;
        if let Some(entry) = sessions.get_mut(&session) {
            entry.items.remove(name);
            if entry.items.is_empty() {
                sessions.remove(&session);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn live_sessions(storage: &MemorySessionStorage) -> usize {
        let now = Instant::now();
        let sessions = storage.sessions.read().await;
        sessions.values().filter(|s| storage.is_live(s, now)).count()
    }

    #[tokio::test]
    async fn test_set_then_get_returns_value() {
        let storage = MemorySessionStorage::new(Duration::from_secs(60));
        let id = Uuid::new_v4();
        storage.set_item(id, "k", "v".to_string()).await.unwrap();
        assert_eq!(storage.get_item(id, "k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(storage.get_item(id, "other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_item_drops_empty_session() {
        let storage = MemorySessionStorage::new(Duration::from_secs(60));
        let id = Uuid::new_v4();
        storage.set_item(id, "k", "v".to_string()).await.unwrap();
        storage.remove_item(id, "k").await.unwrap();
        assert_eq!(storage.get_item(id, "k").await.unwrap(), None);
        assert_eq!(live_sessions(&storage).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires() {
        let storage = MemorySessionStorage::new(Duration::from_secs(30));
        let id = Uuid::new_v4();
        storage.set_item(id, "k", "v".to_string()).await.unwrap();

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(storage.get_item(id, "k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(storage.get_item(id, "k").await.unwrap(), None);
        assert_eq!(live_sessions(&storage).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_refreshes_idle_timer() {
        let storage = MemorySessionStorage::new(Duration::from_secs(30));
        let id = Uuid::new_v4();
        storage.set_item(id, "k", "v1".to_string()).await.unwrap();

        tokio::time::advance(Duration::from_secs(20)).await;
        storage.set_item(id, "k", "v2".to_string()).await.unwrap();

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(storage.get_item(id, "k").await.unwrap().as_deref(), Some("v2"));
    }
}
