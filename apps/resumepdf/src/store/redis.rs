//! Redis-backed session storage. Each item is its own key with an expiry,
//! refreshed on every write.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tracing::info;
use uuid::Uuid;

use super::{SessionStorage, StorageError};

pub struct RedisSessionStorage {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisSessionStorage {
    /// Opens a multiplexed connection to `redis_url`.
    pub async fn connect(redis_url: &str, ttl: Duration) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis session storage connected");
        Ok(Self {
            conn,
            ttl_secs: ttl.as_secs().max(1),
        })
    }
}

pub(crate) fn item_key(session: Uuid, name: &str) -> String {
    format!("session:{session}:{name}")
}

#[async_trait]
impl SessionStorage for RedisSessionStorage {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn get_item(&self, session: Uuid, name: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(item_key(session, name))
            .query_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn set_item(&self, session: Uuid, name: &str, value: String) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(item_key(session, name))
            .arg(value)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn remove_item(&self, session: Uuid, name: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(item_key(session, name))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_is_scoped_by_session() {
        let id = Uuid::nil();
        assert_eq!(
            item_key(id, "pdf-form-storage"),
            "session:00000000-0000-0000-0000-000000000000:pdf-form-storage"
        );
    }
}
