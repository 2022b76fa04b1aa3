//! Redis-based todo store implementation.
//!
//! # Architecture
//!
//! Todos are stored in Redis with:
//! - **Record key**: `TODO:{id}` → JSON-encoded record (String)
//! - **Order index**: `TODOS_ORDER` (List) → ids, newest first via `LPUSH`
//!
//! Creating and deleting a todo each run as one `MULTI`/`EXEC` pipeline, so
//! other clients never observe the record and its index entry out of step.
//!
//! # Example
//!
//! ```no_run
//! use kv_todo::stores::RedisTodoStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RedisTodoStore::new("redis://127.0.0.1:6379/0").await?;
//! # Ok(())
//! # }
//! ```

use crate::codec;
use crate::constants::{record_key, ORDER_KEY, RECORD_KEY_PREFIX};
use crate::error::{Result, TodoError};
use crate::providers::{OrderIndex, Purge, RecordStore, TodoBackend};
use crate::state::{Todo, TodoId};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// Redis-backed record store and order index.
///
/// Cheap to clone: clones share one `ConnectionManager`, which multiplexes
/// concurrent requests over a single connection and reconnects on failure.
#[derive(Clone)]
pub struct RedisTodoStore {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,
}

impl RedisTodoStore {
    /// Connect to Redis and create a todo store.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://127.0.0.1:6379/0")
    ///
    /// # Errors
    ///
    /// Returns error if connection to Redis fails.
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            TodoError::Storage(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            TodoError::Storage(format!("Failed to create Redis connection manager: {e}"))
        })?;

        Ok(Self::from_manager(conn_manager))
    }

    /// Wrap an existing connection manager.
    #[must_use]
    pub const fn from_manager(conn_manager: ConnectionManager) -> Self {
        Self { conn_manager }
    }
}

impl RecordStore for RedisTodoStore {
    async fn put(&self, todo: &Todo) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = record_key(&todo.id);
        let raw = codec::encode(todo)?;

        let _: () = conn
            .set(&key, raw)
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to write todo: {e}")))?;

        tracing::debug!(todo_id = %todo.id, done = todo.done, "Wrote todo record");
        Ok(())
    }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        let mut conn = self.conn_manager.clone();
        let key = record_key(id);

        let raw: Option<Vec<u8>> = conn
            .get(&key)
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to read todo: {e}")))?;

        // Non-UTF-8 bytes decode as absent, same as malformed JSON
        Ok(raw
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|text| codec::decode(&text)))
    }

    async fn remove(&self, id: &TodoId) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        let key = record_key(id);

        let removed: usize = conn
            .del(&key)
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to delete todo: {e}")))?;

        Ok(removed > 0)
    }

    async fn exists(&self, id: &TodoId) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        let key = record_key(id);

        let exists: bool = conn.exists(&key).await.map_err(|e| {
            TodoError::Storage(format!("Failed to check todo existence: {e}"))
        })?;

        Ok(exists)
    }
}

impl OrderIndex for RedisTodoStore {
    async fn prepend(&self, id: &TodoId) -> Result<()> {
        let mut conn = self.conn_manager.clone();

        let _: () = conn
            .lpush(ORDER_KEY, id.as_str())
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to index todo: {e}")))?;

        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<TodoId>> {
        let mut conn = self.conn_manager.clone();

        let ids: Vec<String> = conn
            .lrange(ORDER_KEY, 0, -1)
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to read todo order: {e}")))?;

        Ok(ids.into_iter().map(TodoId::from).collect())
    }

    async fn remove_all_occurrences(&self, id: &TodoId) -> Result<usize> {
        let mut conn = self.conn_manager.clone();

        let removed: usize = conn
            .lrem(ORDER_KEY, 0, id.as_str())
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to unindex todo: {e}")))?;

        Ok(removed)
    }
}

impl TodoBackend for RedisTodoStore {
    async fn insert(&self, todo: &Todo) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = record_key(&todo.id);
        let raw = codec::encode(todo)?;

        let _: () = redis::pipe()
            .atomic()
            .set(&key, raw)
            .ignore()
            .lpush(ORDER_KEY, todo.id.as_str())
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to create todo: {e}")))?;

        tracing::info!(todo_id = %todo.id, "Created todo atomically in Redis");

        Ok(())
    }

    async fn purge(&self, id: &TodoId) -> Result<Purge> {
        let mut conn = self.conn_manager.clone();
        let key = record_key(id);

        // LREM count 0 drops every occurrence, including accidental duplicates
        let (deleted, unindexed): (usize, usize) = redis::pipe()
            .atomic()
            .del(&key)
            .lrem(ORDER_KEY, 0, id.as_str())
            .query_async(&mut conn)
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to delete todo: {e}")))?;

        tracing::info!(
            todo_id = %id,
            record_removed = deleted > 0,
            references_removed = unindexed,
            "Deleted todo atomically from Redis"
        );

        Ok(Purge {
            record_removed: deleted > 0,
            references_removed: unindexed,
        })
    }

    async fn reset_all(&self) -> Result<()> {
        let mut conn = self.conn_manager.clone();

        // Server-side so no client can prepend between the read and the DEL
        let lua_script = r"
            local order_key = KEYS[1]
            local prefix = ARGV[1]
            local ids = redis.call('LRANGE', order_key, 0, -1)
            local deleted_count = 0

            for i, id in ipairs(ids) do
                deleted_count = deleted_count + redis.call('DEL', prefix .. id)
            end

            redis.call('DEL', order_key)
            return deleted_count
        ";

        let script = redis::Script::new(lua_script);
        let deleted_count: usize = script
            .key(ORDER_KEY)
            .arg(RECORD_KEY_PREFIX)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| TodoError::Storage(format!("Failed to reset todos: {e}")))?;

        tracing::warn!(deleted_count, "Reset all todos");

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn_manager.clone();

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| TodoError::Storage(format!("Redis ping failed: {e}")))?;

        Ok(())
    }
}
