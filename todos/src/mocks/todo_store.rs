//! In-memory todo store for testing.

use crate::codec;
use crate::error::{Result, TodoError};
use crate::providers::{OrderIndex, RecordStore, TodoBackend};
use crate::state::{Todo, TodoId};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory todo store.
///
/// Keeps records as encoded strings, exactly like the Redis store does, so
/// tests can plant malformed values. Uses the step-by-step default
/// `insert`/`purge` from [`TodoBackend`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    records: Arc<Mutex<HashMap<TodoId, String>>>,
    order: Arc<Mutex<VecDeque<TodoId>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTodoStore {
    /// Create a new, empty, reachable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store going down (`true`) or coming back (`false`).
    ///
    /// While down, every operation fails with [`TodoError::Storage`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Write a raw value under a record key, bypassing the codec.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn put_raw(&self, id: &TodoId, raw: &str) -> Result<()> {
        lock(&self.records)?.insert(id.clone(), raw.to_string());
        Ok(())
    }

    /// Number of record keys, indexed or not.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn record_count(&self) -> Result<usize> {
        Ok(lock(&self.records)?.len())
    }

    /// Snapshot of the order index, head first.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn order_snapshot(&self) -> Result<Vec<TodoId>> {
        Ok(lock(&self.order)?.iter().cloned().collect())
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TodoError::Storage("Connection refused (simulated)".to_string()));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| TodoError::Storage("Mutex lock failed".to_string()))
}

impl RecordStore for InMemoryTodoStore {
    fn put(&self, todo: &Todo) -> impl Future<Output = Result<()>> + Send {
        let store = self.clone();
        let todo = todo.clone();

        async move {
            store.check_available()?;
            let raw = codec::encode(&todo)?;
            lock(&store.records)?.insert(todo.id, raw);
            Ok(())
        }
    }

    fn get(&self, id: &TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        let store = self.clone();
        let id = id.clone();

        async move {
            store.check_available()?;
            let raw = lock(&store.records)?.get(&id).cloned();
            Ok(raw.and_then(|raw| codec::decode(&raw)))
        }
    }

    fn remove(&self, id: &TodoId) -> impl Future<Output = Result<bool>> + Send {
        let store = self.clone();
        let id = id.clone();

        async move {
            store.check_available()?;
            Ok(lock(&store.records)?.remove(&id).is_some())
        }
    }

    fn exists(&self, id: &TodoId) -> impl Future<Output = Result<bool>> + Send {
        let store = self.clone();
        let id = id.clone();

        async move {
            store.check_available()?;
            Ok(lock(&store.records)?.contains_key(&id))
        }
    }
}

impl OrderIndex for InMemoryTodoStore {
    fn prepend(&self, id: &TodoId) -> impl Future<Output = Result<()>> + Send {
        let store = self.clone();
        let id = id.clone();

        async move {
            store.check_available()?;
            lock(&store.order)?.push_front(id);
            Ok(())
        }
    }

    fn list_ids(&self) -> impl Future<Output = Result<Vec<TodoId>>> + Send {
        let store = self.clone();

        async move {
            store.check_available()?;
            Ok(lock(&store.order)?.iter().cloned().collect())
        }
    }

    fn remove_all_occurrences(&self, id: &TodoId) -> impl Future<Output = Result<usize>> + Send {
        let store = self.clone();
        let id = id.clone();

        async move {
            store.check_available()?;
            let mut order = lock(&store.order)?;
            let before = order.len();
            order.retain(|entry| entry != &id);
            Ok(before - order.len())
        }
    }
}

impl TodoBackend for InMemoryTodoStore {
    fn ping(&self) -> impl Future<Output = Result<()>> + Send {
        let store = self.clone();

        async move { store.check_available() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn todo(id: &str) -> Todo {
        Todo {
            id: TodoId::from(id),
            title: format!("Todo {id}"),
            done: false,
            created_at: "2025-01-01T00:00:00.000000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_round_trip() {
        let store = InMemoryTodoStore::new();
        let record = todo("a");

        store.put(&record).await.unwrap();
        assert!(store.exists(&record.id).await.unwrap());
        assert_eq!(store.get(&record.id).await.unwrap(), Some(record.clone()));
        assert!(store.remove(&record.id).await.unwrap());
        assert!(!store.remove(&record.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_prepend_and_remove_all_occurrences() {
        let store = InMemoryTodoStore::new();
        let a = TodoId::from("a");
        let b = TodoId::from("b");

        store.prepend(&a).await.unwrap();
        store.prepend(&b).await.unwrap();
        store.prepend(&a).await.unwrap();
        assert_eq!(store.list_ids().await.unwrap(), vec![a.clone(), b.clone(), a.clone()]);

        assert_eq!(store.remove_all_occurrences(&a).await.unwrap(), 2);
        assert_eq!(store.list_ids().await.unwrap(), vec![b]);
        assert_eq!(store.remove_all_occurrences(&a).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_default_insert_and_purge() {
        let store = InMemoryTodoStore::new();
        let record = todo("a");

        store.insert(&record).await.unwrap();
        assert_eq!(store.order_snapshot().unwrap(), vec![record.id.clone()]);
        assert_eq!(store.record_count().unwrap(), 1);

        let purge = store.purge(&record.id).await.unwrap();
        assert!(purge.record_removed);
        assert_eq!(purge.references_removed, 1);
        assert_eq!(store.record_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reset_all_keeps_orphans() {
        let store = InMemoryTodoStore::new();
        store.insert(&todo("indexed")).await.unwrap();
        store.put(&todo("orphan")).await.unwrap();

        store.reset_all().await.unwrap();

        assert!(store.order_snapshot().unwrap().is_empty());
        assert!(store.exists(&TodoId::from("orphan")).await.unwrap());
        assert!(!store.exists(&TodoId::from("indexed")).await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = InMemoryTodoStore::new();
        store.set_unavailable(true);

        assert!(matches!(store.ping().await, Err(TodoError::Storage(_))));
        assert!(matches!(store.list_ids().await, Err(TodoError::Storage(_))));
        assert!(matches!(store.put(&todo("a")).await, Err(TodoError::Storage(_))));

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
