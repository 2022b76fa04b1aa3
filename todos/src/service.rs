//! Todo service: composes the record store and the order index.
//!
//! The service holds no mutable state of its own. Everything lives in the
//! backend, so any number of requests may share one service through an `Arc`.

use crate::error::{Result, TodoError};
use crate::metrics::TodoMetrics;
use crate::providers::TodoBackend;
use crate::state::{validate_title, Todo, TodoId};
use kv_todo_core::environment::{Clock, IdGenerator};
use std::sync::Arc;
use std::time::Instant;

/// High-level todo operations over a [`TodoBackend`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use kv_todo::{RedisTodoStore, TodoService};
/// use kv_todo_core::environment::{SystemClock, UuidIdGenerator};
///
/// # async fn example() -> kv_todo::Result<()> {
/// let store = RedisTodoStore::new("redis://127.0.0.1:6379/0").await?;
/// let service = TodoService::new(store, Arc::new(SystemClock), Arc::new(UuidIdGenerator));
///
/// let todo = service.add("Buy milk").await?;
/// service.toggle(&todo.id).await?;
/// assert_eq!(service.clear_completed().await?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TodoService<B> {
    backend: B,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl<B: TodoBackend> TodoService<B> {
    /// Create a service over a connected backend.
    #[must_use]
    pub fn new(backend: B, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            backend,
            clock,
            ids,
        }
    }

    /// The backend this service writes to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Create a todo from a raw title.
    ///
    /// The title is trimmed. The record and its index entry go through
    /// [`TodoBackend::insert`], record first.
    ///
    /// # Errors
    ///
    /// - [`TodoError::Validation`] if the title is blank; nothing is written.
    /// - [`TodoError::Storage`] if the backend fails.
    #[tracing::instrument(skip(self), name = "todo_add")]
    pub async fn add(&self, title: &str) -> Result<Todo> {
        let title = validate_title(title).inspect_err(|_| {
            TodoMetrics::record_validation_failure();
            tracing::debug!("Rejected blank title");
        })?;

        let todo = Todo::new(TodoId::new(self.ids.next_id()), title, self.clock.now());

        let started = Instant::now();
        observe("add", started, self.backend.insert(&todo).await)?;

        TodoMetrics::record_created();
        tracing::info!(todo_id = %todo.id, "Todo created");

        Ok(todo)
    }

    /// Read one record. Missing and malformed records both read as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if the backend fails.
    pub async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        let started = Instant::now();
        observe("get", started, self.backend.get(id).await)
    }

    /// Every todo in display order, newest first.
    ///
    /// Index entries whose record is missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if the backend fails.
    #[tracing::instrument(skip(self), name = "todo_list_all")]
    pub async fn list_all(&self) -> Result<Vec<Todo>> {
        let started = Instant::now();
        let result = self.resolve_all().await;
        observe("list_all", started, result)
    }

    async fn resolve_all(&self) -> Result<Vec<Todo>> {
        let ids = self.backend.list_ids().await?;
        let mut todos = Vec::with_capacity(ids.len());

        for id in ids {
            match self.backend.get(&id).await? {
                Some(todo) => todos.push(todo),
                None => tracing::warn!(todo_id = %id, "Skipping dangling index entry"),
            }
        }

        Ok(todos)
    }

    /// Overwrite an existing record.
    ///
    /// Returns `false` without writing if no record exists under the id.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if the backend fails.
    pub async fn update(&self, todo: &Todo) -> Result<bool> {
        let started = Instant::now();
        let result = self.write_if_exists(todo).await;
        observe("update", started, result)
    }

    async fn write_if_exists(&self, todo: &Todo) -> Result<bool> {
        if !self.backend.exists(&todo.id).await? {
            return Ok(false);
        }
        self.backend.put(todo).await?;
        Ok(true)
    }

    /// Flip the completion flag of a todo.
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if the record is absent, or vanished between
    ///   the read and the write.
    /// - [`TodoError::Storage`] if the backend fails.
    #[tracing::instrument(skip(self), name = "todo_toggle")]
    pub async fn toggle(&self, id: &TodoId) -> Result<Todo> {
        let mut todo = self
            .get(id)
            .await?
            .ok_or_else(|| TodoError::NotFound(id.clone()))?;

        todo.toggle();

        if !self.update(&todo).await? {
            tracing::warn!(todo_id = %id, "Todo vanished before toggle was written");
            return Err(TodoError::NotFound(id.clone()));
        }

        TodoMetrics::record_toggled();
        tracing::info!(todo_id = %id, done = todo.done, "Todo toggled");

        Ok(todo)
    }

    /// Remove a record and every index reference to it.
    ///
    /// Returns `true` if either side had something to remove.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if the backend fails.
    #[tracing::instrument(skip(self), name = "todo_delete")]
    pub async fn delete(&self, id: &TodoId) -> Result<bool> {
        let started = Instant::now();
        let purge = observe("delete", started, self.backend.purge(id).await)?;

        if purge.had_effect() {
            TodoMetrics::record_deleted();
            tracing::info!(
                todo_id = %id,
                record_removed = purge.record_removed,
                references_removed = purge.references_removed,
                "Todo deleted"
            );
        }

        Ok(purge.had_effect())
    }

    /// Delete every completed todo, one at a time, in index order.
    ///
    /// Returns how many deletions reported an effect.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if the backend fails. Deletions made
    /// before the failure stay deleted.
    #[tracing::instrument(skip(self), name = "todo_clear_completed")]
    pub async fn clear_completed(&self) -> Result<usize> {
        let started = Instant::now();
        let result = self.sweep_completed().await;
        let removed = observe("clear_completed", started, result)?;

        TodoMetrics::record_cleared(removed);
        tracing::info!(removed, "Cleared completed todos");

        Ok(removed)
    }

    async fn sweep_completed(&self) -> Result<usize> {
        let mut removed = 0;

        for id in self.backend.list_ids().await? {
            let Some(todo) = self.get(&id).await? else {
                continue;
            };
            if todo.done && self.delete(&id).await? {
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if it is not.
    pub async fn ping(&self) -> Result<()> {
        let started = Instant::now();
        observe("ping", started, self.backend.ping().await)
    }

    /// Drop every indexed todo. Development helper.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`] if the backend fails.
    pub async fn reset_all(&self) -> Result<()> {
        let started = Instant::now();
        observe("reset_all", started, self.backend.reset_all().await)?;
        tracing::warn!("All todos reset");
        Ok(())
    }
}

/// Record the duration of one operation and count it if the store failed.
fn observe<T>(operation: &'static str, started: Instant, result: Result<T>) -> Result<T> {
    TodoMetrics::record_duration(operation, started.elapsed());

    if let Err(err) = &result {
        if err.is_storage_error() {
            TodoMetrics::record_storage_error(operation);
            tracing::error!(operation, error = %err, "Todo store operation failed");
        }
    }

    result
}
