//! Integration tests for the todo service against the in-memory backend.

#![allow(clippy::unwrap_used)]

use kv_todo::{
    mocks::InMemoryTodoStore, OrderIndex, RecordStore, Result, Todo, TodoBackend, TodoError,
    TodoId, TodoService,
};
use kv_todo_testing::{init_test_tracing, test_clock, SequentialIdGenerator};
use proptest::prelude::*;
use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Create a service over a fresh in-memory store.
fn create_service() -> TodoService<InMemoryTodoStore> {
    init_test_tracing();
    TodoService::new(
        InMemoryTodoStore::new(),
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::new()),
    )
}

fn titles(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|t| t.title.as_str()).collect()
}

// ═══════════════════════════════════════════════════════════
// Add
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn test_add_then_get_and_list() {
    let service = create_service();

    let created = service.add("Buy milk").await.unwrap();

    let fetched = service.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "Buy milk");
    assert!(!fetched.done);

    assert_eq!(service.list_all().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn test_add_generates_unique_ids() {
    let service = create_service();
    let mut seen = HashSet::new();

    for i in 0..20 {
        let todo = service.add(&format!("Todo {i}")).await.unwrap();
        assert!(seen.insert(todo.id), "identifier reused");
    }
}

#[tokio::test]
async fn test_add_rejects_blank_titles_without_writing() {
    let service = create_service();

    for blank in ["", "   ", "\t\n"] {
        let result = service.add(blank).await;
        assert!(matches!(result, Err(TodoError::Validation(_))));
    }

    assert_eq!(service.backend().record_count().unwrap(), 0);
    assert!(service.backend().order_snapshot().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let service = create_service();

    service.add("A").await.unwrap();
    service.add("B").await.unwrap();

    let todos = service.list_all().await.unwrap();
    assert_eq!(titles(&todos), ["B", "A"]);
}

// ═══════════════════════════════════════════════════════════
// Toggle
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn test_toggle_twice_restores_flag() {
    let service = create_service();
    let todo = service.add("Walk dog").await.unwrap();

    let once = service.toggle(&todo.id).await.unwrap();
    let twice = service.toggle(&todo.id).await.unwrap();

    assert!(once.done);
    assert_eq!(twice, todo);
    assert_eq!(service.get(&todo.id).await.unwrap().unwrap(), todo);
}

#[tokio::test]
async fn test_toggle_missing_is_not_found_and_changes_nothing() {
    let service = create_service();
    service.add("Existing").await.unwrap();
    let before = service.list_all().await.unwrap();

    let missing = TodoId::from("missing");
    let result = service.toggle(&missing).await;

    assert_eq!(result, Err(TodoError::NotFound(missing.clone())));
    assert_eq!(service.list_all().await.unwrap(), before);
    assert!(!service.backend().exists(&missing).await.unwrap());
    assert_eq!(service.backend().record_count().unwrap(), 1);
}

// ═══════════════════════════════════════════════════════════
// Delete
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn test_delete_removes_record_and_index_entry() {
    let service = create_service();
    let keep = service.add("Keep").await.unwrap();
    let gone = service.add("Gone").await.unwrap();

    assert!(service.delete(&gone.id).await.unwrap());

    assert!(service.get(&gone.id).await.unwrap().is_none());
    assert_eq!(service.list_all().await.unwrap(), vec![keep.clone()]);
    assert_eq!(service.backend().order_snapshot().unwrap(), vec![keep.id]);
}

#[tokio::test]
async fn test_delete_missing_returns_false() {
    let service = create_service();
    service.add("Existing").await.unwrap();

    assert!(!service.delete(&TodoId::from("missing")).await.unwrap());

    assert_eq!(service.backend().record_count().unwrap(), 1);
    assert_eq!(service.backend().order_snapshot().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_orphan_record_reports_success() {
    let service = create_service();
    let orphan = Todo {
        id: TodoId::from("orphan"),
        title: "Never indexed".to_string(),
        done: false,
        created_at: "2025-01-01T00:00:00.000000".to_string(),
    };
    service.backend().put(&orphan).await.unwrap();

    assert!(service.list_all().await.unwrap().is_empty());
    assert!(service.delete(&orphan.id).await.unwrap());
    assert_eq!(service.backend().record_count().unwrap(), 0);
}

#[tokio::test]
async fn test_delete_dangling_reference_reports_success() {
    let service = create_service();
    let dangling = TodoId::from("dangling");
    service.backend().prepend(&dangling).await.unwrap();

    assert!(service.list_all().await.unwrap().is_empty());
    assert!(service.delete(&dangling).await.unwrap());
    assert!(service.backend().order_snapshot().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_removes_duplicate_index_entries() {
    let service = create_service();
    let todo = service.add("Duplicated").await.unwrap();
    service.backend().prepend(&todo.id).await.unwrap();
    assert_eq!(service.list_all().await.unwrap().len(), 2);

    assert!(service.delete(&todo.id).await.unwrap());

    assert!(service.backend().order_snapshot().unwrap().is_empty());
    assert!(service.list_all().await.unwrap().is_empty());
}

// ═══════════════════════════════════════════════════════════
// Clear completed
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn test_clear_completed_removes_only_done() {
    let service = create_service();
    let a = service.add("A").await.unwrap();
    let b = service.add("B").await.unwrap();
    let c = service.add("C").await.unwrap();

    service.toggle(&a.id).await.unwrap();
    service.toggle(&c.id).await.unwrap();

    assert_eq!(service.clear_completed().await.unwrap(), 2);
    assert_eq!(service.list_all().await.unwrap(), vec![b]);
}

#[tokio::test]
async fn test_clear_completed_twice_returns_zero() {
    let service = create_service();
    let a = service.add("A").await.unwrap();
    service.add("B").await.unwrap();
    service.toggle(&a.id).await.unwrap();

    assert_eq!(service.clear_completed().await.unwrap(), 1);
    assert_eq!(service.clear_completed().await.unwrap(), 0);
}

#[tokio::test]
async fn test_clear_completed_skips_dangling_and_malformed() {
    let service = create_service();
    let done = service.add("Done").await.unwrap();
    service.toggle(&done.id).await.unwrap();

    let dangling = TodoId::from("dangling");
    service.backend().prepend(&dangling).await.unwrap();

    let garbage = TodoId::from("garbage");
    service.backend().put_raw(&garbage, "not json at all").unwrap();
    service.backend().prepend(&garbage).await.unwrap();

    assert_eq!(service.clear_completed().await.unwrap(), 1);
    assert_eq!(
        service.backend().order_snapshot().unwrap(),
        vec![garbage, dangling]
    );
}

// ═══════════════════════════════════════════════════════════
// Tolerated inconsistency
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn test_list_skips_dangling_reference() {
    let service = create_service();
    let a = service.add("A").await.unwrap();
    service.backend().prepend(&TodoId::from("dangling")).await.unwrap();
    let b = service.add("B").await.unwrap();

    assert_eq!(service.list_all().await.unwrap(), vec![b, a]);
}

#[tokio::test]
async fn test_orphan_record_is_invisible() {
    let service = create_service();
    service.backend().put_raw(&TodoId::from("orphan"), "{}").unwrap();

    assert!(service.list_all().await.unwrap().is_empty());
    assert_eq!(service.backend().record_count().unwrap(), 1);
}

// ═══════════════════════════════════════════════════════════
// Storage failure
// ═══════════════════════════════════════════════════════════

#[tokio::test]
async fn test_storage_failure_propagates() {
    let service = create_service();
    let todo = service.add("A").await.unwrap();
    service.backend().set_unavailable(true);

    assert!(matches!(service.add("B").await, Err(TodoError::Storage(_))));
    assert!(matches!(service.list_all().await, Err(TodoError::Storage(_))));
    assert!(matches!(service.toggle(&todo.id).await, Err(TodoError::Storage(_))));
    assert!(matches!(service.delete(&todo.id).await, Err(TodoError::Storage(_))));
    assert!(matches!(service.clear_completed().await, Err(TodoError::Storage(_))));

    service.backend().set_unavailable(false);
    assert_eq!(service.list_all().await.unwrap(), vec![todo]);
}

#[tokio::test]
async fn test_blank_title_is_rejected_before_store_is_touched() {
    let service = create_service();
    service.backend().set_unavailable(true);

    assert!(matches!(service.add("  ").await, Err(TodoError::Validation(_))));
}

// ═══════════════════════════════════════════════════════════
// Partial writes and races
// ═══════════════════════════════════════════════════════════

/// In-memory backend with two injectable faults: `prepend` failing on its
/// own, and a record being deleted by someone else right before `exists`.
/// Keeps the default step-by-step `insert`/`purge`.
#[derive(Default)]
struct FaultyBackend {
    inner: InMemoryTodoStore,
    fail_prepend: AtomicBool,
    vanish_before_exists: AtomicBool,
    puts: AtomicUsize,
}

impl RecordStore for FaultyBackend {
    fn put(&self, todo: &Todo) -> impl Future<Output = Result<()>> + Send {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(todo)
    }

    fn get(&self, id: &TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        self.inner.get(id)
    }

    fn remove(&self, id: &TodoId) -> impl Future<Output = Result<bool>> + Send {
        self.inner.remove(id)
    }

    fn exists(&self, id: &TodoId) -> impl Future<Output = Result<bool>> + Send {
        async move {
            if self.vanish_before_exists.load(Ordering::SeqCst) {
                self.inner.remove(id).await?;
            }
            self.inner.exists(id).await
        }
    }
}

impl OrderIndex for FaultyBackend {
    fn prepend(&self, id: &TodoId) -> impl Future<Output = Result<()>> + Send {
        async move {
            if self.fail_prepend.load(Ordering::SeqCst) {
                return Err(TodoError::Storage("LPUSH failed (simulated)".to_string()));
            }
            self.inner.prepend(id).await
        }
    }

    fn list_ids(&self) -> impl Future<Output = Result<Vec<TodoId>>> + Send {
        self.inner.list_ids()
    }

    fn remove_all_occurrences(&self, id: &TodoId) -> impl Future<Output = Result<usize>> + Send {
        self.inner.remove_all_occurrences(id)
    }
}

impl TodoBackend for FaultyBackend {
    fn ping(&self) -> impl Future<Output = Result<()>> + Send {
        self.inner.ping()
    }
}

fn create_faulty_service() -> TodoService<FaultyBackend> {
    init_test_tracing();
    TodoService::new(
        FaultyBackend::default(),
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::new()),
    )
}

#[tokio::test]
async fn test_failed_index_write_leaves_invisible_orphan() {
    let service = create_faulty_service();
    service.backend().fail_prepend.store(true, Ordering::SeqCst);

    let result = service.add("Half written").await;

    assert!(matches!(result, Err(TodoError::Storage(_))));
    let inner = &service.backend().inner;
    assert_eq!(inner.record_count().unwrap(), 1);
    assert!(inner.exists(&TodoId::from("todo-1")).await.unwrap());
    assert!(inner.order_snapshot().unwrap().is_empty());
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_does_not_resurrect_vanished_record() {
    let service = create_faulty_service();
    let todo = service.add("Short lived").await.unwrap();
    let puts_after_add = service.backend().puts.load(Ordering::SeqCst);
    service.backend().vanish_before_exists.store(true, Ordering::SeqCst);

    let result = service.toggle(&todo.id).await;

    assert!(matches!(result, Err(TodoError::NotFound(id)) if id == todo.id));
    assert_eq!(service.backend().puts.load(Ordering::SeqCst), puts_after_add);
    assert_eq!(service.backend().inner.record_count().unwrap(), 0);
    assert!(service.get(&todo.id).await.unwrap().is_none());
    assert!(service.list_all().await.unwrap().is_empty());
}

// ═══════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_add_stores_trimmed_title(title in "[ \t]{0,3}[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}[ \t]{0,3}") {
        let service = create_service();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let todo = runtime.block_on(service.add(&title)).unwrap();
        let listed = runtime.block_on(service.list_all()).unwrap();

        prop_assert_eq!(todo.title.as_str(), title.trim());
        prop_assert!(!todo.done);
        prop_assert_eq!(listed, vec![todo]);
    }

    #[test]
    fn prop_clear_completed_removes_exactly_toggled(flags in proptest::collection::vec(any::<bool>(), 0..12)) {
        let service = create_service();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let remaining = runtime.block_on(async {
            for (i, done) in flags.iter().enumerate() {
                let todo = service.add(&format!("Todo {i}")).await.unwrap();
                if *done {
                    service.toggle(&todo.id).await.unwrap();
                }
            }

            let removed = service.clear_completed().await.unwrap();
            assert_eq!(removed, flags.iter().filter(|d| **d).count());
            service.list_all().await.unwrap()
        });

        prop_assert_eq!(remaining.len(), flags.iter().filter(|d| !**d).count());
        prop_assert!(remaining.iter().all(|t| !t.done));
    }
}
