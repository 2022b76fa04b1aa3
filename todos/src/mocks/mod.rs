//! Mock backend implementations for testing.
//!
//! In-memory stand-ins for the Redis store, for unit and integration tests.

pub mod todo_store;

pub use todo_store::InMemoryTodoStore;
