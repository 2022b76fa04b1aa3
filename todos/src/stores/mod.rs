//! Storage implementations for todos.
//!
//! - **Todo Store** (Redis) - records as JSON strings plus one ordered id list

pub mod todo_redis;

// Re-exports
pub use todo_redis::RedisTodoStore;
