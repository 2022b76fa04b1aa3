//! # kv-todo
//!
//! Todo records and their display order mapped onto key-value primitives.
//!
//! ## Layout
//!
//! | Key | Type | Content |
//! |---|---|---|
//! | `TODOS_ORDER` | list | ids, newest first |
//! | `TODO:<id>` | string | JSON `{id, title, done, created_at}` |
//!
//! The record store and the order index are separate structures joined only
//! by identifier. The service keeps them in step: records are written before
//! they are indexed and removed before they are unindexed, or both in one
//! atomic batch where the backend allows it.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kv_todo::{mocks::InMemoryTodoStore, TodoService};
//! use kv_todo_core::environment::{SystemClock, UuidIdGenerator};
//!
//! # tokio_test::block_on(async {
//! let service = TodoService::new(
//!     InMemoryTodoStore::new(),
//!     Arc::new(SystemClock),
//!     Arc::new(UuidIdGenerator),
//! );
//!
//! let a = service.add("Buy milk").await?;
//! let b = service.add("Walk dog").await?;
//!
//! let titles: Vec<_> = service.list_all().await?.into_iter().map(|t| t.title).collect();
//! assert_eq!(titles, ["Walk dog", "Buy milk"]);
//!
//! service.toggle(&a.id).await?;
//! assert_eq!(service.clear_completed().await?, 1);
//! assert!(service.get(&a.id).await?.is_none());
//! assert!(service.get(&b.id).await?.is_some());
//! # Ok::<(), kv_todo::TodoError>(())
//! # }).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod providers;
pub mod service;
pub mod state;
pub mod stores;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use config::StoreConfig;
pub use error::{Result, TodoError};
pub use providers::{OrderIndex, Purge, RecordStore, TodoBackend};
pub use service::TodoService;
pub use state::{Todo, TodoId};
pub use stores::RedisTodoStore;
