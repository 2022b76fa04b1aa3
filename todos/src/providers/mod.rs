//! Storage providers.
//!
//! This module defines the traits the todo service is written against.
//! They make the service testable against an in-memory backend and let the
//! Redis backend batch multi-key steps.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   weak refs by id   ┌──────────────────┐
//! │ OrderIndex       │ ──────────────────▶ │ RecordStore      │
//! │ TODOS_ORDER list │                     │ TODO:<id> string │
//! └────────┬─────────┘                     └────────┬─────────┘
//!          └──────────────┬─────────────────────────┘
//!                         ▼
//!                ┌──────────────────┐
//!                │ TodoBackend      │  insert / purge as one unit
//!                └──────────────────┘
//! ```
//!
//! An id in the index whose record is missing is a *dangling reference*; a
//! record no id in the index points to is an *orphan record*. Both are
//! tolerated, never reported as errors.

pub mod backend;
pub mod order_index;
pub mod record_store;

pub use backend::{Purge, TodoBackend};
pub use order_index::OrderIndex;
pub use record_store::RecordStore;
