//! # kv-todo Testing
//!
//! Testing utilities and helpers for kv-todo.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - A tracing subscriber helper for noisy test debugging
//!
//! ## Example
//!
//! ```ignore
//! use kv_todo::{mocks::InMemoryTodoStore, TodoService};
//! use kv_todo_testing::{test_clock, SequentialIdGenerator};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_add() {
//!     let service = TodoService::new(
//!         InMemoryTodoStore::new(),
//!         Arc::new(test_clock()),
//!         Arc::new(SequentialIdGenerator::new()),
//!     );
//!
//!     let todo = service.add("Buy milk").await.unwrap();
//!     assert_eq!(todo.id.as_str(), "todo-1");
//! }
//! ```

use chrono::{DateTime, Utc};
use kv_todo_core::environment::{Clock, IdGenerator};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use kv_todo_testing::mocks::FixedClock;
    /// use kv_todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: `todo-1`, `todo-2`, ...
    ///
    /// Backed by an atomic counter, so one generator can be shared behind an `Arc`.
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `todo-1`.
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            format!("todo-{n}")
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness.
    ///
    /// Safe to call from every test; only the first call installs anything.
    /// Honors `RUST_LOG`, defaulting to `debug` for the kv-todo crates.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "kv_todo=debug,kv_todo_web=debug".into());

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(), "todo-1");
        assert_eq!(ids.next_id(), "todo-2");
        assert_eq!(ids.next_id(), "todo-3");
    }

    #[test]
    fn test_tracing_init_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
    }
}
