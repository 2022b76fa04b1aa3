//! # kv-todo Core
//!
//! Dependency traits injected into the todo service.
//!
//! The service never reads the wall clock or generates identifiers on its own:
//! both come in through the environment so tests can pin them.
//!
//! ## Example
//!
//! ```
//! use kv_todo_core::environment::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
//!
//! let clock = SystemClock;
//! let ids = UuidIdGenerator;
//!
//! let _now = clock.now();
//! assert_ne!(ids.next_id(), ids.next_id());
//! ```

/// Environment module - Dependency injection traits
///
/// All external dependencies of the service that are not the key-value store
/// itself are abstracted behind these traits.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Identifier generator for newly created records.
    ///
    /// Implementations must never hand out the same identifier twice.
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh, opaque identifier.
        fn next_id(&self) -> String;
    }

    /// Random UUID v4 identifiers.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidIdGenerator;

    impl IdGenerator for UuidIdGenerator {
        fn next_id(&self) -> String {
            Uuid::new_v4().to_string()
        }
    }
}
