//! HTTP interface for kv-todo.
//!
//! Two surfaces share one [`TodoService`](kv_todo::TodoService):
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Browser routes (HTML, 303 redirects)   │  ← flash messages in a signed cookie
//! │  JSON API under /api                    │  ← 400 / 404 / 500 JSON bodies
//! ├─────────────────────────────────────────┤
//! │  TodoService<B: TodoBackend>            │  ← Redis in production
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use kv_todo_web::{build_router, AppState, FlashKey};
//!
//! let state = AppState::new(service, FlashKey::new("dev-secret"), local_hostname());
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

// Re-export key types for convenience
pub use error::{AppError, PageError};
pub use extractors::{CorrelationId, Flash};
pub use flash::FlashKey;
pub use middleware::{track_request, CORRELATION_ID_HEADER};
pub use router::build_router;
pub use state::{local_hostname, AppState};

/// Result type alias for JSON handlers.
pub type WebResult<T> = Result<T, AppError>;
