//! Application state shared across all HTTP handlers.

use crate::flash::FlashKey;
use axum::extract::FromRef;
use kv_todo::TodoService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply, via `Arc`) for each request.
pub struct AppState<B> {
    /// Todo service over the connected backend
    pub todos: Arc<TodoService<B>>,

    /// Secret for signing flash cookies
    pub flash_key: FlashKey,

    /// Host name shown in the page footer
    pub hostname: Arc<str>,

    /// Prometheus handle, if a recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl<B> AppState<B> {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// - `todos`: Service used by every route
    /// - `flash_key`: Secret for signing flash cookies
    /// - `hostname`: Host name to display
    #[must_use]
    pub fn new(todos: TodoService<B>, flash_key: FlashKey, hostname: impl Into<Arc<str>>) -> Self {
        Self {
            todos: Arc::new(todos),
            flash_key,
            hostname: hostname.into(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            todos: Arc::clone(&self.todos),
            flash_key: self.flash_key.clone(),
            hostname: Arc::clone(&self.hostname),
            metrics: self.metrics.clone(),
        }
    }
}

// Lets the `Flash` extractor reach the signing key
impl<B> FromRef<AppState<B>> for FlashKey {
    fn from_ref(state: &AppState<B>) -> Self {
        state.flash_key.clone()
    }
}

/// This machine's host name, or `"unknown"` if it cannot be read.
#[must_use]
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
