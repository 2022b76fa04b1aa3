//! Prometheus metrics for the todo service.
//!
//! Counters for each mutation and a latency histogram per store operation.
//! Without an installed recorder every macro call is a no-op.
//!
//! # Example
//!
//! ```rust,no_run
//! use kv_todo::metrics::install_recorder;
//!
//! let handle = install_recorder().ok().flatten();
//! if let Some(handle) = handle {
//!     println!("{}", handle.render());
//! }
//! ```

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

/// Errors from metrics setup.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Install the Prometheus recorder and register metric descriptions.
///
/// Returns `Ok(None)` when a recorder is already installed (tests, or a
/// second call); metrics keep flowing to the first recorder.
///
/// # Errors
///
/// Returns error if the exporter cannot be built or installed for any other
/// reason.
pub fn install_recorder() -> Result<Option<PrometheusHandle>, MetricsError> {
    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?;

    match builder.install_recorder() {
        Ok(handle) => {
            register_metrics();
            tracing::info!("Prometheus metrics recorder installed");
            Ok(Some(handle))
        }
        Err(e) => {
            let err_msg = e.to_string();
            if err_msg.contains("already initialized") {
                tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                Ok(None)
            } else {
                Err(MetricsError::Install(err_msg))
            }
        }
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!("todos_created_total", "Total number of todos created");
    describe_counter!("todos_toggled_total", "Total number of completion toggles");
    describe_counter!("todos_deleted_total", "Total number of todos deleted");
    describe_counter!(
        "todos_cleared_total",
        "Total number of completed todos removed by clear-completed"
    );
    describe_counter!(
        "todo_validation_failures_total",
        "Total number of rejected titles"
    );
    describe_counter!(
        "todo_storage_errors_total",
        "Total number of failed store operations"
    );
    describe_histogram!(
        "todo_store_operation_duration_seconds",
        "Time taken by each service operation against the store"
    );
}

/// Service metrics recorder.
pub struct TodoMetrics;

impl TodoMetrics {
    /// Record a created todo.
    pub fn record_created() {
        counter!("todos_created_total").increment(1);
    }

    /// Record a completion toggle.
    pub fn record_toggled() {
        counter!("todos_toggled_total").increment(1);
    }

    /// Record a delete that had an effect.
    pub fn record_deleted() {
        counter!("todos_deleted_total").increment(1);
    }

    /// Record a clear-completed sweep.
    pub fn record_cleared(count: usize) {
        counter!("todos_cleared_total").increment(count as u64);
    }

    /// Record a rejected title.
    pub fn record_validation_failure() {
        counter!("todo_validation_failures_total").increment(1);
    }

    /// Record a failed store operation.
    pub fn record_storage_error(operation: &'static str) {
        counter!("todo_storage_errors_total", "operation" => operation).increment(1);
    }

    /// Record how long an operation took.
    pub fn record_duration(operation: &'static str, duration: Duration) {
        histogram!("todo_store_operation_duration_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }
}
