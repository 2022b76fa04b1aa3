//! Prometheus scrape endpoint.

use crate::state::AppState;
use axum::{extract::State, http::header::CONTENT_TYPE};

/// `GET /metrics` - Prometheus text exposition.
///
/// Empty when no recorder was installed for this process.
pub async fn metrics<B: Send + Sync + 'static>(
    State(state): State<AppState<B>>,
) -> ([(axum::http::HeaderName, &'static str); 1], String) {
    let body = state
        .metrics
        .as_ref()
        .map(metrics_exporter_prometheus::PrometheusHandle::render)
        .unwrap_or_default();

    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
