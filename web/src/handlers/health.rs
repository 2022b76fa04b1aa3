//! Health check endpoint.
//!
//! Used by load balancers and monitoring systems to verify the service can
//! reach its backing store.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use kv_todo::TodoBackend;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"error"`
    pub status: &'static str,
    /// Whether the store answered a ping
    pub redis: bool,
    /// Failure detail, when the store did not answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Readiness check against the store.
///
/// # Status Codes
///
/// - 200 OK: store reachable
/// - 500 Internal Server Error: store unreachable
///
/// # Example
///
/// ```bash
/// curl http://localhost:5005/health
/// # {"status":"ok","redis":true}
/// ```
pub async fn health_check<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.todos.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                redis: true,
                error: None,
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    redis: false,
                    error: Some(err.to_string()),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::FlashKey;
    use kv_todo::{mocks::InMemoryTodoStore, TodoService};
    use kv_todo_core::environment::{SystemClock, UuidIdGenerator};
    use std::sync::Arc;

    fn state() -> AppState<InMemoryTodoStore> {
        let service = TodoService::new(
            InMemoryTodoStore::new(),
            Arc::new(SystemClock),
            Arc::new(UuidIdGenerator),
        );
        AppState::new(service, FlashKey::new("dev-secret"), "test-host")
    }

    #[tokio::test]
    async fn test_health_ok() {
        let (status, Json(body)) = health_check(State(state())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert!(body.redis);
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_store() {
        let state = state();
        state.todos.backend().set_unavailable(true);

        let (status, Json(body)) = health_check(State(state)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "error");
        assert!(!body.redis);
        assert!(body.error.is_some());
    }
}
