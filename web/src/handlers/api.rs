//! JSON API endpoints.
//!
//! - GET    /api/todos                  - list todos, newest first
//! - POST   /api/todos                  - create a todo
//! - POST   /api/todos/:id/toggle       - flip completion
//! - DELETE /api/todos/:id              - delete a todo
//! - POST   /api/todos/clear-completed  - delete every completed todo

use crate::error::AppError;
use crate::state::AppState;
use crate::WebResult;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kv_todo::{Todo, TodoBackend, TodoId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to create a todo.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// Title; trimmed before use
    #[serde(default)]
    pub title: Option<String>,
}

/// Response after deleting a todo.
#[derive(Debug, Serialize)]
pub struct DeleteTodoResponse {
    /// Always `true`
    pub ok: bool,
}

/// Response after clearing completed todos.
#[derive(Debug, Serialize)]
pub struct ClearCompletedResponse {
    /// How many todos were removed
    pub removed: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// List todos in display order.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_todos<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
) -> WebResult<Json<Vec<Todo>>> {
    Ok(Json(state.todos.list_all().await?))
}

/// Create a todo.
///
/// The body is parsed leniently: a missing body, a body that is not JSON,
/// and a missing or blank title all answer 400.
///
/// # Errors
///
/// - 400 if no usable title was sent
/// - 500 if the store fails
pub async fn create_todo<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
    body: Bytes,
) -> WebResult<(StatusCode, Json<Todo>)> {
    let title = serde_json::from_slice::<CreateTodoRequest>(&body)
        .ok()
        .and_then(|req| req.title)
        .unwrap_or_default();

    let todo = state.todos.add(&title).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Flip a todo's completion flag.
///
/// # Errors
///
/// - 404 if the todo does not exist
/// - 500 if the store fails
pub async fn toggle_todo<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> WebResult<Json<Todo>> {
    Ok(Json(state.todos.toggle(&TodoId::new(id)).await?))
}

/// Delete a todo.
///
/// # Errors
///
/// - 404 if neither a record nor an index entry existed
/// - 500 if the store fails
pub async fn delete_todo<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> WebResult<Json<DeleteTodoResponse>> {
    if state.todos.delete(&TodoId::new(id)).await? {
        Ok(Json(DeleteTodoResponse { ok: true }))
    } else {
        Err(AppError::not_found())
    }
}

/// Delete every completed todo.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn clear_completed<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
) -> WebResult<Json<ClearCompletedResponse>> {
    let removed = state.todos.clear_completed().await?;
    Ok(Json(ClearCompletedResponse { removed }))
}
