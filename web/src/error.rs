//! Error types for web handlers.
//!
//! [`AppError`] renders as JSON for the API routes. [`PageError`] wraps the
//! same value and renders it as an HTML page for the browser routes.

use crate::views;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use kv_todo::TodoError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState<B>>) -> Result<Json<Vec<Todo>>, AppError> {
///     Ok(Json(state.todos.list_all().await?))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not found".to_string(),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn log(&self) {
        if !self.status.is_server_error() {
            return;
        }
        if let Some(source) = &self.source {
            tracing::error!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                error = %source,
                "Internal server error"
            );
        } else {
            tracing::error!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "Internal server error"
            );
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Human-readable error message.
    error: String,
    /// Error code (for client error handling).
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorResponse {
            error: self.message,
            code: self.code,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(message) => Self::bad_request(message),
            TodoError::NotFound(_) => Self::not_found(),
            TodoError::Storage(_) | TodoError::Serialization(_) => {
                Self::internal(err.to_string()).with_source(anyhow::Error::new(err))
            }
        }
    }
}

/// An [`AppError`] rendered as an HTML error page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<TodoError> for PageError {
    fn from(err: TodoError) -> Self {
        Self(AppError::from(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.log();

        let page = views::error_page(err.status, &err.message);
        (err.status, Html(page.into_string())).into_response()
    }
}
