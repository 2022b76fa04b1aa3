//! Browser routes.
//!
//! Every action answers with `303 See Other` back to `/`. Problems the user
//! can act on travel as a flash message; store failures render an error page.

use crate::error::PageError;
use crate::extractors::{CorrelationId, Flash};
use crate::flash::{
    append_set_cookie_header, clear_flash_cookie, redirect_home, redirect_home_with_flash,
};
use crate::state::AppState;
use crate::views::{index_page, IndexView};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use kv_todo::{TodoBackend, TodoError, TodoId};
use serde::Deserialize;

/// Form body of `POST /add`.
#[derive(Debug, Default, Deserialize)]
pub struct AddTodoForm {
    /// Raw title as typed
    #[serde(default)]
    pub title: String,
}

/// `GET /` - the todo list, plus any pending flash message.
///
/// # Errors
///
/// Renders an error page if the store fails.
pub async fn index<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
    correlation_id: CorrelationId,
    flash: Flash,
) -> Result<Response, PageError> {
    let todos = state.todos.list_all().await?;
    tracing::debug!(
        correlation_id = %correlation_id.0,
        count = todos.len(),
        "Rendering index"
    );

    let page = index_page(&IndexView {
        todos: &todos,
        hostname: &state.hostname,
        flash: flash.message.as_deref(),
    });

    let mut response = Html(page.into_string()).into_response();
    if flash.cookie_present {
        append_set_cookie_header(&mut response, &clear_flash_cookie());
    }

    Ok(response)
}

/// `POST /add` - create a todo from the form title.
///
/// # Errors
///
/// Renders an error page if the store fails.
pub async fn add_todo<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
    Form(form): Form<AddTodoForm>,
) -> Result<Response, PageError> {
    match state.todos.add(&form.title).await {
        Ok(_) => Ok(redirect_home()),
        Err(TodoError::Validation(_)) => Ok(redirect_home_with_flash(
            &state.flash_key,
            "Please enter a todo title.",
        )),
        Err(err) => Err(err.into()),
    }
}

/// `POST /toggle/:id` - flip a todo's completion flag.
///
/// # Errors
///
/// Renders an error page if the store fails.
pub async fn toggle_todo<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    match state.todos.toggle(&TodoId::new(id)).await {
        Ok(_) => Ok(redirect_home()),
        Err(TodoError::NotFound(_)) => Ok(redirect_home_with_flash(
            &state.flash_key,
            "Todo not found.",
        )),
        Err(err) => Err(err.into()),
    }
}

/// `POST /delete/:id` - remove a todo.
///
/// # Errors
///
/// Renders an error page if the store fails.
pub async fn delete_todo<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    if state.todos.delete(&TodoId::new(id)).await? {
        Ok(redirect_home())
    } else {
        Ok(redirect_home_with_flash(
            &state.flash_key,
            "Todo not found or could not be deleted.",
        ))
    }
}

/// `POST /clear-completed` - remove every completed todo.
///
/// # Errors
///
/// Renders an error page if the store fails.
pub async fn clear_completed<B: TodoBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Response, PageError> {
    let removed = state.todos.clear_completed().await?;
    Ok(redirect_home_with_flash(
        &state.flash_key,
        &format!("Removed {removed} completed todo(s)."),
    ))
}
