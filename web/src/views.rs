//! Server-rendered pages.

use axum::http::StatusCode;
use kv_todo::Todo;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Everything the index page shows.
#[derive(Debug, Clone)]
pub struct IndexView<'a> {
    /// Todos in display order
    pub todos: &'a [Todo],
    /// Host that rendered the page
    pub hostname: &'a str,
    /// One-shot message from the previous action
    pub flash: Option<&'a str>,
}

/// Render the todo list page.
#[must_use]
pub fn index_page(view: &IndexView<'_>) -> Markup {
    let remaining = view.todos.iter().filter(|t| !t.done).count();
    let completed = view.todos.len() - remaining;

    layout(
        "Todos",
        html! {
            h1 { "Todos" }

            @if let Some(message) = view.flash {
                div class="flash" role="status" { (message) }
            }

            form class="add" method="post" action="/add" {
                input type="text" name="title" placeholder="What needs doing?" autofocus;
                button type="submit" { "Add" }
            }

            @if view.todos.is_empty() {
                p class="empty" { "Nothing to do." }
            } @else {
                ul class="todos" {
                    @for todo in view.todos {
                        (todo_item(todo))
                    }
                }
            }

            div class="summary" {
                span { (remaining) " remaining" }
                @if completed > 0 {
                    form method="post" action="/clear-completed" {
                        button type="submit" { "Clear completed (" (completed) ")" }
                    }
                }
            }

            footer { "Served by " code { (view.hostname) } }
        },
    )
}

fn todo_item(todo: &Todo) -> Markup {
    html! {
        li.todo.done[todo.done] {
            form method="post" action={ "/toggle/" (todo.id) } {
                button type="submit" class="toggle" title="Toggle" {
                    @if todo.done { "☑" } @else { "☐" }
                }
            }
            span class="title" { (todo.title) }
            time datetime=(todo.created_at) { (short_timestamp(&todo.created_at)) }
            form method="post" action={ "/delete/" (todo.id) } {
                button type="submit" class="delete" title="Delete" { "✕" }
            }
        }
    }
}

/// Render a page for an error the user cannot act on.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    layout(
        "Error",
        html! {
            h1 { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
            p class="flash error" { (message) }
            p { a href="/" { "Back to the list" } }
        },
    )
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                main { (body) }
            }
        }
    }
}

// `2025-01-01T09:30:00.000000` -> `2025-01-01 09:30`
fn short_timestamp(created_at: &str) -> String {
    created_at
        .get(..16)
        .map_or_else(|| created_at.to_string(), |s| s.replacen('T', " ", 1))
}

const STYLES: &str = r"
body { font-family: system-ui, sans-serif; background: #f5f5f5; margin: 0; }
main { max-width: 36rem; margin: 2rem auto; background: #fff; padding: 1.5rem; border-radius: 8px; }
form { display: inline; }
.add { display: flex; gap: .5rem; margin-bottom: 1rem; }
.add input { flex: 1; padding: .5rem; }
.flash { background: #fff3cd; border: 1px solid #ffe69c; padding: .5rem; margin-bottom: 1rem; }
.flash.error { background: #f8d7da; border-color: #f1aeb5; }
.todos { list-style: none; padding: 0; }
.todo { display: flex; align-items: center; gap: .5rem; padding: .25rem 0; border-bottom: 1px solid #eee; }
.todo .title { flex: 1; }
.todo.done .title { text-decoration: line-through; color: #888; }
.todo time { color: #999; font-size: .8rem; }
button { cursor: pointer; }
.summary { display: flex; justify-content: space-between; margin-top: 1rem; color: #666; }
footer { margin-top: 1.5rem; font-size: .8rem; color: #999; }
";

#[cfg(test)]
mod tests {
    use super::*;
    use kv_todo::TodoId;

    fn todo(id: &str, title: &str, done: bool) -> Todo {
        Todo {
            id: TodoId::from(id),
            title: title.to_string(),
            done,
            created_at: "2025-01-01T09:30:00.000000".to_string(),
        }
    }

    #[test]
    fn test_index_lists_todos_and_footer() {
        let todos = vec![todo("b", "Walk dog", true), todo("a", "Buy milk", false)];
        let html = index_page(&IndexView {
            todos: &todos,
            hostname: "box-1",
            flash: Some("Removed 1 completed todo(s)."),
        })
        .into_string();

        assert!(html.contains("Walk dog"));
        assert!(html.contains("Buy milk"));
        assert!(html.contains(r#"action="/toggle/a""#));
        assert!(html.contains(r#"action="/delete/b""#));
        assert!(html.contains("Removed 1 completed todo(s)."));
        assert!(html.contains("box-1"));
        assert!(html.contains("1 remaining"));
        assert!(html.contains("2025-01-01 09:30"));
    }

    #[test]
    fn test_index_escapes_titles() {
        let todos = vec![todo("x", "<script>alert(1)</script>", false)];
        let html = index_page(&IndexView {
            todos: &todos,
            hostname: "h",
            flash: None,
        })
        .into_string();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_index() {
        let html = index_page(&IndexView {
            todos: &[],
            hostname: "h",
            flash: None,
        })
        .into_string();

        assert!(html.contains("Nothing to do."));
        assert!(!html.contains("Clear completed"));
    }

    #[test]
    fn test_error_page_shows_status() {
        let html = error_page(StatusCode::INTERNAL_SERVER_ERROR, "Storage error: down").into_string();
        assert!(html.contains("500 Internal Server Error"));
        assert!(html.contains("Storage error: down"));
    }
}
