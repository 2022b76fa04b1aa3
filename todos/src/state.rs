//! Domain types for todo records.

use crate::error::{Result, TodoError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout for `created_at`: naive UTC ISO-8601 with microseconds.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Unique identifier for a todo record.
///
/// Opaque: whatever string the id generator produced, or whatever string a
/// caller sent in a URL path. No format is enforced on lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wrap an identifier string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo record.
///
/// Field names are the persisted schema; see [`crate::codec`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Trimmed, non-empty title
    pub title: String,
    /// Whether the todo is completed
    pub done: bool,
    /// Creation time, ISO-8601; never rewritten
    pub created_at: String,
}

impl Todo {
    /// Creates a new, not-yet-completed todo.
    ///
    /// The title is expected to have passed [`validate_title`] already.
    #[must_use]
    pub fn new(id: TodoId, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            done: false,
            created_at: format_created_at(created_at),
        }
    }

    /// Flips the completion flag. Nothing else changes.
    pub const fn toggle(&mut self) {
        self.done = !self.done;
    }
}

/// Trim a raw title and reject it if nothing is left.
///
/// # Errors
///
/// Returns [`TodoError::Validation`] for empty or whitespace-only input.
pub fn validate_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TodoError::Validation("title is required".to_string()));
    }
    Ok(title.to_string())
}

/// Render a creation timestamp in the persisted layout.
#[must_use]
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.format(CREATED_AT_FORMAT).to_string()
}
