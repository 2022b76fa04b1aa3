//! Record encoding for the Record Store.
//!
//! Records are stored as JSON objects with exactly these fields:
//!
//! ```json
//! {"id": "…", "title": "…", "done": false, "created_at": "2025-01-01T00:00:00.000000"}
//! ```
//!
//! Decoding never fails loudly: anything that does not match the schema reads
//! as an absent record.

use crate::error::{Result, TodoError};
use crate::state::Todo;

/// Serialize a record for storage.
///
/// # Errors
///
/// Returns [`TodoError::Serialization`] if `serde_json` rejects the value.
pub fn encode(todo: &Todo) -> Result<String> {
    serde_json::to_string(todo).map_err(|e| TodoError::Serialization(e.to_string()))
}

/// Deserialize a stored record, or `None` if the value does not match the schema.
#[must_use]
pub fn decode(raw: &str) -> Option<Todo> {
    match serde_json::from_str::<Todo>(raw) {
        Ok(todo) => Some(todo),
        Err(e) => {
            tracing::warn!(error = %e, "Stored todo failed to decode, treating as absent");
            None
        }
    }
}
