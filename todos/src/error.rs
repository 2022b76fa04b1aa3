//! Error types for todo storage and service operations.

use crate::state::TodoId;
use thiserror::Error;

/// Result type alias for todo operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error taxonomy for the todo service.
///
/// Orphan records and dangling index references are deliberately absent:
/// they are tolerated states, not failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    // ═══════════════════════════════════════════════════════════
    // Caller Errors
    // ═══════════════════════════════════════════════════════════

    /// Input rejected before anything was written (blank title).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The targeted todo does not exist.
    #[error("Todo {0} not found")]
    NotFound(TodoId),

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Backing store unreachable or a command failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TodoError {
    /// Returns `true` if this error is due to caller input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kv_todo::TodoError;
    /// assert!(TodoError::Validation("blank".into()).is_user_error());
    /// assert!(!TodoError::Storage("down".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }

    /// Returns `true` if the backing store (or encoding for it) failed.
    #[must_use]
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Serialization(_))
    }
}
