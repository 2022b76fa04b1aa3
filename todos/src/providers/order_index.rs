//! Order index trait.

use crate::error::Result;
use crate::state::TodoId;

/// Display order of identifiers, newest first.
///
/// Holds references only. Removing an id here does not delete the record and
/// deleting a record does not touch the index.
pub trait OrderIndex: Send + Sync {
    /// Insert an identifier at the head.
    ///
    /// Not idempotent: callers only prepend freshly created identifiers.
    ///
    /// # Errors
    ///
    /// Returns error if network request fails.
    fn prepend(&self, id: &TodoId) -> impl std::future::Future<Output = Result<()>> + Send;

    /// All identifiers, head to tail.
    ///
    /// # Errors
    ///
    /// Returns error if network request fails.
    fn list_ids(&self) -> impl std::future::Future<Output = Result<Vec<TodoId>>> + Send;

    /// Remove every occurrence of an identifier.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns error if network request fails.
    fn remove_all_occurrences(
        &self,
        id: &TodoId,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
