//! Record store trait.

use crate::error::Result;
use crate::state::{Todo, TodoId};

/// Record store.
///
/// Maps an identifier to its serialized record. Every operation touches
/// exactly one key.
pub trait RecordStore: Send + Sync {
    /// Write a record under its identifier, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - The record cannot be encoded
    fn put(&self, todo: &Todo) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Read a record.
    ///
    /// # Returns
    ///
    /// `None` if the key does not exist or its value fails to decode.
    ///
    /// # Errors
    ///
    /// Returns error if network request fails.
    fn get(&self, id: &TodoId) -> impl std::future::Future<Output = Result<Option<Todo>>> + Send;

    /// Delete a record.
    ///
    /// # Returns
    ///
    /// `true` if a key was present and removed.
    ///
    /// # Errors
    ///
    /// Returns error if network request fails.
    fn remove(&self, id: &TodoId) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Check whether a record key exists, without decoding it.
    ///
    /// # Errors
    ///
    /// Returns error if network request fails.
    fn exists(&self, id: &TodoId) -> impl std::future::Future<Output = Result<bool>> + Send;
}
