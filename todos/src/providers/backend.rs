//! Batched operations spanning the record store and the order index.

use super::{OrderIndex, RecordStore};
use crate::error::Result;
use crate::state::{Todo, TodoId};

/// Outcome of removing an identifier from both the record store and the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Purge {
    /// A record key existed and was deleted.
    pub record_removed: bool,
    /// How many index entries referenced the identifier.
    pub references_removed: usize,
}

impl Purge {
    /// Whether either side had anything to remove.
    ///
    /// Inclusive on purpose: an orphan record (no index entry) and a dangling
    /// reference (no record) both count as a successful delete.
    #[must_use]
    pub const fn had_effect(&self) -> bool {
        self.record_removed || self.references_removed > 0
    }
}

/// A store holding both records and their display order.
///
/// The provided methods run their steps one command at a time, always writing
/// the record before the index and removing the record before the index
/// entries. A crash part-way through `insert` therefore leaves an orphan
/// record (invisible) rather than a dangling reference. Backends that can run
/// the steps as one atomic batch override them.
pub trait TodoBackend: RecordStore + OrderIndex {
    /// Store a new record and reference it at the head of the index.
    ///
    /// # Errors
    ///
    /// Returns error if any step fails. Earlier steps are not rolled back.
    fn insert(&self, todo: &Todo) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            self.put(todo).await?;
            self.prepend(&todo.id).await
        }
    }

    /// Delete a record and every index reference to it.
    ///
    /// # Errors
    ///
    /// Returns error if any step fails.
    fn purge(&self, id: &TodoId) -> impl std::future::Future<Output = Result<Purge>> + Send {
        async move {
            let record_removed = self.remove(id).await?;
            let references_removed = self.remove_all_occurrences(id).await?;
            Ok(Purge {
                record_removed,
                references_removed,
            })
        }
    }

    /// Drop every indexed record and then the index itself.
    ///
    /// Orphan records, which the index never referenced, survive.
    ///
    /// # Errors
    ///
    /// Returns error if any step fails.
    fn reset_all(&self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            for id in self.list_ids().await? {
                self.purge(&id).await?;
            }
            Ok(())
        }
    }

    /// One round-trip to the store, to prove it is reachable.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be reached.
    fn ping(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
