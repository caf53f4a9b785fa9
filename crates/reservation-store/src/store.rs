use async_trait::async_trait;

use crate::{ListQuery, PaginatedResult, ReservationId, ReservationRecord, Result};

/// Core trait for reservation storage.
///
/// A store persists whole reservation records keyed by ID. Saving is an
/// upsert with last-write-wins semantics: no version is checked, so two
/// writers racing on the same reservation silently overwrite each other.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Inserts the record, or replaces the stored one with the same ID.
    async fn upsert(&self, record: ReservationRecord) -> Result<()>;

    /// Retrieves a record by ID.
    ///
    /// Returns None if no reservation with that ID was ever saved.
    async fn find(&self, id: ReservationId) -> Result<Option<ReservationRecord>>;

    /// Retrieves one page of records matching the query, newest first.
    async fn list(&self, query: ListQuery) -> Result<PaginatedResult<ReservationRecord>>;

    /// Returns the number of stored reservations.
    async fn count(&self) -> Result<usize>;
}
