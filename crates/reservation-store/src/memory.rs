use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    ListQuery, PaginatedResult, ReservationId, ReservationRecord, Result, StoreError,
    store::ReservationStore,
};

#[derive(Debug, Default)]
struct Entries {
    records: HashMap<ReservationId, (u64, ReservationRecord)>,
    next_seq: u64,
}

/// In-memory reservation store for testing and local runs.
///
/// This implementation keeps all records in memory and provides the same
/// interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryReservationStore {
    entries: Arc<RwLock<Entries>>,
    fail_on_upsert: Arc<AtomicBool>,
}

impl InMemoryReservationStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to reject every upsert until switched back.
    pub fn set_fail_on_upsert(&self, fail: bool) {
        self.fail_on_upsert.store(fail, Ordering::SeqCst);
    }

    /// Removes all records.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.records.clear();
        entries.next_seq = 0;
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn upsert(&self, record: ReservationRecord) -> Result<()> {
        if self.fail_on_upsert.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "upserts are disabled on this store".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;

        // Replacing keeps the original insertion sequence for stable ordering
        let seq = match entries.records.get(&record.id) {
            Some((seq, _)) => *seq,
            None => {
                entries.next_seq += 1;
                entries.next_seq
            }
        };
        entries.records.insert(record.id, (seq, record));

        Ok(())
    }

    async fn find(&self, id: ReservationId) -> Result<Option<ReservationRecord>> {
        let entries = self.entries.read().await;
        Ok(entries.records.get(&id).map(|(_, record)| record.clone()))
    }

    async fn list(&self, query: ListQuery) -> Result<PaginatedResult<ReservationRecord>> {
        let entries = self.entries.read().await;

        let mut matching: Vec<_> = entries
            .records
            .values()
            .filter(|(_, record)| query.matches(record))
            .collect();

        // Newest first, insertion order breaks ties
        matching.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(query.pagination.offset())
            .take(query.pagination.per_page)
            .map(|(_, record)| record.clone())
            .collect();

        Ok(PaginatedResult::new(items, total, query.pagination))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.records.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};
    use common::Pagination;

    use super::*;

    fn record(room_type: &str) -> ReservationRecord {
        ReservationRecord::pending(
            ReservationId::new(),
            "guest-1",
            room_type,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 5).unwrap(),
        )
    }

    #[tokio::test]
    async fn upsert_and_find() {
        let store = InMemoryReservationStore::new();
        let record = record("DOUBLE");
        let id = record.id;

        store.upsert(record.clone()).await.unwrap();

        let found = store.find(id).await.unwrap();
        assert_eq!(found, Some(record));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let store = InMemoryReservationStore::new();
        assert!(store.find(ReservationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_existing_record() {
        let store = InMemoryReservationStore::new();
        let mut record = record("DOUBLE");
        store.upsert(record.clone()).await.unwrap();

        record.status = "confirmed".to_string();
        record.confirmed_at = Some(Utc::now());
        store.upsert(record.clone()).await.unwrap();

        let found = store.find(record.id).await.unwrap().unwrap();
        assert_eq!(found.status, "confirmed");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() {
        let store = InMemoryReservationStore::new();
        let base = Utc::now();
        let mut ids = Vec::new();
        for i in 0..5 {
            let mut r = record("SINGLE");
            r.created_at = base + Duration::seconds(i);
            ids.push(r.id);
            store.upsert(r).await.unwrap();
        }

        let page = store
            .list(ListQuery::new().page(Pagination::new(1, 2)))
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, ids[4]);
        assert_eq!(page.items[1].id, ids[3]);

        let last = store
            .list(ListQuery::new().page(Pagination::new(3, 2)))
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].id, ids[0]);
    }

    #[tokio::test]
    async fn list_applies_filters() {
        let store = InMemoryReservationStore::new();
        store.upsert(record("SINGLE")).await.unwrap();
        store.upsert(record("SUITE")).await.unwrap();
        let mut confirmed = record("SUITE");
        confirmed.status = "confirmed".to_string();
        store.upsert(confirmed).await.unwrap();

        let suites = store
            .list(ListQuery::new().room_type("SUITE"))
            .await
            .unwrap();
        assert_eq!(suites.total, 2);

        let confirmed_suites = store
            .list(ListQuery::new().room_type("SUITE").status("confirmed"))
            .await
            .unwrap();
        assert_eq!(confirmed_suites.total, 1);
    }

    #[tokio::test]
    async fn fail_on_upsert_rejects_writes() {
        let store = InMemoryReservationStore::new();
        store.set_fail_on_upsert(true);

        let result = store.upsert(record("DOUBLE")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.count().await.unwrap(), 0);

        store.set_fail_on_upsert(false);
        store.upsert(record("DOUBLE")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemoryReservationStore::new();
        store.upsert(record("DOUBLE")).await.unwrap();
        store.clear().await;
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
