//! Reservation persistence port and its store-backed implementation.

use async_trait::async_trait;
use common::{GuestProfileId, PaginatedResult, Pagination, ReservationId};
use reservation_store::{ListQuery, ReservationRecord, ReservationStore, SpecialRequestRecord};

use crate::error::DomainError;

use super::{
    ReservationError, ReservationPeriod, ReservationState, ReservationStatus, SpecialRequest,
    aggregate::Reservation,
};

/// Optional filters for listing reservations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub room_type: Option<String>,
    pub guest_profile_id: Option<GuestProfileId>,
}

impl ReservationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    pub fn guest(mut self, guest_profile_id: impl Into<GuestProfileId>) -> Self {
        self.guest_profile_id = Some(guest_profile_id.into());
        self
    }
}

/// Loads and saves reservation aggregates.
///
/// Saving is an upsert by id. There is no version check: concurrent saves of
/// the same reservation are last-write-wins.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn save(&self, reservation: &Reservation) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// Lists reservations newest first.
    async fn list(
        &self,
        filter: &ReservationFilter,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Reservation>, DomainError>;

    fn next_identity(&self) -> ReservationId {
        ReservationId::new()
    }
}

/// Repository backed by any [`ReservationStore`].
#[derive(Debug, Clone)]
pub struct StoreRepository<S> {
    store: S,
}

impl<S: ReservationStore> StoreRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: ReservationStore> ReservationRepository for StoreRepository<S> {
    async fn save(&self, reservation: &Reservation) -> Result<(), DomainError> {
        self.store.upsert(to_record(reservation)).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DomainError> {
        self.store.find(id).await?.map(from_record).transpose()
    }

    async fn list(
        &self,
        filter: &ReservationFilter,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Reservation>, DomainError> {
        let mut query = ListQuery::new().page(pagination);
        if let Some(status) = filter.status {
            query = query.status(status.as_str());
        }
        if let Some(ref room_type) = filter.room_type {
            query = query.room_type(room_type.clone());
        }
        if let Some(ref guest) = filter.guest_profile_id {
            query = query.guest_profile_id(guest.as_str());
        }

        self.store.list(query).await?.try_map(from_record)
    }
}

/// Converts an aggregate to its storage shape.
pub(crate) fn to_record(reservation: &Reservation) -> ReservationRecord {
    let special_requests = reservation
        .special_requests()
        .iter()
        .map(|r| SpecialRequestRecord {
            id: r.id(),
            request_type: r.request_type().as_str().to_string(),
            description: r.description().to_string(),
            status: r.status().as_str().to_string(),
            created_at: r.created_at(),
            fulfilled_at: r.fulfilled_at(),
        })
        .collect();

    ReservationRecord {
        id: reservation.id(),
        guest_profile_id: reservation.guest_profile_id().to_string(),
        status: reservation.status().as_str().to_string(),
        check_in: reservation.period().check_in(),
        check_out: reservation.period().check_out(),
        room_type: reservation.room_type().to_string(),
        assigned_room_number: reservation.assigned_room_number().map(str::to_string),
        special_requests,
        cancellation_reason: reservation.cancellation_reason().map(str::to_string),
        created_at: reservation.created_at(),
        confirmed_at: reservation.confirmed_at(),
        checked_in_at: reservation.checked_in_at(),
        checked_out_at: reservation.checked_out_at(),
        cancelled_at: reservation.cancelled_at(),
    }
}

/// Rebuilds an aggregate from a stored record.
pub(crate) fn from_record(record: ReservationRecord) -> Result<Reservation, DomainError> {
    let id = record.id;
    let corrupt = |reason: String| DomainError::CorruptRecord { id, reason };

    let period = ReservationPeriod::new(record.check_in, record.check_out)
        .map_err(|e| corrupt(e.to_string()))?;
    let status = record
        .status
        .parse::<ReservationStatus>()
        .map_err(|e| corrupt(e.to_string()))?;

    let special_requests = record
        .special_requests
        .into_iter()
        .map(|r| -> Result<SpecialRequest, ReservationError> {
            Ok(SpecialRequest::reconstruct(
                r.id,
                r.request_type.parse()?,
                r.description,
                r.status.parse()?,
                r.created_at,
                r.fulfilled_at,
            ))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| corrupt(e.to_string()))?;

    Ok(Reservation::reconstruct(ReservationState {
        id,
        guest_profile_id: GuestProfileId::new(record.guest_profile_id),
        period,
        room_type: record.room_type,
        status,
        assigned_room_number: record.assigned_room_number,
        special_requests,
        cancellation_reason: record.cancellation_reason,
        created_at: record.created_at,
        confirmed_at: record.confirmed_at,
        checked_in_at: record.checked_in_at,
        checked_out_at: record.checked_out_at,
        cancelled_at: record.cancelled_at,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use reservation_store::InMemoryReservationStore;

    use super::*;
    use crate::aggregate::AggregateRoot;
    use crate::reservation::{RequestStatus, RequestType};

    fn reservation(room_type: &str) -> Reservation {
        let today = Utc::now().date_naive();
        let period =
            ReservationPeriod::new(today + Duration::days(2), today + Duration::days(5)).unwrap();
        Reservation::create(ReservationId::new(), "guest-1".into(), period, room_type)
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let repo = StoreRepository::new(InMemoryReservationStore::new());
        let mut r = reservation("SUITE");
        r.confirm().unwrap();
        let fulfilled = r
            .add_special_request(RequestType::LateCheckOut, "Leave at 3pm")
            .unwrap();
        r.fulfill_special_request(fulfilled).unwrap();
        r.add_special_request(RequestType::ExtraBed, "Crib").unwrap();
        r.check_in("501").unwrap();
        repo.save(&r).await.unwrap();

        let mut loaded = repo.find_by_id(r.id()).await.unwrap().unwrap();
        assert_eq!(loaded.status(), ReservationStatus::CheckedIn);
        assert_eq!(loaded.assigned_room_number(), Some("501"));
        assert_eq!(loaded.period(), r.period());
        assert_eq!(loaded.confirmed_at(), r.confirmed_at());
        assert_eq!(loaded.special_requests().len(), 2);

        let request = loaded.special_request(fulfilled).unwrap();
        assert_eq!(request.status(), RequestStatus::Fulfilled);
        assert_eq!(request.description(), "Leave at 3pm");
        assert!(request.fulfilled_at().is_some());

        assert!(loaded.pull_domain_events().is_empty());
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = StoreRepository::new(InMemoryReservationStore::new());
        assert!(repo.find_by_id(ReservationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let repo = StoreRepository::new(InMemoryReservationStore::new());
        let mut confirmed = reservation("SUITE");
        confirmed.confirm().unwrap();
        repo.save(&confirmed).await.unwrap();
        repo.save(&reservation("SUITE")).await.unwrap();
        repo.save(&reservation("SINGLE")).await.unwrap();

        let suites = repo
            .list(&ReservationFilter::new().room_type("SUITE"), Pagination::default())
            .await
            .unwrap();
        assert_eq!(suites.total, 2);

        let confirmed_only = repo
            .list(
                &ReservationFilter::new().status(ReservationStatus::Confirmed),
                Pagination::default(),
            )
            .await
            .unwrap();
        assert_eq!(confirmed_only.total, 1);
        assert_eq!(confirmed_only.items[0].id(), confirmed.id());
    }

    #[tokio::test]
    async fn test_corrupt_status_is_reported() {
        let store = InMemoryReservationStore::new();
        let mut record = to_record(&reservation("DOUBLE"));
        record.status = "archived".to_string();
        let id = record.id;
        store.upsert(record).await.unwrap();

        let repo = StoreRepository::new(store);
        let err = repo.find_by_id(id).await.unwrap_err();
        assert!(matches!(err, DomainError::CorruptRecord { id: bad, .. } if bad == id));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_store_error() {
        let store = InMemoryReservationStore::new();
        store.set_fail_on_upsert(true);
        let repo = StoreRepository::new(store);

        let err = repo.save(&reservation("DOUBLE")).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
    }
}
