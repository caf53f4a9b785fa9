//! Command handling: load, mutate, save, then dispatch recorded events.

use common::ReservationId;

use crate::aggregate::{AggregateRoot, DomainEvent};
use crate::dispatch::EventDispatcher;
use crate::error::DomainError;
use crate::reservation::{Reservation, ReservationError, ReservationEvent, ReservationRepository};

/// Trait for commands handled by the reservation service.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Short name used in logs and as the `command` metric label.
    fn name(&self) -> &'static str;
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The reservation after the command was applied and saved.
    pub reservation: Reservation,

    /// Events the command recorded, in the order they were dispatched.
    pub events: Vec<ReservationEvent>,
}

/// Runs commands against reservations.
///
/// Every command follows the same protocol:
/// 1. Load the reservation from the repository
/// 2. Apply the change (which records events on the aggregate)
/// 3. Save the reservation
/// 4. Drain the recorded events
/// 5. Dispatch them one by one, in recording order
///
/// Events are only drained after a successful save, so a failed save never
/// leaks events to the dispatcher.
pub struct CommandHandler<R, D> {
    repository: R,
    dispatcher: D,
}

impl<R, D> CommandHandler<R, D>
where
    R: ReservationRepository,
    D: EventDispatcher,
{
    pub fn new(repository: R, dispatcher: D) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Loads a reservation, failing with `ReservationNotFound` if absent.
    pub async fn load(&self, id: ReservationId) -> Result<Reservation, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReservationNotFound(id))
    }

    /// Executes a change on an existing reservation.
    pub async fn execute<F>(
        &self,
        id: ReservationId,
        change: F,
    ) -> Result<CommandResult, DomainError>
    where
        F: FnOnce(&mut Reservation) -> Result<(), ReservationError>,
    {
        let ((), result) = self.execute_with(id, change).await?;
        Ok(result)
    }

    /// Like [`execute`](Self::execute), also returning the change's output.
    pub async fn execute_with<F, T>(
        &self,
        id: ReservationId,
        change: F,
    ) -> Result<(T, CommandResult), DomainError>
    where
        F: FnOnce(&mut Reservation) -> Result<T, ReservationError>,
    {
        let mut reservation = self.load(id).await?;
        let output = change(&mut reservation)?;
        let result = self.commit(reservation).await?;
        Ok((output, result))
    }

    /// Saves a reservation and dispatches everything it recorded.
    pub async fn commit(&self, mut reservation: Reservation) -> Result<CommandResult, DomainError> {
        self.repository.save(&reservation).await?;

        let events = reservation.pull_domain_events();
        for event in &events {
            self.dispatcher.dispatch(event).await?;
            metrics::counter!(
                "reservation_events_dispatched_total",
                "event" => event.event_type()
            )
            .increment(1);
            tracing::debug!(
                reservation_id = %event.reservation_id(),
                event_type = event.event_type(),
                "domain event dispatched"
            );
        }

        Ok(CommandResult {
            reservation,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use reservation_store::InMemoryReservationStore;

    use super::*;
    use crate::dispatch::InMemoryEventDispatcher;
    use crate::reservation::{ReservationPeriod, ReservationStatus, StoreRepository};

    type TestHandler =
        CommandHandler<StoreRepository<InMemoryReservationStore>, InMemoryEventDispatcher>;

    fn setup() -> (TestHandler, InMemoryReservationStore, InMemoryEventDispatcher) {
        let store = InMemoryReservationStore::new();
        let dispatcher = InMemoryEventDispatcher::new();
        let handler = CommandHandler::new(StoreRepository::new(store.clone()), dispatcher.clone());
        (handler, store, dispatcher)
    }

    fn new_reservation() -> Reservation {
        let today = Utc::now().date_naive();
        let period =
            ReservationPeriod::new(today + Duration::days(1), today + Duration::days(3)).unwrap();
        Reservation::create(ReservationId::new(), "guest-1".into(), period, "DOUBLE")
    }

    #[tokio::test]
    async fn test_commit_saves_then_dispatches() {
        let (handler, _, dispatcher) = setup();
        let reservation = new_reservation();
        let id = reservation.id();

        let result = handler.commit(reservation).await.unwrap();
        assert_eq!(result.events.len(), 1);
        assert!(result.reservation.pending_events().is_empty());
        assert_eq!(dispatcher.dispatched_types().await, vec!["ReservationCreated"]);
        assert!(handler.repository().find_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_execute_applies_change() {
        let (handler, _, dispatcher) = setup();
        let id = handler.commit(new_reservation()).await.unwrap().reservation.id();

        let result = handler.execute(id, |r| r.confirm()).await.unwrap();
        assert_eq!(result.reservation.status(), ReservationStatus::Confirmed);
        assert_eq!(
            dispatcher.dispatched_types().await,
            vec!["ReservationCreated", "ReservationConfirmed"]
        );

        let stored = handler.load(id).await.unwrap();
        assert_eq!(stored.status(), ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_rejected_change_saves_nothing() {
        let (handler, _, dispatcher) = setup();
        let id = handler.commit(new_reservation()).await.unwrap().reservation.id();

        let err = handler.execute(id, |r| r.check_out()).await.unwrap_err();
        assert!(matches!(err, DomainError::Reservation(_)));
        assert_eq!(dispatcher.dispatched().await.len(), 1);
        assert_eq!(handler.load(id).await.unwrap().status(), ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn test_missing_reservation() {
        let (handler, _, _) = setup();
        let missing = ReservationId::new();
        let err = handler.execute(missing, |r| r.confirm()).await.unwrap_err();
        assert!(matches!(err, DomainError::ReservationNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_failed_save_dispatches_nothing() {
        let (handler, store, dispatcher) = setup();
        store.set_fail_on_upsert(true);

        let err = handler.commit(new_reservation()).await.unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
        assert!(dispatcher.dispatched().await.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_stops_remaining_events() {
        let (handler, _, dispatcher) = setup();
        dispatcher.fail_on("ReservationConfirmed").await;

        let mut reservation = new_reservation();
        reservation.confirm().unwrap();
        reservation.check_in("12").unwrap();

        let err = handler.commit(reservation).await.unwrap_err();
        assert!(matches!(err, DomainError::Dispatch(_)));
        assert_eq!(dispatcher.dispatched_types().await, vec!["ReservationCreated"]);
    }

    #[tokio::test]
    async fn test_execute_with_returns_output() {
        let (handler, _, _) = setup();
        let id = handler.commit(new_reservation()).await.unwrap().reservation.id();

        let (request_id, result) = handler
            .execute_with(id, |r| {
                r.add_special_request(crate::reservation::RequestType::Other, "Extra towels")
            })
            .await
            .unwrap();
        assert!(result.reservation.special_request(request_id).is_some());
    }
}
