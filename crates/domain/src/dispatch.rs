//! Delivery of drained domain events.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::aggregate::DomainEvent;
use crate::reservation::ReservationEvent;

/// A handler failed while reacting to an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to dispatch {event_type}: {reason}")]
pub struct DispatchError {
    pub event_type: &'static str,
    pub reason: String,
}

impl DispatchError {
    pub fn new(event_type: &'static str, reason: impl Into<String>) -> Self {
        Self {
            event_type,
            reason: reason.into(),
        }
    }
}

/// Receives domain events after the aggregate that recorded them was saved.
///
/// Events arrive one at a time, in recording order. An error stops delivery
/// of the remaining events and is returned to the command caller.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    async fn dispatch(&self, event: &ReservationEvent) -> Result<(), DispatchError>;
}

#[async_trait]
impl<D: EventDispatcher + ?Sized> EventDispatcher for Arc<D> {
    async fn dispatch(&self, event: &ReservationEvent) -> Result<(), DispatchError> {
        (**self).dispatch(event).await
    }
}

#[derive(Debug, Default)]
struct RecordedEvents {
    events: Vec<ReservationEvent>,
    fail_on: Option<&'static str>,
}

/// Dispatcher that keeps every event it receives, for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventDispatcher {
    state: Arc<Mutex<RecordedEvents>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes dispatch fail for events of the given type.
    pub async fn fail_on(&self, event_type: &'static str) {
        self.state.lock().await.fail_on = Some(event_type);
    }

    /// Events received so far, in order.
    pub async fn dispatched(&self) -> Vec<ReservationEvent> {
        self.state.lock().await.events.clone()
    }

    pub async fn dispatched_types(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .await
            .events
            .iter()
            .map(|e| e.event_type())
            .collect()
    }
}

#[async_trait]
impl EventDispatcher for InMemoryEventDispatcher {
    async fn dispatch(&self, event: &ReservationEvent) -> Result<(), DispatchError> {
        let mut state = self.state.lock().await;
        if state.fail_on == Some(event.event_type()) {
            return Err(DispatchError::new(event.event_type(), "handler rejected event"));
        }
        state.events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use common::ReservationId;

    use super::*;

    #[tokio::test]
    async fn test_records_in_order() {
        let dispatcher = InMemoryEventDispatcher::new();
        let id = ReservationId::new();

        dispatcher
            .dispatch(&ReservationEvent::confirmed(id, Utc::now()))
            .await
            .unwrap();
        dispatcher
            .dispatch(&ReservationEvent::checked_in(id, "101", Utc::now()))
            .await
            .unwrap();

        assert_eq!(
            dispatcher.dispatched_types().await,
            vec!["ReservationConfirmed", "GuestCheckedIn"]
        );
    }

    #[tokio::test]
    async fn test_fail_on_event_type() {
        let dispatcher = InMemoryEventDispatcher::new();
        dispatcher.fail_on("GuestCheckedOut").await;

        let err = dispatcher
            .dispatch(&ReservationEvent::checked_out(ReservationId::new(), Utc::now()))
            .await
            .unwrap_err();
        assert_eq!(err.event_type, "GuestCheckedOut");
        assert!(dispatcher.dispatched().await.is_empty());
    }

    #[tokio::test]
    async fn test_shared_dispatcher_through_arc() {
        let inner = InMemoryEventDispatcher::new();
        let shared: Arc<dyn EventDispatcher> = Arc::new(inner.clone());

        shared
            .dispatch(&ReservationEvent::confirmed(ReservationId::new(), Utc::now()))
            .await
            .unwrap();
        assert_eq!(inner.dispatched().await.len(), 1);
    }
}
