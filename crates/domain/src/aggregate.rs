//! Core aggregate and domain event traits.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    ///
    /// Used for routing, logging and metric labels.
    fn event_type(&self) -> &'static str;

    /// When the change the event describes took place.
    fn occurred_on(&self) -> DateTime<Utc>;
}

/// Trait for aggregate roots that record domain events.
///
/// An aggregate root guards the consistency of everything it owns. Each
/// successful state change appends an event to an internal buffer; the
/// application layer drains that buffer after the aggregate was saved and
/// hands the events to a dispatcher.
pub trait AggregateRoot: Send + Sync {
    /// The identifier type of the aggregate.
    type Id: Copy + std::fmt::Display;

    /// The type of events this aggregate records.
    type Event: DomainEvent;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's unique identifier.
    fn id(&self) -> Self::Id;

    /// Events recorded since the last drain, oldest first.
    fn pending_events(&self) -> &[Self::Event];

    /// Returns all recorded events and empties the buffer.
    ///
    /// A second call without an intervening change returns an empty list.
    fn pull_domain_events(&mut self) -> Vec<Self::Event>;
}

/// Ordered buffer of events recorded by an aggregate.
#[derive(Debug, Clone)]
pub struct EventBuffer<E> {
    events: Vec<E>,
}

impl<E> EventBuffer<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn record(&mut self, event: E) {
        self.events.push(event);
    }

    pub fn pending(&self) -> &[E] {
        &self.events
    }

    /// Takes every buffered event, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<E> Default for EventBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}
