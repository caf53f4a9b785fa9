//! Publishers deliver integration events to the outside world.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{IntegrationError, Result};
use crate::events::IntegrationEvent;

/// Sends integration events to other contexts.
#[async_trait]
pub trait IntegrationEventPublisher: Send + Sync {
    async fn publish(&self, event: IntegrationEvent) -> Result<()>;
}

#[async_trait]
impl<P: IntegrationEventPublisher + ?Sized> IntegrationEventPublisher for Arc<P> {
    async fn publish(&self, event: IntegrationEvent) -> Result<()> {
        (**self).publish(event).await
    }
}

/// Publisher that writes each event to the log as JSON.
///
/// Stands in for a message broker until one is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPublisher;

impl LoggingPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IntegrationEventPublisher for LoggingPublisher {
    async fn publish(&self, event: IntegrationEvent) -> Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(
            event_type = event.event_type(),
            reservation_id = event.reservation_id(),
            %payload,
            "Publishing integration event"
        );
        metrics::counter!("integration_events_published_total", "event" => event.event_type())
            .increment(1);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PublishedEvents {
    events: Vec<IntegrationEvent>,
    fail: bool,
}

/// Publisher that keeps published events in memory, for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    state: Arc<Mutex<PublishedEvents>>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later publish fail.
    pub async fn set_fail(&self, fail: bool) {
        self.state.lock().await.fail = fail;
    }

    pub async fn published(&self) -> Vec<IntegrationEvent> {
        self.state.lock().await.events.clone()
    }

    pub async fn published_types(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .await
            .events
            .iter()
            .map(IntegrationEvent::event_type)
            .collect()
    }
}

#[async_trait]
impl IntegrationEventPublisher for InMemoryPublisher {
    async fn publish(&self, event: IntegrationEvent) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.fail {
            return Err(IntegrationError::Publish {
                event_type: event.event_type(),
                reason: "broker unavailable".to_string(),
            });
        }
        metrics::counter!("integration_events_published_total", "event" => event.event_type())
            .increment(1);
        state.events.push(event);
        Ok(())
    }
}
