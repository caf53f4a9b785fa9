//! Integration error types.

use common::ReservationId;
use domain::{DomainError, GatewayError};
use thiserror::Error;

/// Errors that can occur while translating or publishing integration events.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// The reservation an event refers to no longer exists.
    #[error("Reservation with ID '{0}' not found")]
    ReservationNotFound(ReservationId),

    /// Loading the reservation failed.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Looking up guest data failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The publisher could not deliver the event.
    #[error("Failed to publish {event_type}: {reason}")]
    Publish {
        event_type: &'static str,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for integration results.
pub type Result<T> = std::result::Result<T, IntegrationError>;
