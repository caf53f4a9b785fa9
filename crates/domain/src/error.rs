//! Domain error types.

use common::{GuestProfileId, ReservationId};
use reservation_store::StoreError;
use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::gateway::GatewayError;
use crate::reservation::ReservationError;

/// Errors returned by reservation commands and queries.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A business rule of the aggregate rejected the operation.
    #[error(transparent)]
    Reservation(#[from] ReservationError),

    /// The booking policy refused the reservation.
    #[error("Reservation cannot be created: {0}")]
    PolicyRejected(String),

    #[error("Reservation with ID '{0}' not found")]
    ReservationNotFound(ReservationId),

    #[error("Guest profile '{0}' not found")]
    GuestNotFound(GuestProfileId),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Reservation store error: {0}")]
    Store(#[from] StoreError),

    /// A stored reservation could not be turned back into an aggregate.
    #[error("Stored reservation {id} is corrupt: {reason}")]
    CorruptRecord { id: ReservationId, reason: String },
}

impl DomainError {
    /// True for failures of infrastructure rather than business rules.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::Gateway(_)
                | DomainError::Dispatch(_)
                | DomainError::Store(_)
                | DomainError::CorruptRecord { .. }
        )
    }
}
