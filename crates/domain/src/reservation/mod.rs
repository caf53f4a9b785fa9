//! Reservation aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod policy;
mod read_model;
mod repository;
mod service;
mod special_request;
mod state;
mod value_objects;

pub use aggregate::{Reservation, ReservationState};
pub use commands::*;
pub use events::{
    GuestCheckedInData, GuestCheckedOutData, ReservationCancelledData, ReservationConfirmedData,
    ReservationCreatedData, ReservationEvent, SpecialRequestAddedData,
    SpecialRequestFulfilledData,
};
pub use policy::{Eligibility, PolicyConfig, ReservationPolicy};
pub use read_model::{
    GuestDetails, GuestView, PeriodView, ReservationReadModel, SpecialRequestView, TimestampsView,
};
pub use repository::{ReservationFilter, ReservationRepository, StoreRepository};
pub use service::ReservationService;
pub use special_request::{RequestStatus, RequestType, SpecialRequest};
pub use state::ReservationStatus;
pub use value_objects::{Email, MAX_STAY_NIGHTS, Money, Phone, ReservationPeriod};

use common::SpecialRequestId;
use thiserror::Error;

/// Most special requests a reservation may carry, in any status.
pub const MAX_SPECIAL_REQUESTS: usize = 5;

/// Room types the hotel sells.
pub const KNOWN_ROOM_TYPES: [&str; 3] = ["SINGLE", "DOUBLE", "SUITE"];

/// Errors raised by the reservation aggregate and its value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// The reservation is not in a status that allows the operation.
    #[error("Cannot transition reservation from '{from}' to '{to}'")]
    InvalidStateTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// The special request is not pending.
    #[error("Cannot transition special request from '{from}' to '{to}'")]
    InvalidRequestStateTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Maximum number of special requests ({max}) has been reached")]
    MaxSpecialRequestsExceeded { max: usize },

    #[error("Special request not found: {0}")]
    SpecialRequestNotFound(SpecialRequestId),

    #[error("Invalid reservation period: {0}")]
    InvalidPeriod(String),

    #[error("Special request description cannot be empty")]
    EmptyDescription,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid phone number: {0} (expected E.164, e.g. +5511999999999)")]
    InvalidPhone(String),

    /// A stored or submitted name did not match any known variant.
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}
