//! Reservation domain events.

use chrono::{DateTime, Utc};
use common::{GuestProfileId, ReservationId, SpecialRequestId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::RequestType;

/// Events recorded by the reservation aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ReservationEvent {
    /// Reservation was created in the pending state.
    ReservationCreated(ReservationCreatedData),

    /// Reservation was confirmed.
    ReservationConfirmed(ReservationConfirmedData),

    /// Guest arrived and was given a room.
    GuestCheckedIn(GuestCheckedInData),

    /// Guest left.
    GuestCheckedOut(GuestCheckedOutData),

    /// Reservation was cancelled before arrival.
    ReservationCancelled(ReservationCancelledData),

    /// A special request was attached.
    SpecialRequestAdded(SpecialRequestAddedData),

    /// A special request was fulfilled by staff.
    SpecialRequestFulfilled(SpecialRequestFulfilledData),
}

impl DomainEvent for ReservationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ReservationEvent::ReservationCreated(_) => "ReservationCreated",
            ReservationEvent::ReservationConfirmed(_) => "ReservationConfirmed",
            ReservationEvent::GuestCheckedIn(_) => "GuestCheckedIn",
            ReservationEvent::GuestCheckedOut(_) => "GuestCheckedOut",
            ReservationEvent::ReservationCancelled(_) => "ReservationCancelled",
            ReservationEvent::SpecialRequestAdded(_) => "SpecialRequestAdded",
            ReservationEvent::SpecialRequestFulfilled(_) => "SpecialRequestFulfilled",
        }
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            ReservationEvent::ReservationCreated(d) => d.occurred_on,
            ReservationEvent::ReservationConfirmed(d) => d.occurred_on,
            ReservationEvent::GuestCheckedIn(d) => d.occurred_on,
            ReservationEvent::GuestCheckedOut(d) => d.occurred_on,
            ReservationEvent::ReservationCancelled(d) => d.occurred_on,
            ReservationEvent::SpecialRequestAdded(d) => d.occurred_on,
            ReservationEvent::SpecialRequestFulfilled(d) => d.occurred_on,
        }
    }
}

impl ReservationEvent {
    /// The reservation the event belongs to.
    pub fn reservation_id(&self) -> ReservationId {
        match self {
            ReservationEvent::ReservationCreated(d) => d.reservation_id,
            ReservationEvent::ReservationConfirmed(d) => d.reservation_id,
            ReservationEvent::GuestCheckedIn(d) => d.reservation_id,
            ReservationEvent::GuestCheckedOut(d) => d.reservation_id,
            ReservationEvent::ReservationCancelled(d) => d.reservation_id,
            ReservationEvent::SpecialRequestAdded(d) => d.reservation_id,
            ReservationEvent::SpecialRequestFulfilled(d) => d.reservation_id,
        }
    }

    pub fn created(
        reservation_id: ReservationId,
        guest_profile_id: GuestProfileId,
        room_type: impl Into<String>,
        occurred_on: DateTime<Utc>,
    ) -> Self {
        ReservationEvent::ReservationCreated(ReservationCreatedData {
            reservation_id,
            guest_profile_id,
            room_type: room_type.into(),
            occurred_on,
        })
    }

    pub fn confirmed(reservation_id: ReservationId, occurred_on: DateTime<Utc>) -> Self {
        ReservationEvent::ReservationConfirmed(ReservationConfirmedData {
            reservation_id,
            occurred_on,
        })
    }

    pub fn checked_in(
        reservation_id: ReservationId,
        room_number: impl Into<String>,
        occurred_on: DateTime<Utc>,
    ) -> Self {
        ReservationEvent::GuestCheckedIn(GuestCheckedInData {
            reservation_id,
            room_number: room_number.into(),
            occurred_on,
        })
    }

    pub fn checked_out(reservation_id: ReservationId, occurred_on: DateTime<Utc>) -> Self {
        ReservationEvent::GuestCheckedOut(GuestCheckedOutData {
            reservation_id,
            occurred_on,
        })
    }

    pub fn cancelled(
        reservation_id: ReservationId,
        reason: impl Into<String>,
        occurred_on: DateTime<Utc>,
    ) -> Self {
        ReservationEvent::ReservationCancelled(ReservationCancelledData {
            reservation_id,
            reason: reason.into(),
            occurred_on,
        })
    }

    pub fn special_request_added(
        reservation_id: ReservationId,
        request_id: SpecialRequestId,
        request_type: RequestType,
        occurred_on: DateTime<Utc>,
    ) -> Self {
        ReservationEvent::SpecialRequestAdded(SpecialRequestAddedData {
            reservation_id,
            request_id,
            request_type,
            occurred_on,
        })
    }

    pub fn special_request_fulfilled(
        reservation_id: ReservationId,
        request_id: SpecialRequestId,
        occurred_on: DateTime<Utc>,
    ) -> Self {
        ReservationEvent::SpecialRequestFulfilled(SpecialRequestFulfilledData {
            reservation_id,
            request_id,
            occurred_on,
        })
    }
}

/// Data for ReservationCreated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCreatedData {
    pub reservation_id: ReservationId,
    pub guest_profile_id: GuestProfileId,
    pub room_type: String,
    pub occurred_on: DateTime<Utc>,
}

/// Data for ReservationConfirmed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationConfirmedData {
    pub reservation_id: ReservationId,
    pub occurred_on: DateTime<Utc>,
}

/// Data for GuestCheckedIn event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCheckedInData {
    pub reservation_id: ReservationId,

    /// Room assigned at the front desk.
    pub room_number: String,

    pub occurred_on: DateTime<Utc>,
}

/// Data for GuestCheckedOut event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCheckedOutData {
    pub reservation_id: ReservationId,
    pub occurred_on: DateTime<Utc>,
}

/// Data for ReservationCancelled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCancelledData {
    pub reservation_id: ReservationId,
    pub reason: String,
    pub occurred_on: DateTime<Utc>,
}

/// Data for SpecialRequestAdded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRequestAddedData {
    pub reservation_id: ReservationId,
    pub request_id: SpecialRequestId,
    pub request_type: RequestType,
    pub occurred_on: DateTime<Utc>,
}

/// Data for SpecialRequestFulfilled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRequestFulfilledData {
    pub reservation_id: ReservationId,
    pub request_id: SpecialRequestId,
    pub occurred_on: DateTime<Utc>,
}
