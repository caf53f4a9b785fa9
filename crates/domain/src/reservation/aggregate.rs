//! Reservation aggregate implementation.

use chrono::{DateTime, Utc};
use common::{GuestProfileId, ReservationId, SpecialRequestId};

use crate::aggregate::{AggregateRoot, EventBuffer};

use super::{
    MAX_SPECIAL_REQUESTS, RequestType, ReservationError, ReservationEvent, ReservationPeriod,
    ReservationStatus, SpecialRequest,
};

/// Hotel reservation aggregate root.
///
/// Guards every state change with the status machine in
/// [`ReservationStatus`], owns its special requests and records one
/// [`ReservationEvent`] per successful lifecycle change. A failed operation
/// leaves the aggregate untouched.
#[derive(Debug, Clone)]
pub struct Reservation {
    id: ReservationId,
    guest_profile_id: GuestProfileId,
    period: ReservationPeriod,
    room_type: String,
    status: ReservationStatus,
    assigned_room_number: Option<String>,
    special_requests: Vec<SpecialRequest>,
    cancellation_reason: Option<String>,
    created_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
    checked_in_at: Option<DateTime<Utc>>,
    checked_out_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    events: EventBuffer<ReservationEvent>,
}

/// Persisted state of a reservation, used to rehydrate the aggregate.
#[derive(Debug, Clone)]
pub struct ReservationState {
    pub id: ReservationId,
    pub guest_profile_id: GuestProfileId,
    pub period: ReservationPeriod,
    pub room_type: String,
    pub status: ReservationStatus,
    pub assigned_room_number: Option<String>,
    pub special_requests: Vec<SpecialRequest>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Creates a pending reservation and records `ReservationCreated`.
    pub fn create(
        id: ReservationId,
        guest_profile_id: GuestProfileId,
        period: ReservationPeriod,
        room_type: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let room_type = room_type.into();

        let mut reservation = Self {
            id,
            guest_profile_id: guest_profile_id.clone(),
            period,
            room_type: room_type.clone(),
            status: ReservationStatus::Pending,
            assigned_room_number: None,
            special_requests: Vec::new(),
            cancellation_reason: None,
            created_at: now,
            confirmed_at: None,
            checked_in_at: None,
            checked_out_at: None,
            cancelled_at: None,
            events: EventBuffer::new(),
        };
        reservation.events.record(ReservationEvent::created(
            id,
            guest_profile_id,
            room_type,
            now,
        ));
        reservation
    }

    /// Rebuilds a reservation from persisted state with an empty event buffer.
    pub fn reconstruct(state: ReservationState) -> Self {
        Self {
            id: state.id,
            guest_profile_id: state.guest_profile_id,
            period: state.period,
            room_type: state.room_type,
            status: state.status,
            assigned_room_number: state.assigned_room_number,
            special_requests: state.special_requests,
            cancellation_reason: state.cancellation_reason,
            created_at: state.created_at,
            confirmed_at: state.confirmed_at,
            checked_in_at: state.checked_in_at,
            checked_out_at: state.checked_out_at,
            cancelled_at: state.cancelled_at,
            events: EventBuffer::new(),
        }
    }

    // Accessors

    pub fn id(&self) -> ReservationId {
        self.id
    }

    pub fn guest_profile_id(&self) -> &GuestProfileId {
        &self.guest_profile_id
    }

    pub fn period(&self) -> &ReservationPeriod {
        &self.period
    }

    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn assigned_room_number(&self) -> Option<&str> {
        self.assigned_room_number.as_deref()
    }

    pub fn special_requests(&self) -> &[SpecialRequest] {
        &self.special_requests
    }

    pub fn special_request(&self, request_id: SpecialRequestId) -> Option<&SpecialRequest> {
        self.special_requests.iter().find(|r| r.id() == request_id)
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    pub fn checked_in_at(&self) -> Option<DateTime<Utc>> {
        self.checked_in_at
    }

    pub fn checked_out_at(&self) -> Option<DateTime<Utc>> {
        self.checked_out_at
    }

    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    // Lifecycle

    pub fn confirm(&mut self) -> Result<(), ReservationError> {
        self.ensure(self.status.can_confirm(), ReservationStatus::Confirmed)?;

        let now = Utc::now();
        self.status = ReservationStatus::Confirmed;
        self.confirmed_at = Some(now);
        self.events
            .record(ReservationEvent::confirmed(self.id, now));
        Ok(())
    }

    pub fn check_in(&mut self, room_number: impl Into<String>) -> Result<(), ReservationError> {
        self.ensure(self.status.can_check_in(), ReservationStatus::CheckedIn)?;

        let now = Utc::now();
        let room_number = room_number.into();
        self.status = ReservationStatus::CheckedIn;
        self.assigned_room_number = Some(room_number.clone());
        self.checked_in_at = Some(now);
        self.events
            .record(ReservationEvent::checked_in(self.id, room_number, now));
        Ok(())
    }

    pub fn check_out(&mut self) -> Result<(), ReservationError> {
        self.ensure(self.status.can_check_out(), ReservationStatus::CheckedOut)?;

        let now = Utc::now();
        self.status = ReservationStatus::CheckedOut;
        self.checked_out_at = Some(now);
        self.events
            .record(ReservationEvent::checked_out(self.id, now));
        Ok(())
    }

    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<(), ReservationError> {
        self.ensure(self.status.can_cancel(), ReservationStatus::Cancelled)?;

        let now = Utc::now();
        let reason = reason.into();
        self.status = ReservationStatus::Cancelled;
        self.cancellation_reason = Some(reason.clone());
        self.cancelled_at = Some(now);
        self.events
            .record(ReservationEvent::cancelled(self.id, reason, now));
        Ok(())
    }

    // Special requests

    /// Attaches a pending special request and returns its id.
    ///
    /// Every entry counts towards the limit, fulfilled and cancelled ones
    /// included.
    pub fn add_special_request(
        &mut self,
        request_type: RequestType,
        description: impl Into<String>,
    ) -> Result<SpecialRequestId, ReservationError> {
        self.ensure(self.status.accepts_special_requests(), self.status)?;
        if self.special_requests.len() >= MAX_SPECIAL_REQUESTS {
            return Err(ReservationError::MaxSpecialRequestsExceeded {
                max: MAX_SPECIAL_REQUESTS,
            });
        }

        let now = Utc::now();
        let request = SpecialRequest::new(
            SpecialRequestId::new(),
            request_type,
            description.into(),
            now,
        )?;
        let request_id = request.id();
        self.special_requests.push(request);
        self.events.record(ReservationEvent::special_request_added(
            self.id,
            request_id,
            request_type,
            now,
        ));
        Ok(request_id)
    }

    pub fn fulfill_special_request(
        &mut self,
        request_id: SpecialRequestId,
    ) -> Result<(), ReservationError> {
        let now = Utc::now();
        self.request_mut(request_id)?.fulfill(now)?;
        self.events
            .record(ReservationEvent::special_request_fulfilled(
                self.id, request_id, now,
            ));
        Ok(())
    }

    /// Drops a request entirely. Only allowed while pending; records no event.
    pub fn remove_special_request(
        &mut self,
        request_id: SpecialRequestId,
    ) -> Result<(), ReservationError> {
        self.ensure(self.status.can_remove_special_requests(), self.status)?;

        let before = self.special_requests.len();
        self.special_requests.retain(|r| r.id() != request_id);
        if self.special_requests.len() == before {
            return Err(ReservationError::SpecialRequestNotFound(request_id));
        }
        Ok(())
    }

    /// Marks a request as cancelled. Records no event.
    pub fn cancel_special_request(
        &mut self,
        request_id: SpecialRequestId,
    ) -> Result<(), ReservationError> {
        self.request_mut(request_id)?.cancel()
    }

    /// Rewrites the description of a request. Records no event.
    pub fn change_special_request_description(
        &mut self,
        request_id: SpecialRequestId,
        description: impl Into<String>,
    ) -> Result<(), ReservationError> {
        self.request_mut(request_id)?
            .change_description(description.into())
    }

    fn request_mut(
        &mut self,
        request_id: SpecialRequestId,
    ) -> Result<&mut SpecialRequest, ReservationError> {
        self.special_requests
            .iter_mut()
            .find(|r| r.id() == request_id)
            .ok_or(ReservationError::SpecialRequestNotFound(request_id))
    }

    fn ensure(&self, allowed: bool, to: ReservationStatus) -> Result<(), ReservationError> {
        if allowed {
            Ok(())
        } else {
            Err(ReservationError::InvalidStateTransition {
                from: self.status,
                to,
            })
        }
    }
}

impl AggregateRoot for Reservation {
    type Id = ReservationId;
    type Event = ReservationEvent;

    fn aggregate_type() -> &'static str {
        "Reservation"
    }

    fn id(&self) -> ReservationId {
        self.id
    }

    fn pending_events(&self) -> &[ReservationEvent] {
        self.events.pending()
    }

    fn pull_domain_events(&mut self) -> Vec<ReservationEvent> {
        self.events.drain()
    }
}
