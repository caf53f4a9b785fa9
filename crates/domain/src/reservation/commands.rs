//! Reservation commands.

use chrono::NaiveDate;
use common::{GuestProfileId, ReservationId, SpecialRequestId};

use crate::command::Command;

use super::RequestType;

/// Command to book a room for a guest.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub guest_profile_id: GuestProfileId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: String,
}

impl CreateReservation {
    pub fn new(
        guest_profile_id: impl Into<GuestProfileId>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_type: impl Into<String>,
    ) -> Self {
        Self {
            guest_profile_id: guest_profile_id.into(),
            check_in,
            check_out,
            room_type: room_type.into(),
        }
    }
}

impl Command for CreateReservation {
    fn name(&self) -> &'static str {
        "create_reservation"
    }
}

/// Command to confirm a pending reservation.
#[derive(Debug, Clone)]
pub struct ConfirmReservation {
    pub reservation_id: ReservationId,
}

impl ConfirmReservation {
    pub fn new(reservation_id: ReservationId) -> Self {
        Self { reservation_id }
    }
}

impl Command for ConfirmReservation {
    fn name(&self) -> &'static str {
        "confirm_reservation"
    }
}

/// Command to check a guest into an assigned room.
#[derive(Debug, Clone)]
pub struct CheckInGuest {
    pub reservation_id: ReservationId,

    /// Room assigned at the front desk.
    pub room_number: String,
}

impl CheckInGuest {
    pub fn new(reservation_id: ReservationId, room_number: impl Into<String>) -> Self {
        Self {
            reservation_id,
            room_number: room_number.into(),
        }
    }
}

impl Command for CheckInGuest {
    fn name(&self) -> &'static str {
        "check_in_guest"
    }
}

/// Command to check a guest out.
#[derive(Debug, Clone)]
pub struct CheckOutGuest {
    pub reservation_id: ReservationId,
}

impl CheckOutGuest {
    pub fn new(reservation_id: ReservationId) -> Self {
        Self { reservation_id }
    }
}

impl Command for CheckOutGuest {
    fn name(&self) -> &'static str {
        "check_out_guest"
    }
}

/// Command to cancel a reservation before arrival.
#[derive(Debug, Clone)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub reason: String,
}

impl CancelReservation {
    pub fn new(reservation_id: ReservationId, reason: impl Into<String>) -> Self {
        Self {
            reservation_id,
            reason: reason.into(),
        }
    }
}

impl Command for CancelReservation {
    fn name(&self) -> &'static str {
        "cancel_reservation"
    }
}

/// Command to attach a special request.
#[derive(Debug, Clone)]
pub struct AddSpecialRequest {
    pub reservation_id: ReservationId,
    pub request_type: RequestType,
    pub description: String,
}

impl AddSpecialRequest {
    pub fn new(
        reservation_id: ReservationId,
        request_type: RequestType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            reservation_id,
            request_type,
            description: description.into(),
        }
    }
}

impl Command for AddSpecialRequest {
    fn name(&self) -> &'static str {
        "add_special_request"
    }
}

/// Command to mark a special request as fulfilled.
#[derive(Debug, Clone)]
pub struct FulfillSpecialRequest {
    pub reservation_id: ReservationId,
    pub request_id: SpecialRequestId,
}

impl FulfillSpecialRequest {
    pub fn new(reservation_id: ReservationId, request_id: SpecialRequestId) -> Self {
        Self {
            reservation_id,
            request_id,
        }
    }
}

impl Command for FulfillSpecialRequest {
    fn name(&self) -> &'static str {
        "fulfill_special_request"
    }
}

/// Command to drop a special request while the reservation is pending.
#[derive(Debug, Clone)]
pub struct RemoveSpecialRequest {
    pub reservation_id: ReservationId,
    pub request_id: SpecialRequestId,
}

impl RemoveSpecialRequest {
    pub fn new(reservation_id: ReservationId, request_id: SpecialRequestId) -> Self {
        Self {
            reservation_id,
            request_id,
        }
    }
}

impl Command for RemoveSpecialRequest {
    fn name(&self) -> &'static str {
        "remove_special_request"
    }
}

/// Command to cancel a pending special request.
#[derive(Debug, Clone)]
pub struct CancelSpecialRequest {
    pub reservation_id: ReservationId,
    pub request_id: SpecialRequestId,
}

impl CancelSpecialRequest {
    pub fn new(reservation_id: ReservationId, request_id: SpecialRequestId) -> Self {
        Self {
            reservation_id,
            request_id,
        }
    }
}

impl Command for CancelSpecialRequest {
    fn name(&self) -> &'static str {
        "cancel_special_request"
    }
}

/// Command to reword a special request.
#[derive(Debug, Clone)]
pub struct ChangeSpecialRequestDescription {
    pub reservation_id: ReservationId,
    pub request_id: SpecialRequestId,
    pub description: String,
}

impl ChangeSpecialRequestDescription {
    pub fn new(
        reservation_id: ReservationId,
        request_id: SpecialRequestId,
        description: impl Into<String>,
    ) -> Self {
        Self {
            reservation_id,
            request_id,
            description: description.into(),
        }
    }
}

impl Command for ChangeSpecialRequestDescription {
    fn name(&self) -> &'static str {
        "change_special_request_description"
    }
}
