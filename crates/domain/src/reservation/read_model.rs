//! Query-side view of a reservation.

use chrono::{DateTime, NaiveDate, Utc};
use common::{GuestProfileId, ReservationId, SpecialRequestId};
use serde::Serialize;

use crate::gateway::GuestInfo;

use super::{RequestStatus, RequestType, Reservation, ReservationStatus, SpecialRequest};

/// A reservation as returned by queries, with guest data when available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationReadModel {
    pub id: ReservationId,
    pub status: ReservationStatus,
    pub status_label: &'static str,
    pub guest: GuestView,
    pub period: PeriodView,
    pub room_type: String,
    pub assigned_room_number: Option<String>,
    pub cancellation_reason: Option<String>,
    pub special_requests: Vec<SpecialRequestView>,
    pub timestamps: TimestampsView,
}

/// The guest block. Details are omitted when the profile did not resolve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestView {
    pub guest_profile_id: GuestProfileId,
    #[serde(flatten)]
    pub details: Option<GuestDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub document: String,
    pub is_vip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodView {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialRequestView {
    pub id: SpecialRequestId,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub type_label: &'static str,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampsView {
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl ReservationReadModel {
    /// Builds the view; `guest` is the resolved profile, if any.
    pub fn from_reservation(reservation: &Reservation, guest: Option<GuestInfo>) -> Self {
        let period = reservation.period();

        Self {
            id: reservation.id(),
            status: reservation.status(),
            status_label: reservation.status().label(),
            guest: GuestView {
                guest_profile_id: reservation.guest_profile_id().clone(),
                details: guest.map(|g| GuestDetails {
                    full_name: g.full_name,
                    email: g.email.to_string(),
                    phone: g.phone.to_string(),
                    document: g.document,
                    is_vip: g.is_vip,
                }),
            },
            period: PeriodView {
                check_in: period.check_in(),
                check_out: period.check_out(),
                nights: period.nights(),
            },
            room_type: reservation.room_type().to_string(),
            assigned_room_number: reservation.assigned_room_number().map(str::to_string),
            cancellation_reason: reservation.cancellation_reason().map(str::to_string),
            special_requests: reservation
                .special_requests()
                .iter()
                .map(SpecialRequestView::from)
                .collect(),
            timestamps: TimestampsView {
                created_at: reservation.created_at(),
                confirmed_at: reservation.confirmed_at(),
                checked_in_at: reservation.checked_in_at(),
                checked_out_at: reservation.checked_out_at(),
                cancelled_at: reservation.cancelled_at(),
            },
        }
    }
}

impl From<&SpecialRequest> for SpecialRequestView {
    fn from(request: &SpecialRequest) -> Self {
        Self {
            id: request.id(),
            request_type: request.request_type(),
            type_label: request.request_type().label(),
            description: request.description().to_string(),
            status: request.status(),
            created_at: request.created_at(),
            fulfilled_at: request.fulfilled_at(),
        }
    }
}
