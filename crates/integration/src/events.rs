//! Integration events published to other bounded contexts.
//!
//! These are the public contract of the reservation context. They carry
//! plain data (ids as strings, dates as `YYYY-MM-DD`) so consumers do not
//! depend on domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Events announced to other contexts when a reservation changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum IntegrationEvent {
    /// Inventory and notifications react to a confirmed booking.
    ReservationConfirmed(ReservationConfirmedPayload),

    /// Housekeeping marks the room occupied.
    GuestCheckedIn(GuestCheckedInPayload),

    /// Housekeeping schedules cleaning; billing closes the folio.
    GuestCheckedOut(GuestCheckedOutPayload),

    /// Inventory releases the held room.
    ReservationCancelled(ReservationCancelledPayload),
}

impl IntegrationEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            IntegrationEvent::ReservationConfirmed(_) => "ReservationConfirmed",
            IntegrationEvent::GuestCheckedIn(_) => "GuestCheckedIn",
            IntegrationEvent::GuestCheckedOut(_) => "GuestCheckedOut",
            IntegrationEvent::ReservationCancelled(_) => "ReservationCancelled",
        }
    }

    pub fn reservation_id(&self) -> &str {
        match self {
            IntegrationEvent::ReservationConfirmed(p) => &p.reservation_id,
            IntegrationEvent::GuestCheckedIn(p) => &p.reservation_id,
            IntegrationEvent::GuestCheckedOut(p) => &p.reservation_id,
            IntegrationEvent::ReservationCancelled(p) => &p.reservation_id,
        }
    }

    /// When the underlying domain event happened.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            IntegrationEvent::ReservationConfirmed(p) => p.occurred_at,
            IntegrationEvent::GuestCheckedIn(p) => p.occurred_at,
            IntegrationEvent::GuestCheckedOut(p) => p.occurred_at,
            IntegrationEvent::ReservationCancelled(p) => p.occurred_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationConfirmedPayload {
    pub reservation_id: String,

    /// Empty when the guest profile could not be resolved.
    pub guest_email: String,

    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub is_vip: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCheckedInPayload {
    pub reservation_id: String,
    pub room_number: String,
    pub guest_email: String,
    pub is_vip: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCheckedOutPayload {
    pub reservation_id: String,
    pub room_number: String,
    pub guest_email: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCancelledPayload {
    pub reservation_id: String,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag_and_plain_dates() {
        let event = IntegrationEvent::ReservationCancelled(ReservationCancelledPayload {
            reservation_id: "r-1".to_string(),
            room_type: "SUITE".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            reason: "Change of plans".to_string(),
            occurred_at: Utc::now(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ReservationCancelled");
        assert_eq!(json["data"]["check_in"], "2026-03-01");
        assert_eq!(json["data"]["reason"], "Change of plans");
        assert_eq!(event.event_type(), "ReservationCancelled");
        assert_eq!(event.reservation_id(), "r-1");
    }
}
