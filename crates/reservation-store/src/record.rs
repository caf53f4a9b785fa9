use chrono::{DateTime, NaiveDate, Utc};
use common::SpecialRequestId;
use serde::{Deserialize, Serialize};

use crate::ReservationId;

/// The persisted shape of a reservation.
///
/// Records are plain data: statuses and request types are stored as their
/// snake_case string names and the store never checks domain rules. Mapping
/// to and from the aggregate happens in the domain repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: ReservationId,
    pub guest_profile_id: String,
    pub status: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: String,
    pub assigned_room_number: Option<String>,
    #[serde(default)]
    pub special_requests: Vec<SpecialRequestRecord>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A special request embedded in a [`ReservationRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRequestRecord {
    pub id: SpecialRequestId,
    #[serde(rename = "type")]
    pub request_type: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

impl ReservationRecord {
    /// Creates a pending record with no special requests.
    ///
    /// Mostly useful for store tests; the domain builds records from the
    /// aggregate instead.
    pub fn pending(
        id: ReservationId,
        guest_profile_id: impl Into<String>,
        room_type: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            id,
            guest_profile_id: guest_profile_id.into(),
            status: "pending".to_string(),
            check_in,
            check_out,
            room_type: room_type.into(),
            assigned_room_number: None,
            special_requests: Vec::new(),
            cancellation_reason: None,
            created_at: Utc::now(),
            confirmed_at: None,
            checked_in_at: None,
            checked_out_at: None,
            cancelled_at: None,
        }
    }
}
