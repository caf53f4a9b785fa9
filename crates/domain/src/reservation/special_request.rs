//! Special requests attached to a reservation.

use chrono::{DateTime, Utc};
use common::SpecialRequestId;
use serde::{Deserialize, Serialize};

use super::ReservationError;

/// Kind of special request a guest can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    EarlyCheckIn,
    LateCheckOut,
    ExtraBed,
    DietaryRestriction,
    SpecialOccasion,
    Other,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::EarlyCheckIn => "early_check_in",
            RequestType::LateCheckOut => "late_check_out",
            RequestType::ExtraBed => "extra_bed",
            RequestType::DietaryRestriction => "dietary_restriction",
            RequestType::SpecialOccasion => "special_occasion",
            RequestType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestType::EarlyCheckIn => "Early Check-In",
            RequestType::LateCheckOut => "Late Check-Out",
            RequestType::ExtraBed => "Extra Bed",
            RequestType::DietaryRestriction => "Dietary Restriction",
            RequestType::SpecialOccasion => "Special Occasion",
            RequestType::Other => "Other",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestType {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "early_check_in" => Ok(RequestType::EarlyCheckIn),
            "late_check_out" => Ok(RequestType::LateCheckOut),
            "extra_bed" => Ok(RequestType::ExtraBed),
            "dietary_restriction" => Ok(RequestType::DietaryRestriction),
            "special_occasion" => Ok(RequestType::SpecialOccasion),
            "other" => Ok(RequestType::Other),
            other => Err(ReservationError::UnknownValue {
                kind: "request type",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle of a special request.
///
/// ```text
/// Pending ──┬──► Fulfilled
///           └──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            "cancelled" => Ok(RequestStatus::Cancelled),
            other => Err(ReservationError::UnknownValue {
                kind: "request status",
                value: other.to_string(),
            }),
        }
    }
}

/// A guest's special request, owned by a [`Reservation`](super::Reservation).
///
/// Mutators are crate-private: a request only changes through its
/// reservation. Two requests are equal when their ids are.
#[derive(Debug, Clone)]
pub struct SpecialRequest {
    id: SpecialRequestId,
    request_type: RequestType,
    description: String,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    fulfilled_at: Option<DateTime<Utc>>,
}

impl SpecialRequest {
    pub(crate) fn new(
        id: SpecialRequestId,
        request_type: RequestType,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ReservationError> {
        Ok(Self {
            id,
            request_type,
            description: normalize_description(description)?,
            status: RequestStatus::Pending,
            created_at,
            fulfilled_at: None,
        })
    }

    /// Rebuilds a request from persisted state without re-running checks.
    pub fn reconstruct(
        id: SpecialRequestId,
        request_type: RequestType,
        description: String,
        status: RequestStatus,
        created_at: DateTime<Utc>,
        fulfilled_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            request_type,
            description,
            status,
            created_at,
            fulfilled_at,
        }
    }

    pub fn id(&self) -> SpecialRequestId {
        self.id
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn fulfilled_at(&self) -> Option<DateTime<Utc>> {
        self.fulfilled_at
    }

    pub(crate) fn fulfill(&mut self, at: DateTime<Utc>) -> Result<(), ReservationError> {
        self.transition(RequestStatus::Fulfilled)?;
        self.fulfilled_at = Some(at);
        Ok(())
    }

    pub(crate) fn cancel(&mut self) -> Result<(), ReservationError> {
        self.transition(RequestStatus::Cancelled)
    }

    /// Replaces the description. Allowed in every status.
    pub(crate) fn change_description(
        &mut self,
        description: String,
    ) -> Result<(), ReservationError> {
        self.description = normalize_description(description)?;
        Ok(())
    }

    fn transition(&mut self, to: RequestStatus) -> Result<(), ReservationError> {
        if self.status != RequestStatus::Pending {
            return Err(ReservationError::InvalidRequestStateTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

impl PartialEq for SpecialRequest {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SpecialRequest {}

fn normalize_description(description: String) -> Result<String, ReservationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ReservationError::EmptyDescription);
    }
    if trimmed.len() == description.len() {
        Ok(description)
    } else {
        Ok(trimmed.to_string())
    }
}
