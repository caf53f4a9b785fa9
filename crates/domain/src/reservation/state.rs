//! Reservation state machine.

use serde::{Deserialize, Serialize};

use super::ReservationError;

/// The status of a reservation in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──► Confirmed ──► CheckedIn ──► CheckedOut
///    │            │
///    └────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Reservation was created and awaits confirmation.
    #[default]
    Pending,

    /// Reservation was confirmed, the guest is expected.
    Confirmed,

    /// Guest is staying in an assigned room.
    CheckedIn,

    /// Guest has left (terminal state).
    CheckedOut,

    /// Reservation was cancelled (terminal state).
    Cancelled,
}

impl ReservationStatus {
    pub fn can_confirm(&self) -> bool {
        matches!(self, ReservationStatus::Pending)
    }

    pub fn can_check_in(&self) -> bool {
        matches!(self, ReservationStatus::Confirmed)
    }

    pub fn can_check_out(&self) -> bool {
        matches!(self, ReservationStatus::CheckedIn)
    }

    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }

    /// Returns true if special requests can still be added.
    pub fn accepts_special_requests(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if special requests can be removed outright.
    ///
    /// Removal is a correction and only allowed before confirmation.
    pub fn can_remove_special_requests(&self) -> bool {
        matches!(self, ReservationStatus::Pending)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::CheckedOut | ReservationStatus::Cancelled
        )
    }

    /// Returns the stored name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Returns a human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::CheckedIn => "Checked In",
            ReservationStatus::CheckedOut => "Checked Out",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "checked_in" => Ok(ReservationStatus::CheckedIn),
            "checked_out" => Ok(ReservationStatus::CheckedOut),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(ReservationError::UnknownValue {
                kind: "reservation status",
                value: other.to_string(),
            }),
        }
    }
}
