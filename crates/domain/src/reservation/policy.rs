//! Booking eligibility rules.

use chrono::{NaiveDate, Utc};

use crate::gateway::{GatewayError, InventoryGateway};

use super::ReservationPeriod;

/// Tunable limits of the booking policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    /// How far ahead a regular guest may book, in days.
    pub max_advance_days_regular: i64,

    /// How far ahead a VIP guest may book, in days.
    pub max_advance_days_vip: i64,

    pub min_stay_nights: i64,
}

impl PolicyConfig {
    pub fn max_advance_days(&self, is_vip: bool) -> i64 {
        if is_vip {
            self.max_advance_days_vip
        } else {
            self.max_advance_days_regular
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_advance_days_regular: 60,
            max_advance_days_vip: 90,
            min_stay_nights: 1,
        }
    }
}

/// Outcome of evaluating a booking against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    StayTooShort { nights: i64, min_nights: i64 },
    CheckInInPast,
    TooFarInAdvance { days: i64, max_days: i64 },
    NoAvailability,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

impl std::fmt::Display for Eligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Eligibility::Eligible => write!(f, "eligible"),
            Eligibility::StayTooShort { nights, min_nights } => {
                write!(f, "stay of {nights} nights is below the minimum of {min_nights}")
            }
            Eligibility::CheckInInPast => write!(f, "check-in date is in the past"),
            Eligibility::TooFarInAdvance { days, max_days } => write!(
                f,
                "check-in is {days} days ahead, the limit is {max_days} days"
            ),
            Eligibility::NoAvailability => write!(f, "no rooms available for the period"),
        }
    }
}

/// Decides whether a reservation may be created.
///
/// Rules are checked in order and the first failing one wins: minimum stay,
/// check-in not in the past, advance-booking window (wider for VIPs), and
/// finally room availability. Only gateway failures surface as errors.
#[derive(Debug, Clone)]
pub struct ReservationPolicy<I> {
    inventory: I,
    config: PolicyConfig,
}

impl<I: InventoryGateway> ReservationPolicy<I> {
    pub fn new(inventory: I) -> Self {
        Self::with_config(inventory, PolicyConfig::default())
    }

    pub fn with_config(inventory: I, config: PolicyConfig) -> Self {
        Self { inventory, config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub async fn can_create_reservation(
        &self,
        is_vip: bool,
        period: &ReservationPeriod,
        room_type: &str,
    ) -> Result<bool, GatewayError> {
        self.can_create_reservation_on(Utc::now().date_naive(), is_vip, period, room_type)
            .await
    }

    /// Same as [`can_create_reservation`](Self::can_create_reservation) with
    /// an explicit current date.
    pub async fn can_create_reservation_on(
        &self,
        today: NaiveDate,
        is_vip: bool,
        period: &ReservationPeriod,
        room_type: &str,
    ) -> Result<bool, GatewayError> {
        Ok(self
            .evaluate_on(today, is_vip, period, room_type)
            .await?
            .is_eligible())
    }

    /// Evaluates every rule and reports which one rejected the booking.
    pub async fn evaluate_on(
        &self,
        today: NaiveDate,
        is_vip: bool,
        period: &ReservationPeriod,
        room_type: &str,
    ) -> Result<Eligibility, GatewayError> {
        let nights = period.nights();
        if nights < self.config.min_stay_nights {
            return Ok(Eligibility::StayTooShort {
                nights,
                min_nights: self.config.min_stay_nights,
            });
        }

        if period.check_in() < today {
            return Ok(Eligibility::CheckInInPast);
        }

        let days = (period.check_in() - today).num_days();
        let max_days = self.config.max_advance_days(is_vip);
        if days > max_days {
            return Ok(Eligibility::TooFarInAdvance { days, max_days });
        }

        let availability = self.inventory.check_availability(room_type, period).await?;
        if !availability.is_available() {
            return Ok(Eligibility::NoAvailability);
        }

        Ok(Eligibility::Eligible)
    }
}
