//! Value objects for the reservation aggregate.

use chrono::NaiveDate;
use serde::Serialize;

use super::ReservationError;

/// Longest stay a single reservation may cover.
pub const MAX_STAY_NIGHTS: i64 = 365;

/// The stay covered by a reservation.
///
/// Check-in is inclusive and check-out exclusive, so a period from the 1st to
/// the 4th covers the nights of the 1st, 2nd and 3rd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReservationPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl ReservationPeriod {
    /// Creates a period, rejecting empty, inverted or over-long stays.
    ///
    /// Past check-in dates are accepted here; whether a booking may start in
    /// the past is a policy decision.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ReservationError> {
        if check_out <= check_in {
            return Err(ReservationError::InvalidPeriod(format!(
                "check-out ({check_out}) must be after check-in ({check_in})"
            )));
        }

        let period = Self {
            check_in,
            check_out,
        };
        if period.nights() > MAX_STAY_NIGHTS {
            return Err(ReservationError::InvalidPeriod(format!(
                "maximum stay is {MAX_STAY_NIGHTS} nights"
            )));
        }

        Ok(period)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns true if the two stays share at least one night.
    pub fn overlaps(&self, other: &ReservationPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns true if the guest is in the room on the night of `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }
}

impl std::fmt::Display for ReservationPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.check_in, self.check_out)
    }
}

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, ReservationError> {
        let value = value.into();
        if is_valid_email(&value) {
            Ok(Self(value))
        } else {
            Err(ReservationError::InvalidEmail(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_email(value: &str) -> bool {
    if value.len() > 254 || value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// A phone number in E.164 format, e.g. `+5511999999999`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self, ReservationError> {
        let value = value.into();
        if is_e164(&value) {
            Ok(Self(value))
        } else {
            Err(ReservationError::InvalidPhone(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// '+', a non-zero leading digit, then 6 to 14 more digits
fn is_e164(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('+') else {
        return false;
    };
    (7..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Multiplies a nightly rate by a number of nights.
    pub fn times(&self, nights: i64) -> Money {
        Money {
            cents: self.cents * nights,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}
