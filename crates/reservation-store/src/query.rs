use common::Pagination;

use crate::ReservationRecord;

/// Builder for listing reservation records.
///
/// Filters are optional and combined with AND. Results are always ordered
/// newest first (by creation time).
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Filter by status name (e.g. `"confirmed"`).
    pub status: Option<String>,

    /// Filter by room type (e.g. `"SUITE"`).
    pub room_type: Option<String>,

    /// Filter by guest profile reference.
    pub guest_profile_id: Option<String>,

    /// Which page to return.
    pub pagination: Pagination,
}

impl ListQuery {
    /// Creates a query returning the first page of all reservations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by status name.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filters by room type.
    pub fn room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    /// Filters by guest profile reference.
    pub fn guest_profile_id(mut self, guest_profile_id: impl Into<String>) -> Self {
        self.guest_profile_id = Some(guest_profile_id.into());
        self
    }

    /// Selects the page to return.
    pub fn page(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Returns true if `record` passes every filter set on this query.
    pub fn matches(&self, record: &ReservationRecord) -> bool {
        if let Some(ref status) = self.status
            && &record.status != status
        {
            return false;
        }
        if let Some(ref room_type) = self.room_type
            && &record.room_type != room_type
        {
            return false;
        }
        if let Some(ref guest) = self.guest_profile_id
            && &record.guest_profile_id != guest
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ReservationId;

    fn record(room_type: &str) -> ReservationRecord {
        ReservationRecord::pending(
            ReservationId::new(),
            "guest-1",
            room_type,
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
        )
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(ListQuery::new().matches(&record("SUITE")));
    }

    #[test]
    fn filters_combine() {
        let query = ListQuery::new().status("pending").room_type("SUITE");
        assert!(query.matches(&record("SUITE")));
        assert!(!query.matches(&record("SINGLE")));

        let query = ListQuery::new().status("confirmed");
        assert!(!query.matches(&record("SUITE")));
    }

    #[test]
    fn guest_filter() {
        let query = ListQuery::new().guest_profile_id("guest-2");
        assert!(!query.matches(&record("SUITE")));
    }
}
