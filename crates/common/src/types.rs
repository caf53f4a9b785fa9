use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a reservation aggregate.
///
/// Wraps a UUID so reservation IDs cannot be confused with special request
/// IDs or guest profile references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Creates a new random reservation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a reservation ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ReservationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ReservationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ReservationId> for Uuid {
    fn from(id: ReservationId) -> Self {
        id.0
    }
}

/// Unique identifier for a special request inside a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialRequestId(Uuid);

impl SpecialRequestId {
    /// Creates a new random special request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SpecialRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SpecialRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SpecialRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for SpecialRequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Opaque reference to a guest profile owned by the Guest context.
///
/// The Reservation context never interprets this value; it is only handed
/// back to the guest gateway for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestProfileId(String);

impl GuestProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuestProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GuestProfileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GuestProfileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for GuestProfileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_id_new_creates_unique_ids() {
        let id1 = ReservationId::new();
        let id2 = ReservationId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn reservation_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = ReservationId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn reservation_id_parses_from_string() {
        let id = ReservationId::new();
        let parsed: ReservationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<ReservationId>().is_err());
    }

    #[test]
    fn special_request_id_serializes_as_plain_uuid() {
        let id = SpecialRequestId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }

    #[test]
    fn guest_profile_id_is_opaque_string() {
        let id: GuestProfileId = "guest-42".into();
        assert_eq!(id.as_str(), "guest-42");
        assert_eq!(id.to_string(), "guest-42");
    }
}
