//! Guest gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::GuestProfileId;
use serde::{Deserialize, Serialize};

use super::GatewayError;
use crate::reservation::{Email, Phone, ReservationError};

/// Loyalty programme tier of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyTier {
    /// Gold and Platinum members are treated as VIPs.
    pub fn is_vip(&self) -> bool {
        matches!(self, LoyaltyTier::Gold | LoyaltyTier::Platinum)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "bronze",
            LoyaltyTier::Silver => "silver",
            LoyaltyTier::Gold => "gold",
            LoyaltyTier::Platinum => "platinum",
        }
    }
}

impl std::str::FromStr for LoyaltyTier {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bronze" => Ok(LoyaltyTier::Bronze),
            "silver" => Ok(LoyaltyTier::Silver),
            "gold" => Ok(LoyaltyTier::Gold),
            "platinum" => Ok(LoyaltyTier::Platinum),
            other => Err(ReservationError::UnknownValue {
                kind: "loyalty tier",
                value: other.to_string(),
            }),
        }
    }
}

/// What the reservation context knows about a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestInfo {
    pub guest_profile_id: GuestProfileId,
    pub full_name: String,
    pub email: Email,
    pub phone: Phone,
    pub document: String,
    pub is_vip: bool,
}

/// A guest profile as the guest context stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestProfile {
    pub id: GuestProfileId,
    pub full_name: String,
    pub email: Email,
    pub phone: Phone,
    pub document: String,
    pub loyalty_tier: LoyaltyTier,
}

impl GuestProfile {
    pub fn new(
        id: impl Into<GuestProfileId>,
        full_name: impl Into<String>,
        email: Email,
        phone: Phone,
        document: impl Into<String>,
        loyalty_tier: LoyaltyTier,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email,
            phone,
            document: document.into(),
            loyalty_tier,
        }
    }

    pub fn to_info(&self) -> GuestInfo {
        GuestInfo {
            guest_profile_id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            document: self.document.clone(),
            is_vip: self.loyalty_tier.is_vip(),
        }
    }
}

/// Read access to guest profiles owned by the guest context.
#[async_trait]
pub trait GuestGateway: Send + Sync {
    /// Looks up a guest. `Ok(None)` means the profile does not exist.
    async fn find_by_id(&self, id: &GuestProfileId) -> Result<Option<GuestInfo>, GatewayError>;
}

#[derive(Debug, Default)]
struct InMemoryGuestState {
    profiles: HashMap<GuestProfileId, GuestProfile>,
    fail_on_lookup: bool,
}

/// In-memory guest directory for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGuestGateway {
    state: Arc<RwLock<InMemoryGuestState>>,
}

impl InMemoryGuestGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a profile and returns its id.
    pub fn register(&self, profile: GuestProfile) -> GuestProfileId {
        let id = profile.id.clone();
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .profiles
            .insert(id.clone(), profile);
        id
    }

    /// Configures the gateway to fail every lookup until switched back.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_lookup = fail;
    }

    pub fn guest_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .profiles
            .len()
    }
}

#[async_trait]
impl GuestGateway for InMemoryGuestGateway {
    async fn find_by_id(&self, id: &GuestProfileId) -> Result<Option<GuestInfo>, GatewayError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);

        if state.fail_on_lookup {
            return Err(GatewayError::GuestUnavailable(
                "guest directory is offline".to_string(),
            ));
        }

        Ok(state.profiles.get(id).map(GuestProfile::to_info))
    }
}
