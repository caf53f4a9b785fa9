//! Demo guest profiles for local runs.

use common::GuestProfileId;
use domain::{Email, GuestProfile, InMemoryGuestGateway, LoyaltyTier, Phone, ReservationError};

const DEMO_GUESTS: [(&str, &str, &str, &str, LoyaltyTier); 5] = [
    ("Alice Johnson", "alice@example.com", "+5511999990001", "11122233344", LoyaltyTier::Bronze),
    ("Bob Williams", "bob.vip@example.com", "+5511999990002", "55566677788", LoyaltyTier::Platinum),
    ("Carol Davis", "carol@example.com", "+5511999990003", "99988877766", LoyaltyTier::Silver),
    ("David Martinez", "david.m@example.com", "+5511999990004", "33344455566", LoyaltyTier::Gold),
    ("Eva Thompson", "eva.t@example.com", "+5511999990005", "77788899900", LoyaltyTier::Bronze),
];

/// A seeded guest: their email and the id to book with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededGuest {
    pub email: String,
    pub guest_profile_id: GuestProfileId,
    pub is_vip: bool,
}

/// Registers the demo guests and returns their ids.
pub fn seed_demo_guests(
    guests: &InMemoryGuestGateway,
) -> Result<Vec<SeededGuest>, ReservationError> {
    DEMO_GUESTS
        .iter()
        .map(|(name, email, phone, document, tier)| -> Result<SeededGuest, ReservationError> {
            let profile = GuestProfile::new(
                uuid::Uuid::new_v4().to_string(),
                *name,
                Email::new(*email)?,
                Phone::new(*phone)?,
                *document,
                *tier,
            );
            let guest_profile_id = guests.register(profile);
            tracing::info!(%guest_profile_id, email = *email, "seeded demo guest");
            Ok(SeededGuest {
                email: email.to_string(),
                guest_profile_id,
                is_vip: tier.is_vip(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_five_guests_with_two_vips() {
        let guests = InMemoryGuestGateway::new();
        let seeded = seed_demo_guests(&guests).unwrap();

        assert_eq!(seeded.len(), 5);
        assert_eq!(guests.guest_count(), 5);
        assert_eq!(seeded.iter().filter(|g| g.is_vip).count(), 2);
    }
}
