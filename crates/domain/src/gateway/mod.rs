//! Gateways to data owned by other bounded contexts.
//!
//! The reservation core only sees these traits. The adapters next to them
//! hold their data in memory and are used by tests and local runs.

mod guest;
mod inventory;

pub use guest::{GuestGateway, GuestInfo, GuestProfile, InMemoryGuestGateway, LoyaltyTier};
pub use inventory::{InventoryGateway, RoomAvailability, RoomTypeInfo, StubInventoryGateway};

use thiserror::Error;

/// Failure talking to another context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Guest context unavailable: {0}")]
    GuestUnavailable(String),

    #[error("Inventory context unavailable: {0}")]
    InventoryUnavailable(String),

    /// The other context returned data this context cannot accept.
    #[error("Invalid data from {context} context: {reason}")]
    InvalidData {
        context: &'static str,
        reason: String,
    },
}
