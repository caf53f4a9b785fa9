//! Integration events for the reservation context.
//!
//! Domain events stay inside the reservation context. This crate turns the
//! ones other contexts care about into self-contained integration events:
//! - `ReservationConfirmed` for inventory and notifications
//! - `GuestCheckedIn` and `GuestCheckedOut` for housekeeping and billing
//! - `ReservationCancelled` so inventory can release the room
//!
//! [`IntegrationEventTranslator`] is an [`domain::EventDispatcher`], so it
//! plugs straight into the reservation service.

pub mod error;
pub mod events;
pub mod publisher;
pub mod translator;

pub use error::IntegrationError;
pub use events::{
    GuestCheckedInPayload, GuestCheckedOutPayload, IntegrationEvent, ReservationCancelledPayload,
    ReservationConfirmedPayload,
};
pub use publisher::{InMemoryPublisher, IntegrationEventPublisher, LoggingPublisher};
pub use translator::IntegrationEventTranslator;
