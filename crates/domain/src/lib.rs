//! Domain layer of the hotel reservation context.
//!
//! This crate provides:
//! - The `Reservation` aggregate with its status state machine and special requests
//! - Domain events, recorded on the aggregate and drained after each save
//! - The booking policy (minimum stay, advance window, VIP rule, availability)
//! - Gateway traits for the guest and inventory contexts, with in-memory adapters
//! - `ReservationService`, which runs commands and queries end to end

pub mod aggregate;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod reservation;

pub use aggregate::{AggregateRoot, DomainEvent, EventBuffer};
pub use command::{Command, CommandHandler, CommandResult};
pub use dispatch::{DispatchError, EventDispatcher, InMemoryEventDispatcher};
pub use error::DomainError;
pub use gateway::{
    GatewayError, GuestGateway, GuestInfo, GuestProfile, InMemoryGuestGateway, InventoryGateway,
    LoyaltyTier, RoomAvailability, RoomTypeInfo, StubInventoryGateway,
};
pub use reservation::{
    AddSpecialRequest, CancelReservation, CancelSpecialRequest, ChangeSpecialRequestDescription,
    CheckInGuest, CheckOutGuest, ConfirmReservation, CreateReservation, Eligibility, Email,
    FulfillSpecialRequest, KNOWN_ROOM_TYPES, MAX_SPECIAL_REQUESTS, Money, Phone, PolicyConfig,
    RemoveSpecialRequest, RequestStatus, RequestType, Reservation, ReservationError,
    ReservationEvent, ReservationFilter, ReservationPeriod, ReservationPolicy,
    ReservationReadModel, ReservationRepository, ReservationService, ReservationStatus,
    SpecialRequest, StoreRepository,
};
