//! Shared types for the reservation system.

pub mod pagination;
pub mod types;

pub use pagination::{PaginatedResult, Pagination};
pub use types::{GuestProfileId, ReservationId, SpecialRequestId};
