pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod record;
pub mod store;

pub use common::{PaginatedResult, Pagination, ReservationId};
pub use error::{Result, StoreError};
pub use memory::InMemoryReservationStore;
pub use postgres::PostgresReservationStore;
pub use query::ListQuery;
pub use record::{ReservationRecord, SpecialRequestRecord};
pub use store::ReservationStore;
