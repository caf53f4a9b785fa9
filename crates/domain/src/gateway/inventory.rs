//! Inventory gateway trait and stub implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde::Serialize;

use super::GatewayError;
use crate::reservation::{Money, ReservationPeriod};

/// Availability of a room type for a given stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomAvailability {
    pub room_type: String,
    pub available_count: u32,
    pub price_per_night: Money,
}

impl RoomAvailability {
    pub fn is_available(&self) -> bool {
        self.available_count > 0
    }

    /// Price of the whole stay at the quoted nightly rate.
    pub fn total_for(&self, period: &ReservationPeriod) -> Money {
        self.price_per_night.times(period.nights())
    }
}

/// Descriptive data about a room type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomTypeInfo {
    pub room_type: String,
    pub description: String,
    pub capacity: u32,
    pub amenities: Vec<String>,
}

/// Read access to room inventory owned by the inventory context.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    async fn check_availability(
        &self,
        room_type: &str,
        period: &ReservationPeriod,
    ) -> Result<RoomAvailability, GatewayError>;

    async fn room_type_info(&self, room_type: &str) -> Result<RoomTypeInfo, GatewayError>;
}

/// Rooms of each type the stub reports unless overridden.
const DEFAULT_AVAILABLE_ROOMS: u32 = 10;

#[derive(Debug, Default)]
struct StubInventoryState {
    availability: HashMap<String, u32>,
    fail_on_check: bool,
}

/// Fixed inventory used until a real inventory context exists.
///
/// Every room type has ten rooms free on every date; tests can override the
/// count per room type or make the gateway fail.
#[derive(Debug, Clone, Default)]
pub struct StubInventoryGateway {
    state: Arc<RwLock<StubInventoryState>>,
}

impl StubInventoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the number of free rooms reported for a room type.
    pub fn set_available(&self, room_type: impl Into<String>, count: u32) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .availability
            .insert(room_type.into(), count);
    }

    /// Configures the gateway to fail availability checks until switched back.
    pub fn set_fail_on_check(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_check = fail;
    }

    fn price_for(room_type: &str) -> Money {
        match room_type {
            "SINGLE" => Money::from_dollars(150),
            "DOUBLE" => Money::from_dollars(250),
            "SUITE" => Money::from_dollars(500),
            _ => Money::from_dollars(200),
        }
    }
}

#[async_trait]
impl InventoryGateway for StubInventoryGateway {
    async fn check_availability(
        &self,
        room_type: &str,
        _period: &ReservationPeriod,
    ) -> Result<RoomAvailability, GatewayError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);

        if state.fail_on_check {
            return Err(GatewayError::InventoryUnavailable(
                "inventory service did not respond".to_string(),
            ));
        }

        let available_count = state
            .availability
            .get(room_type)
            .copied()
            .unwrap_or(DEFAULT_AVAILABLE_ROOMS);

        Ok(RoomAvailability {
            room_type: room_type.to_string(),
            available_count,
            price_per_night: Self::price_for(room_type),
        })
    }

    async fn room_type_info(&self, room_type: &str) -> Result<RoomTypeInfo, GatewayError> {
        let (description, capacity, amenities): (&str, u32, &[&str]) = match room_type {
            "SINGLE" => ("Standard single room", 1, &["wifi", "tv"][..]),
            "DOUBLE" => ("Comfortable double room", 2, &["wifi", "tv", "minibar"][..]),
            "SUITE" => (
                "Luxury suite",
                4,
                &["wifi", "tv", "minibar", "jacuzzi", "balcony"][..],
            ),
            _ => ("Unknown room type", 2, &["wifi"][..]),
        };

        Ok(RoomTypeInfo {
            room_type: room_type.to_string(),
            description: description.to_string(),
            capacity,
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
        })
    }
}
