//! Room type lookup endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use domain::{KNOWN_ROOM_TYPES, RoomTypeInfo};
use reservation_store::ReservationStore;

use crate::AppState;
use crate::error::ApiError;

/// GET /room-types/{room_type}: capacity, description and amenities.
#[tracing::instrument(skip(state))]
pub async fn get<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(room_type): Path<String>,
) -> Result<Json<RoomTypeInfo>, ApiError> {
    let room_type = room_type.to_uppercase();
    if !KNOWN_ROOM_TYPES.contains(&room_type.as_str()) {
        return Err(ApiError::NotFound(format!("Room type {room_type} not found")));
    }
    Ok(Json(state.service.room_type_info(&room_type).await?))
}
