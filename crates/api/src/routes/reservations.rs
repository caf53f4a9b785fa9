//! Reservation command and query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{PaginatedResult, Pagination, ReservationId, SpecialRequestId};
use domain::{
    AddSpecialRequest, CancelReservation, CheckInGuest, CheckOutGuest, ConfirmReservation,
    CreateReservation, FulfillSpecialRequest, RemoveSpecialRequest, RequestType,
    ReservationFilter, ReservationReadModel, ReservationStatus,
};
use reservation_store::ReservationStore;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub guest_profile_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: String,
}

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub room_number: String,
}

#[derive(Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

#[derive(Deserialize)]
pub struct AddSpecialRequestRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub status: Option<String>,
    pub room_type: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct SpecialRequestCreatedResponse {
    pub message: &'static str,
    pub request_id: String,
}

// -- Handlers --

/// POST /reservations: book a room for a known guest.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationReadModel>), ApiError> {
    if req.room_type.trim().is_empty() {
        return Err(ApiError::BadRequest("room_type is required".to_string()));
    }

    let cmd = CreateReservation::new(
        req.guest_profile_id.as_str(),
        req.check_in,
        req.check_out,
        req.room_type.trim().to_uppercase(),
    );
    let result = state.service.create_reservation(cmd).await?;
    let view = state.service.get_reservation(result.reservation.id()).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /reservations: list reservations, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResult<ReservationReadModel>>, ApiError> {
    let mut filter = ReservationFilter::new();
    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        filter = filter.status(status.parse::<ReservationStatus>()?);
    }
    if let Some(room_type) = params.room_type.as_deref().filter(|s| !s.is_empty()) {
        filter = filter.room_type(room_type.to_uppercase());
    }
    let pagination = Pagination::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(Pagination::DEFAULT_PER_PAGE),
    );

    let page = state.service.list_reservations(filter, pagination).await?;
    Ok(Json(page))
}

/// GET /reservations/{id}: one reservation with guest details.
#[tracing::instrument(skip(state))]
pub async fn get<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ReservationReadModel>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    Ok(Json(state.service.get_reservation(reservation_id).await?))
}

/// POST /reservations/{id}/confirm
#[tracing::instrument(skip(state))]
pub async fn confirm<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    state
        .service
        .confirm_reservation(ConfirmReservation::new(reservation_id))
        .await?;
    Ok(message("Reservation confirmed."))
}

/// POST /reservations/{id}/check-in
#[tracing::instrument(skip(state, req))]
pub async fn check_in<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<CheckInRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    if req.room_number.trim().is_empty() {
        return Err(ApiError::BadRequest("room_number is required".to_string()));
    }
    state
        .service
        .check_in_guest(CheckInGuest::new(reservation_id, req.room_number.trim()))
        .await?;
    Ok(message("Guest checked in."))
}

/// POST /reservations/{id}/check-out
#[tracing::instrument(skip(state))]
pub async fn check_out<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    state
        .service
        .check_out_guest(CheckOutGuest::new(reservation_id))
        .await?;
    Ok(message("Guest checked out."))
}

/// POST /reservations/{id}/cancel
#[tracing::instrument(skip(state, req))]
pub async fn cancel<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    state
        .service
        .cancel_reservation(CancelReservation::new(reservation_id, req.reason))
        .await?;
    Ok(message("Reservation cancelled."))
}

/// POST /reservations/{id}/special-requests
#[tracing::instrument(skip(state, req))]
pub async fn add_special_request<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<AddSpecialRequestRequest>,
) -> Result<(StatusCode, Json<SpecialRequestCreatedResponse>), ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    let request_type: RequestType = req.request_type.parse()?;

    let (request_id, _) = state
        .service
        .add_special_request(AddSpecialRequest::new(
            reservation_id,
            request_type,
            req.description,
        ))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SpecialRequestCreatedResponse {
            message: "Special request added.",
            request_id: request_id.to_string(),
        }),
    ))
}

/// POST /reservations/{id}/special-requests/{request_id}/fulfill
#[tracing::instrument(skip(state))]
pub async fn fulfill_special_request<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, request_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    let request_id = parse_request_id(&request_id)?;
    state
        .service
        .fulfill_special_request(FulfillSpecialRequest::new(reservation_id, request_id))
        .await?;
    Ok(message("Special request fulfilled."))
}

/// DELETE /reservations/{id}/special-requests/{request_id}
#[tracing::instrument(skip(state))]
pub async fn remove_special_request<S: ReservationStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, request_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    let request_id = parse_request_id(&request_id)?;
    state
        .service
        .remove_special_request(RemoveSpecialRequest::new(reservation_id, request_id))
        .await?;
    Ok(message("Special request removed."))
}

fn message(message: &'static str) -> Json<MessageResponse> {
    Json(MessageResponse { message })
}

fn parse_reservation_id(id: &str) -> Result<ReservationId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid reservation ID: {e}")))
}

fn parse_request_id(id: &str) -> Result<SpecialRequestId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid special request ID: {e}")))
}
