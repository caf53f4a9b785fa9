//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, ReservationError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::Reservation(reservation_err) => match reservation_err {
            ReservationError::InvalidStateTransition { .. }
            | ReservationError::InvalidRequestStateTransition { .. } => StatusCode::CONFLICT,
            ReservationError::SpecialRequestNotFound(_) => StatusCode::NOT_FOUND,
            ReservationError::MaxSpecialRequestsExceeded { .. }
            | ReservationError::InvalidPeriod(_)
            | ReservationError::EmptyDescription
            | ReservationError::InvalidEmail(_)
            | ReservationError::InvalidPhone(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ReservationError::UnknownValue { .. } => StatusCode::BAD_REQUEST,
        },
        DomainError::PolicyRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::ReservationNotFound(_) | DomainError::GuestNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DomainError::Gateway(_)
        | DomainError::Dispatch(_)
        | DomainError::Store(_)
        | DomainError::CorruptRecord { .. } => {
            tracing::error!(error = %err, "request failed on infrastructure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        ApiError::Domain(DomainError::Reservation(err))
    }
}

#[cfg(test)]
mod tests {
    use common::ReservationId;
    use domain::ReservationStatus;

    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_transition_errors_conflict() {
        let err = ReservationError::InvalidStateTransition {
            from: ReservationStatus::Cancelled,
            to: ReservationStatus::Confirmed,
        };
        assert_eq!(status_of(err.into()), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_and_validation() {
        assert_eq!(
            status_of(DomainError::ReservationNotFound(ReservationId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::PolicyRejected("check-in date is in the past".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(ReservationError::EmptyDescription.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_bad_request_for_unknown_values() {
        let err = ReservationError::UnknownValue {
            kind: "request type",
            value: "spa".into(),
        };
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }
}
