//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Business-rule
//! rejections (duplicate registration, capacity exceeded, unknown event) are
//! ordinary variants the caller must handle, not exceptional control flow.
//! Each variant maps to a specific HTTP status code and structured JSON
//! error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AttendeeId, EventId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "message": "event is at maximum capacity",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details (e.g. the offending field name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | Not Found/State | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
/// | 4000–4999 | Business Rule   | 409 Conflict / 422 Unprocessable Entity |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A request field failed validation.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Attendee with the given ID was not found.
    #[error("attendee not found: {0}")]
    AttendeeNotFound(AttendeeId),

    /// Another event already owns the slug derived from the title.
    #[error("another event with the same title already exists: {0}")]
    DuplicateSlug(String),

    /// The email is already registered for this event.
    #[error("this email is already registered for this event")]
    DuplicateRegistration,

    /// The event has reached its maximum number of attendees.
    #[error("event is at maximum capacity")]
    CapacityExceeded,

    /// The attendee has already been checked in.
    #[error("attendee {0} is already checked in")]
    AlreadyCheckedIn(AttendeeId),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation { .. } => 1001,
            Self::EventNotFound(_) => 2001,
            Self::AttendeeNotFound(_) => 2002,
            Self::DuplicateSlug(_) => 2003,
            Self::DuplicateRegistration => 4001,
            Self::CapacityExceeded => 4002,
            Self::AlreadyCheckedIn(_) => 4003,
            Self::Persistence(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::AttendeeNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateSlug(_) | Self::DuplicateRegistration | Self::AlreadyCheckedIn(_) => {
                StatusCode::CONFLICT
            }
            Self::CapacityExceeded => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server faults are logged with full detail and surfaced opaquely.
        let (message, details) = match &self {
            Self::Persistence(detail) | Self::Internal(detail) => {
                tracing::error!(code = self.error_code(), %detail, "server error");
                ("internal server error".to_string(), None)
            }
            Self::Validation { field, .. } => (self.to_string(), Some((*field).to_string())),
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message,
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rejections_map_to_client_statuses() {
        assert_eq!(
            ApiError::DuplicateRegistration.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::CapacityExceeded.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::EventNotFound(EventId::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::AlreadyCheckedIn(AttendeeId::from_i64(1)).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn server_faults_map_to_500() {
        assert_eq!(
            ApiError::Persistence("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_codes_stay_in_their_ranges() {
        assert_eq!(
            ApiError::Validation {
                field: "name",
                message: "too short".to_string(),
            }
            .error_code(),
            1001
        );
        assert_eq!(ApiError::DuplicateRegistration.error_code(), 4001);
        assert_eq!(ApiError::CapacityExceeded.error_code(), 4002);
        assert_eq!(ApiError::Persistence(String::new()).error_code(), 3001);
    }
}
