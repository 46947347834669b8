//! Attendee handlers: registration, listing, badge, and check-in.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    AttendeeDto, AttendeeListParams, AttendeeListResponse, BadgeResponse, CheckInResponse,
    RegisterAttendeeRequest, RegisterAttendeeResponse,
};
use crate::app_state::AppState;
use crate::domain::{AttendeeId, EventId};
use crate::error::{ApiError, ErrorResponse};

/// `POST /events/{event_id}/attendees` — Register an attendee.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid input, an unknown event, a duplicate
/// email, or a full event.
#[utoipa::path(
    post,
    path = "/api/v1/events/{event_id}/attendees",
    tag = "Attendees",
    summary = "Register for an event",
    description = "Admits an attendee unless the email is already registered for the event or the event is at capacity.",
    params(
        ("event_id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = RegisterAttendeeRequest,
    responses(
        (status = 201, description = "Attendee registered", body = RegisterAttendeeResponse),
        (status = 400, description = "Invalid name or email", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Email already registered for this event", body = ErrorResponse),
        (status = 422, description = "Event is at maximum capacity", body = ErrorResponse),
    )
)]
pub async fn register_attendee(
    State(state): State<AppState>,
    Path(event_id): Path<uuid::Uuid>,
    Json(req): Json<RegisterAttendeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_name(&req.name)?;
    validate_email(&req.email)?;

    let attendee_id = state
        .registration_service
        .register(EventId::from_uuid(event_id), &req.name, &req.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterAttendeeResponse { attendee_id }),
    ))
}

/// `GET /events/{event_id}/attendees` — List event attendees.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{event_id}/attendees",
    tag = "Attendees",
    summary = "List event attendees",
    description = "Returns one page of 10 attendees, newest registration first, optionally filtered by a name substring.",
    params(
        ("event_id" = uuid::Uuid, Path, description = "Event UUID"),
        AttendeeListParams,
    ),
    responses(
        (status = 200, description = "Attendee page", body = AttendeeListResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_attendees(
    State(state): State<AppState>,
    Path(event_id): Path<uuid::Uuid>,
    Query(params): Query<AttendeeListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (rows, total) = state
        .event_service
        .list_attendees(
            EventId::from_uuid(event_id),
            params.page_index,
            params.query.as_deref(),
        )
        .await?;

    Ok(Json(AttendeeListResponse {
        attendees: rows.into_iter().map(AttendeeDto::from).collect(),
        total,
    }))
}

/// `GET /attendees/{attendee_id}/badge` — Get an attendee badge.
///
/// # Errors
///
/// Returns [`ApiError::AttendeeNotFound`] if the attendee does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/attendees/{attendee_id}/badge",
    tag = "Attendees",
    summary = "Get an attendee badge",
    description = "Returns the attendee's badge: name, email, event title, and the check-in URL to encode as a QR code.",
    params(
        ("attendee_id" = i64, Path, description = "Attendee ID"),
    ),
    responses(
        (status = 200, description = "Attendee badge", body = BadgeResponse),
        (status = 404, description = "Attendee not found", body = ErrorResponse),
    )
)]
pub async fn get_attendee_badge(
    State(state): State<AppState>,
    Path(attendee_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let badge = state
        .event_service
        .badge(AttendeeId::from_i64(attendee_id), &state.public_base_url)
        .await?;

    Ok(Json(BadgeResponse {
        badge: badge.into(),
    }))
}

/// `GET /attendees/{attendee_id}/check-in` — Check an attendee in.
///
/// One-time and irreversible; meant to be reached by following the badge's
/// check-in URL.
///
/// # Errors
///
/// Returns [`ApiError`] if the attendee does not exist or is already
/// checked in.
#[utoipa::path(
    get,
    path = "/api/v1/attendees/{attendee_id}/check-in",
    tag = "Attendees",
    summary = "Check an attendee in",
    description = "Marks the attendee's physical attendance. A second call is rejected.",
    params(
        ("attendee_id" = i64, Path, description = "Attendee ID"),
    ),
    responses(
        (status = 201, description = "Attendee checked in", body = CheckInResponse),
        (status = 404, description = "Attendee not found", body = ErrorResponse),
        (status = 409, description = "Attendee already checked in", body = ErrorResponse),
    )
)]
pub async fn check_in_attendee(
    State(state): State<AppState>,
    Path(attendee_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .event_service
        .check_in(AttendeeId::from_i64(attendee_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            checked_in_at: record.created_at,
        }),
    ))
}

/// Attendee routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{event_id}/attendees",
            get(list_attendees).post(register_attendee),
        )
        .route("/attendees/{attendee_id}/badge", get(get_attendee_badge))
        .route("/attendees/{attendee_id}/check-in", get(check_in_attendee))
}

// ── Validation Helpers ──────────────────────────────────────────────────

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().chars().count() < 4 {
        return Err(ApiError::Validation {
            field: "name",
            message: "must be at least 4 characters".to_string(),
        });
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && domain
                .rsplit_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !email.chars().any(char::is_whitespace)
    });

    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation {
            field: "email",
            message: "must be a valid email address".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_rejected() {
        assert!(validate_name("Al").is_err());
        assert!(validate_name("  Al  ").is_err());
        assert!(validate_name("Alice Smith").is_ok());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "alice@",
            "alice@example",
            "alice@@example.com",
            "alice smith@example.com",
            "alice@.com",
            "alice@example.",
        ] {
            assert!(validate_email(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn well_formed_emails_are_accepted() {
        for good in [
            "alice@example.com",
            "alice.smith+unite@mail.example.org",
            "a@b.co",
        ] {
            assert!(validate_email(good).is_ok(), "rejected: {good}");
        }
    }
}
