//! Event handlers: create and get.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateEventRequest, CreateEventResponse, EventDetailResponse, EventDto};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ApiError, ErrorResponse};

/// `POST /events` — Create a new event.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid input or a duplicate title slug.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event with a slug derived from the title. Titles that derive an already-taken slug are rejected.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = CreateEventResponse),
        (status = 400, description = "Invalid title or capacity", body = ErrorResponse),
        (status = 409, description = "Another event with the same title exists", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_title(&req.title)?;
    validate_maximum_attendees(req.maximum_attendees)?;

    let record = state
        .event_service
        .create_event(req.title, req.details, req.maximum_attendees)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            event_id: record.id,
        }),
    ))
}

/// `GET /events/{event_id}` — Get event details with attendee count.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{event_id}",
    tag = "Events",
    summary = "Get an event",
    description = "Returns the event together with its current number of registered attendees.",
    params(
        ("event_id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventDetailResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = EventId::from_uuid(event_id);
    let (record, attendees_count) = state.event_service.get_event(event_id).await?;

    Ok(Json(EventDetailResponse {
        event: EventDto::from_record(record, attendees_count),
    }))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/{event_id}", get(get_event))
}

// ── Validation Helpers ──────────────────────────────────────────────────

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().chars().count() < 4 {
        return Err(ApiError::Validation {
            field: "title",
            message: "must be at least 4 characters".to_string(),
        });
    }
    Ok(())
}

fn validate_maximum_attendees(maximum_attendees: Option<i32>) -> Result<(), ApiError> {
    if let Some(max) = maximum_attendees
        && max <= 0
    {
        return Err(ApiError::Validation {
            field: "maximum_attendees",
            message: "must be a positive integer".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_are_rejected() {
        assert!(validate_title("abc").is_err());
        assert!(validate_title("   abc   ").is_err());
        assert!(validate_title("abcd").is_ok());
    }

    #[test]
    fn capacity_must_be_positive() {
        assert!(validate_maximum_attendees(Some(0)).is_err());
        assert!(validate_maximum_attendees(Some(-5)).is_err());
        assert!(validate_maximum_attendees(Some(1)).is_ok());
        assert!(validate_maximum_attendees(None).is_ok());
    }
}
