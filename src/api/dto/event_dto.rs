//! Event-related DTOs for create and get operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EventId;
use crate::persistence::models::EventRecord;

/// Request body for `POST /events`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Event title (minimum 4 characters).
    pub title: String,
    /// Optional free-text details.
    #[serde(default)]
    pub details: Option<String>,
    /// Optional attendance cap (positive). Absent means unlimited.
    #[serde(default)]
    pub maximum_attendees: Option<i32>,
}

/// Response body for `POST /events` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateEventResponse {
    /// Identifier of the newly created event.
    pub event_id: EventId,
}

/// Event representation returned by `GET /events/{event_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventDto {
    /// Event identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Optional free-text details.
    pub details: Option<String>,
    /// URL-safe identifier derived from the title.
    pub slug: String,
    /// Attendance cap; `null` means unlimited.
    pub maximum_attendees: Option<i32>,
    /// Current number of registered attendees.
    pub attendees_count: i64,
}

impl EventDto {
    /// Builds the DTO from a stored record and its attendee count.
    #[must_use]
    pub fn from_record(record: EventRecord, attendees_count: i64) -> Self {
        Self {
            id: record.id,
            title: record.title,
            details: record.details,
            slug: record.slug,
            maximum_attendees: record.maximum_attendees,
            attendees_count,
        }
    }
}

/// Response envelope for `GET /events/{event_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventDetailResponse {
    /// The requested event.
    pub event: EventDto,
}
