//! Attendee-related DTOs: registration, listing, badge, and check-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AttendeeId;
use crate::persistence::models::AttendeeListRow;
use crate::service::Badge;

/// Request body for `POST /events/{event_id}/attendees`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterAttendeeRequest {
    /// Attendee name (minimum 4 characters).
    pub name: String,
    /// Attendee email (must be syntactically valid).
    pub email: String,
}

/// Response body for `POST /events/{event_id}/attendees` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterAttendeeResponse {
    /// Identifier of the newly admitted attendee.
    pub attendee_id: AttendeeId,
}

/// One attendee row in the listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendeeDto {
    /// Attendee identifier.
    pub id: AttendeeId,
    /// Attendee name.
    pub name: String,
    /// Attendee email.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Check-in timestamp, `null` until the attendee checks in.
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<AttendeeListRow> for AttendeeDto {
    fn from(row: AttendeeListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            checked_in_at: row.checked_in_at,
        }
    }
}

/// Response body for `GET /events/{event_id}/attendees`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendeeListResponse {
    /// One page of attendees, newest registration first.
    pub attendees: Vec<AttendeeDto>,
    /// Total number of attendees matching the filter.
    pub total: i64,
}

/// Badge payload for `GET /attendees/{attendee_id}/badge`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeDto {
    /// Attendee name.
    pub name: String,
    /// Attendee email.
    pub email: String,
    /// Title of the event the attendee is registered for.
    pub event_title: String,
    /// Absolute URL that performs the attendee's check-in when followed.
    pub check_in_url: String,
}

impl From<Badge> for BadgeDto {
    fn from(badge: Badge) -> Self {
        Self {
            name: badge.name,
            email: badge.email,
            event_title: badge.event_title,
            check_in_url: badge.check_in_url,
        }
    }
}

/// Response envelope for `GET /attendees/{attendee_id}/badge`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeResponse {
    /// The assembled badge.
    pub badge: BadgeDto,
}

/// Response body for `GET /attendees/{attendee_id}/check-in` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckInResponse {
    /// Timestamp at which the attendee was checked in.
    pub checked_in_at: DateTime<Utc>,
}
