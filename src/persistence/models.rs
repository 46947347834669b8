//! Database records for events, attendees, and check-ins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AttendeeId, EventId};

/// An event row from the `events` table.
///
/// Created once and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique event identifier.
    pub id: EventId,
    /// Event title (minimum 4 characters).
    pub title: String,
    /// Optional free-text details.
    pub details: Option<String>,
    /// URL-safe identifier derived from the title, globally unique.
    pub slug: String,
    /// Attendance cap; `None` means unlimited.
    pub maximum_attendees: Option<i32>,
}

/// A new event to be inserted.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Identifier assigned by the caller (UUID v4).
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Optional free-text details.
    pub details: Option<String>,
    /// Pre-derived slug.
    pub slug: String,
    /// Attendance cap; `None` means unlimited.
    pub maximum_attendees: Option<i32>,
}

/// An attendee row from the `attendees` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeRecord {
    /// Identifier assigned by the store on admission.
    pub id: AttendeeId,
    /// Attendee name.
    pub name: String,
    /// Attendee email; unique per event.
    pub email: String,
    /// Event the attendee is registered for.
    pub event_id: EventId,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// A prospective attendee to be admitted.
#[derive(Debug, Clone)]
pub struct NewAttendee {
    /// Target event.
    pub event_id: EventId,
    /// Attendee name.
    pub name: String,
    /// Attendee email.
    pub email: String,
}

/// A check-in row from the `check_ins` table.
///
/// One-to-one companion to an attendee; created at most once and never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRecord {
    /// Attendee this check-in belongs to.
    pub attendee_id: AttendeeId,
    /// Check-in timestamp.
    pub created_at: DateTime<Utc>,
}

/// A row of the attendee listing: attendee fields joined with the optional
/// check-in timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeeListRow {
    /// Attendee identifier.
    pub id: AttendeeId,
    /// Attendee name.
    pub name: String,
    /// Attendee email.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Check-in timestamp, if the attendee has checked in.
    pub checked_in_at: Option<DateTime<Utc>>,
}
