//! PostgreSQL implementation of the persistence gateway.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{AttendeeListRow, AttendeeRecord, CheckInRecord, EventRecord, NewAttendee, NewEvent};
use super::{ATTENDEES_PAGE_SIZE, EventStore};
use crate::domain::{AttendeeId, EventId};
use crate::error::ApiError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Admission runs inside a transaction that locks the event row
/// (`SELECT ... FOR UPDATE`), so concurrent admissions for the same event
/// serialize and the capacity bound cannot be overrun. The
/// `UNIQUE (event_id, email)` constraint backs the duplicate-registration
/// rejection.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PostgresStore {
    async fn insert_event(&self, event: NewEvent) -> Result<EventRecord, ApiError> {
        sqlx::query(
            "INSERT INTO events (id, title, details, slug, maximum_attendees) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(*event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.details)
        .bind(&event.slug)
        .bind(event.maximum_attendees)
        .execute(&self.pool)
        .await
        .map_err(|e| match db_code(&e).as_deref() {
            Some(UNIQUE_VIOLATION) => ApiError::DuplicateSlug(event.slug.clone()),
            _ => ApiError::Persistence(e.to_string()),
        })?;

        Ok(EventRecord {
            id: event.id,
            title: event.title,
            details: event.details,
            slug: event.slug,
            maximum_attendees: event.maximum_attendees,
        })
    }

    async fn event_by_id(&self, id: EventId) -> Result<Option<EventRecord>, ApiError> {
        let row = sqlx::query_as::<_, (Uuid, String, Option<String>, String, Option<i32>)>(
            "SELECT id, title, details, slug, maximum_attendees FROM events WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(row.map(event_record))
    }

    async fn event_by_slug(&self, slug: &str) -> Result<Option<EventRecord>, ApiError> {
        let row = sqlx::query_as::<_, (Uuid, String, Option<String>, String, Option<i32>)>(
            "SELECT id, title, details, slug, maximum_attendees FROM events WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(row.map(event_record))
    }

    async fn attendee_by_id(&self, id: AttendeeId) -> Result<Option<AttendeeRecord>, ApiError> {
        let row = sqlx::query_as::<_, (i64, String, String, Uuid, DateTime<Utc>)>(
            "SELECT id, name, email, event_id, created_at FROM attendees WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(row.map(attendee_record))
    }

    async fn attendee_by_event_and_email(
        &self,
        event_id: EventId,
        email: &str,
    ) -> Result<Option<AttendeeRecord>, ApiError> {
        let row = sqlx::query_as::<_, (i64, String, String, Uuid, DateTime<Utc>)>(
            "SELECT id, name, email, event_id, created_at FROM attendees \
             WHERE event_id = $1 AND email = $2",
        )
        .bind(*event_id.as_uuid())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(row.map(attendee_record))
    }

    async fn count_attendees(&self, event_id: EventId) -> Result<i64, ApiError> {
        sqlx::query_scalar::<_, i64>("SELECT count(*) FROM attendees WHERE event_id = $1")
            .bind(*event_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))
    }

    async fn admit_attendee(&self, attendee: NewAttendee) -> Result<AttendeeRecord, ApiError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        // Lock the event row so concurrent admissions for this event
        // serialize behind us until commit.
        let maximum_attendees = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT maximum_attendees FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(*attendee.event_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| ApiError::Persistence(e.to_string()))?
        .ok_or(ApiError::EventNotFound(attendee.event_id))?;

        if let Some(max) = maximum_attendees {
            let count = sqlx::query_scalar::<_, i64>(
                "SELECT count(*) FROM attendees WHERE event_id = $1",
            )
            .bind(*attendee.event_id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

            if count >= i64::from(max) {
                return Err(ApiError::CapacityExceeded);
            }
        }

        let (id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "INSERT INTO attendees (name, email, event_id) VALUES ($1, $2, $3) \
             RETURNING id, created_at",
        )
        .bind(&attendee.name)
        .bind(&attendee.email)
        .bind(*attendee.event_id.as_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match db_code(&e).as_deref() {
            Some(UNIQUE_VIOLATION) => ApiError::DuplicateRegistration,
            Some(FOREIGN_KEY_VIOLATION) => ApiError::EventNotFound(attendee.event_id),
            _ => ApiError::Persistence(e.to_string()),
        })?;

        tx.commit()
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        Ok(AttendeeRecord {
            id: AttendeeId::from_i64(id),
            name: attendee.name,
            email: attendee.email,
            event_id: attendee.event_id,
            created_at,
        })
    }

    async fn list_attendees(
        &self,
        event_id: EventId,
        page_index: u32,
        query: Option<&str>,
    ) -> Result<(Vec<AttendeeListRow>, i64), ApiError> {
        let offset = i64::from(page_index) * ATTENDEES_PAGE_SIZE;

        let (rows, total) = if let Some(q) = query {
            let pattern = format!("%{q}%");
            let rows = sqlx::query_as::<_, (i64, String, String, DateTime<Utc>, Option<DateTime<Utc>>)>(
                "SELECT a.id, a.name, a.email, a.created_at, c.created_at \
                 FROM attendees a LEFT JOIN check_ins c ON c.attendee_id = a.id \
                 WHERE a.event_id = $1 AND a.name ILIKE $2 \
                 ORDER BY a.created_at DESC, a.id DESC LIMIT $3 OFFSET $4",
            )
            .bind(*event_id.as_uuid())
            .bind(&pattern)
            .bind(ATTENDEES_PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await;

            let total = sqlx::query_scalar::<_, i64>(
                "SELECT count(*) FROM attendees WHERE event_id = $1 AND name ILIKE $2",
            )
            .bind(*event_id.as_uuid())
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await;

            (rows, total)
        } else {
            let rows = sqlx::query_as::<_, (i64, String, String, DateTime<Utc>, Option<DateTime<Utc>>)>(
                "SELECT a.id, a.name, a.email, a.created_at, c.created_at \
                 FROM attendees a LEFT JOIN check_ins c ON c.attendee_id = a.id \
                 WHERE a.event_id = $1 \
                 ORDER BY a.created_at DESC, a.id DESC LIMIT $2 OFFSET $3",
            )
            .bind(*event_id.as_uuid())
            .bind(ATTENDEES_PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await;

            let total =
                sqlx::query_scalar::<_, i64>("SELECT count(*) FROM attendees WHERE event_id = $1")
                    .bind(*event_id.as_uuid())
                    .fetch_one(&self.pool)
                    .await;

            (rows, total)
        };

        let rows = rows.map_err(|e| ApiError::Persistence(e.to_string()))?;
        let total = total.map_err(|e| ApiError::Persistence(e.to_string()))?;

        let listing = rows
            .into_iter()
            .map(|(id, name, email, created_at, checked_in_at)| AttendeeListRow {
                id: AttendeeId::from_i64(id),
                name,
                email,
                created_at,
                checked_in_at,
            })
            .collect();

        Ok((listing, total))
    }

    async fn check_in(&self, attendee_id: AttendeeId) -> Result<CheckInRecord, ApiError> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "INSERT INTO check_ins (attendee_id) VALUES ($1) RETURNING created_at",
        )
        .bind(attendee_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match db_code(&e).as_deref() {
            Some(UNIQUE_VIOLATION) => ApiError::AlreadyCheckedIn(attendee_id),
            Some(FOREIGN_KEY_VIOLATION) => ApiError::AttendeeNotFound(attendee_id),
            _ => ApiError::Persistence(e.to_string()),
        })?;

        Ok(CheckInRecord {
            attendee_id,
            created_at,
        })
    }
}

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Extracts the SQLSTATE code from a sqlx error, if any.
fn db_code(e: &sqlx::Error) -> Option<String> {
    e.as_database_error()
        .and_then(|d| d.code().map(|c| c.into_owned()))
}

fn event_record(row: (Uuid, String, Option<String>, String, Option<i32>)) -> EventRecord {
    let (id, title, details, slug, maximum_attendees) = row;
    EventRecord {
        id: EventId::from_uuid(id),
        title,
        details,
        slug,
        maximum_attendees,
    }
}

fn attendee_record(row: (i64, String, String, Uuid, DateTime<Utc>)) -> AttendeeRecord {
    let (id, name, email, event_id, created_at) = row;
    AttendeeRecord {
        id: AttendeeId::from_i64(id),
        name,
        email,
        event_id: EventId::from_uuid(event_id),
        created_at,
    }
}
