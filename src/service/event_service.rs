//! Event service: creation, lookup, attendee listing, badges, and check-in.

use std::sync::Arc;

use crate::domain::{AttendeeId, EventId, slugify};
use crate::error::ApiError;
use crate::persistence::EventStore;
use crate::persistence::models::{
    AttendeeListRow, CheckInRecord, EventRecord, NewEvent,
};

/// A derived, read-only badge view for an attendee.
///
/// Combines attendee and event data plus a constructed check-in URL; never
/// persisted.
#[derive(Debug, Clone)]
pub struct Badge {
    /// Attendee name.
    pub name: String,
    /// Attendee email.
    pub email: String,
    /// Title of the event the attendee is registered for.
    pub event_title: String,
    /// Absolute URL that performs the attendee's check-in when followed.
    pub check_in_url: String,
}

/// Orchestration layer for everything around the registration engine:
/// event creation and lookup, attendee listing, badge assembly, and
/// check-in.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
}

impl EventService {
    /// Creates a new `EventService` over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Creates a new event, deriving its slug from the title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DuplicateSlug`] if another event's title derives
    /// the same slug, or [`ApiError::Persistence`] on storage failure.
    pub async fn create_event(
        &self,
        title: String,
        details: Option<String>,
        maximum_attendees: Option<i32>,
    ) -> Result<EventRecord, ApiError> {
        let slug = slugify(&title);

        // Fast-path check; the store's unique constraint closes the race.
        if self.store.event_by_slug(&slug).await?.is_some() {
            return Err(ApiError::DuplicateSlug(slug));
        }

        let record = self
            .store
            .insert_event(NewEvent {
                id: EventId::new(),
                title,
                details,
                slug,
                maximum_attendees,
            })
            .await?;

        tracing::info!(event_id = %record.id, slug = %record.slug, "event created");
        Ok(record)
    }

    /// Returns an event together with its current attendee count.
    ///
    /// The event lookup and the count are independent reads issued
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] if the event does not exist, or
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn get_event(&self, event_id: EventId) -> Result<(EventRecord, i64), ApiError> {
        let (event, count) = tokio::try_join!(
            self.store.event_by_id(event_id),
            self.store.count_attendees(event_id),
        )?;
        let event = event.ok_or(ApiError::EventNotFound(event_id))?;
        Ok((event, count))
    }

    /// Lists an event's attendees, newest registration first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] if the event does not exist, or
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn list_attendees(
        &self,
        event_id: EventId,
        page_index: u32,
        query: Option<&str>,
    ) -> Result<(Vec<AttendeeListRow>, i64), ApiError> {
        if self.store.event_by_id(event_id).await?.is_none() {
            return Err(ApiError::EventNotFound(event_id));
        }
        self.store.list_attendees(event_id, page_index, query).await
    }

    /// Assembles an attendee's badge.
    ///
    /// The check-in URL is rooted at `public_base_url` so badges stay valid
    /// when the service runs behind a proxy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AttendeeNotFound`] if the attendee does not
    /// exist, or [`ApiError::Persistence`] on storage failure.
    pub async fn badge(
        &self,
        attendee_id: AttendeeId,
        public_base_url: &str,
    ) -> Result<Badge, ApiError> {
        let attendee = self
            .store
            .attendee_by_id(attendee_id)
            .await?
            .ok_or(ApiError::AttendeeNotFound(attendee_id))?;

        let event = self
            .store
            .event_by_id(attendee.event_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!(
                    "attendee {attendee_id} references missing event {}",
                    attendee.event_id
                ))
            })?;

        let check_in_url = format!(
            "{}/api/v1/attendees/{attendee_id}/check-in",
            public_base_url.trim_end_matches('/'),
        );

        Ok(Badge {
            name: attendee.name,
            email: attendee.email,
            event_title: event.title,
            check_in_url,
        })
    }

    /// Checks an attendee in. One-time and irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AttendeeNotFound`] if the attendee does not
    /// exist, [`ApiError::AlreadyCheckedIn`] on a repeated check-in, or
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn check_in(&self, attendee_id: AttendeeId) -> Result<CheckInRecord, ApiError> {
        let record = self.store.check_in(attendee_id).await?;
        tracing::info!(%attendee_id, "attendee checked in");
        Ok(record)
    }
}
