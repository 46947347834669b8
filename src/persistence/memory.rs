//! In-memory implementation of the persistence gateway.
//!
//! [`InMemoryStore`] keeps all state behind a single
//! [`tokio::sync::RwLock`], so [`EventStore::admit_attendee`] and
//! [`EventStore::check_in`] run their check-then-write sequence under one
//! exclusive lock and provide the same atomicity contract as the
//! transactional PostgreSQL store. Used by the test suites and local demos.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::models::{AttendeeListRow, AttendeeRecord, CheckInRecord, EventRecord, NewAttendee, NewEvent};
use super::{ATTENDEES_PAGE_SIZE, EventStore};
use crate::domain::{AttendeeId, EventId};
use crate::error::ApiError;

#[derive(Debug, Default)]
struct Inner {
    events: HashMap<EventId, EventRecord>,
    attendees: HashMap<i64, AttendeeRecord>,
    check_ins: HashMap<i64, CheckInRecord>,
    next_attendee_id: i64,
}

/// In-memory store over `RwLock`-protected maps.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn insert_event(&self, event: NewEvent) -> Result<EventRecord, ApiError> {
        let mut inner = self.inner.write().await;
        if inner.events.values().any(|e| e.slug == event.slug) {
            return Err(ApiError::DuplicateSlug(event.slug));
        }
        let record = EventRecord {
            id: event.id,
            title: event.title,
            details: event.details,
            slug: event.slug,
            maximum_attendees: event.maximum_attendees,
        };
        inner.events.insert(record.id, record.clone());
        Ok(record)
    }

    async fn event_by_id(&self, id: EventId) -> Result<Option<EventRecord>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.events.get(&id).cloned())
    }

    async fn event_by_slug(&self, slug: &str) -> Result<Option<EventRecord>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.events.values().find(|e| e.slug == slug).cloned())
    }

    async fn attendee_by_id(&self, id: AttendeeId) -> Result<Option<AttendeeRecord>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.attendees.get(&id.as_i64()).cloned())
    }

    async fn attendee_by_event_and_email(
        &self,
        event_id: EventId,
        email: &str,
    ) -> Result<Option<AttendeeRecord>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner
            .attendees
            .values()
            .find(|a| a.event_id == event_id && a.email == email)
            .cloned())
    }

    async fn count_attendees(&self, event_id: EventId) -> Result<i64, ApiError> {
        let inner = self.inner.read().await;
        Ok(count_for(&inner, event_id))
    }

    async fn admit_attendee(&self, attendee: NewAttendee) -> Result<AttendeeRecord, ApiError> {
        // Single exclusive lock over lookup, capacity check, and insert.
        let mut inner = self.inner.write().await;

        let event = inner
            .events
            .get(&attendee.event_id)
            .ok_or(ApiError::EventNotFound(attendee.event_id))?;

        if inner
            .attendees
            .values()
            .any(|a| a.event_id == attendee.event_id && a.email == attendee.email)
        {
            return Err(ApiError::DuplicateRegistration);
        }

        if let Some(max) = event.maximum_attendees
            && count_for(&inner, attendee.event_id) >= i64::from(max)
        {
            return Err(ApiError::CapacityExceeded);
        }

        inner.next_attendee_id += 1;
        let record = AttendeeRecord {
            id: AttendeeId::from_i64(inner.next_attendee_id),
            name: attendee.name,
            email: attendee.email,
            event_id: attendee.event_id,
            created_at: Utc::now(),
        };
        inner.attendees.insert(record.id.as_i64(), record.clone());
        Ok(record)
    }

    async fn list_attendees(
        &self,
        event_id: EventId,
        page_index: u32,
        query: Option<&str>,
    ) -> Result<(Vec<AttendeeListRow>, i64), ApiError> {
        let inner = self.inner.read().await;
        let needle = query.map(str::to_lowercase);

        let mut matching: Vec<&AttendeeRecord> = inner
            .attendees
            .values()
            .filter(|a| a.event_id == event_id)
            .filter(|a| {
                needle
                    .as_deref()
                    .is_none_or(|q| a.name.to_lowercase().contains(q))
            })
            .collect();

        // Newest registration first; id breaks ties within one timestamp.
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.as_i64().cmp(&a.id.as_i64()))
        });

        let total = matching.len() as i64;
        let start = (i64::from(page_index) * ATTENDEES_PAGE_SIZE) as usize;
        let page = matching
            .into_iter()
            .skip(start)
            .take(ATTENDEES_PAGE_SIZE as usize)
            .map(|a| AttendeeListRow {
                id: a.id,
                name: a.name.clone(),
                email: a.email.clone(),
                created_at: a.created_at,
                checked_in_at: inner.check_ins.get(&a.id.as_i64()).map(|c| c.created_at),
            })
            .collect();

        Ok((page, total))
    }

    async fn check_in(&self, attendee_id: AttendeeId) -> Result<CheckInRecord, ApiError> {
        let mut inner = self.inner.write().await;

        if !inner.attendees.contains_key(&attendee_id.as_i64()) {
            return Err(ApiError::AttendeeNotFound(attendee_id));
        }
        if inner.check_ins.contains_key(&attendee_id.as_i64()) {
            return Err(ApiError::AlreadyCheckedIn(attendee_id));
        }

        let record = CheckInRecord {
            attendee_id,
            created_at: Utc::now(),
        };
        inner.check_ins.insert(attendee_id.as_i64(), record.clone());
        Ok(record)
    }
}

fn count_for(inner: &Inner, event_id: EventId) -> i64 {
    inner
        .attendees
        .values()
        .filter(|a| a.event_id == event_id)
        .count() as i64
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_event(maximum_attendees: Option<i32>) -> NewEvent {
        NewEvent {
            id: EventId::new(),
            title: "Rust Meetup".to_string(),
            details: None,
            slug: format!("rust-meetup-{}", EventId::new()),
            maximum_attendees,
        }
    }

    fn make_attendee(event_id: EventId, email: &str) -> NewAttendee {
        NewAttendee {
            event_id,
            name: "Alice Smith".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_get_event() {
        let store = InMemoryStore::new();
        let new = make_event(None);
        let id = new.id;

        let result = store.insert_event(new).await;
        assert!(result.is_ok());

        let fetched = store.event_by_id(id).await;
        assert!(matches!(fetched, Ok(Some(_))));
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let store = InMemoryStore::new();
        let mut first = make_event(None);
        first.slug = "same-slug".to_string();
        let mut second = make_event(None);
        second.slug = "same-slug".to_string();

        let _ = store.insert_event(first).await;
        let result = store.insert_event(second).await;
        assert!(matches!(result, Err(ApiError::DuplicateSlug(_))));
    }

    #[tokio::test]
    async fn event_by_slug_finds_event() {
        let store = InMemoryStore::new();
        let mut new = make_event(None);
        new.slug = "findable".to_string();
        let id = new.id;
        let _ = store.insert_event(new).await;

        let found = store.event_by_slug("findable").await;
        let Ok(Some(found)) = found else {
            panic!("event not found by slug");
        };
        assert_eq!(found.id, id);
    }

    #[tokio::test]
    async fn admit_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let event = make_event(None);
        let event_id = event.id;
        let _ = store.insert_event(event).await;

        let a = store
            .admit_attendee(make_attendee(event_id, "a@example.com"))
            .await;
        let b = store
            .admit_attendee(make_attendee(event_id, "b@example.com"))
            .await;

        let (Ok(a), Ok(b)) = (a, b) else {
            panic!("admission failed");
        };
        assert!(b.id.as_i64() > a.id.as_i64());
    }

    #[tokio::test]
    async fn admit_into_unknown_event_fails_without_insert() {
        let store = InMemoryStore::new();
        let ghost = EventId::new();

        let result = store.admit_attendee(make_attendee(ghost, "a@example.com")).await;
        assert!(matches!(result, Err(ApiError::EventNotFound(_))));

        let count = store.count_attendees(ghost).await;
        assert!(matches!(count, Ok(0)));
    }

    #[tokio::test]
    async fn admit_enforces_capacity_and_uniqueness() {
        let store = InMemoryStore::new();
        let event = make_event(Some(1));
        let event_id = event.id;
        let _ = store.insert_event(event).await;

        let first = store
            .admit_attendee(make_attendee(event_id, "a@example.com"))
            .await;
        assert!(first.is_ok());

        let duplicate = store
            .admit_attendee(make_attendee(event_id, "a@example.com"))
            .await;
        assert!(matches!(duplicate, Err(ApiError::DuplicateRegistration)));

        let overflow = store
            .admit_attendee(make_attendee(event_id, "b@example.com"))
            .await;
        assert!(matches!(overflow, Err(ApiError::CapacityExceeded)));
    }

    #[tokio::test]
    async fn list_pages_and_filters() {
        let store = InMemoryStore::new();
        let event = make_event(None);
        let event_id = event.id;
        let _ = store.insert_event(event).await;

        for i in 0..12 {
            let mut new = make_attendee(event_id, &format!("a{i}@example.com"));
            new.name = format!("Attendee {i:02}");
            let _ = store.admit_attendee(new).await;
        }

        let (page0, total) = store
            .list_attendees(event_id, 0, None)
            .await
            .unwrap_or_default();
        assert_eq!(total, 12);
        assert_eq!(page0.len(), 10);

        let (page1, _) = store
            .list_attendees(event_id, 1, None)
            .await
            .unwrap_or_default();
        assert_eq!(page1.len(), 2);

        let (filtered, filtered_total) = store
            .list_attendees(event_id, 0, Some("attendee 03"))
            .await
            .unwrap_or_default();
        assert_eq!(filtered_total, 1);
        assert_eq!(filtered.len(), 1);
    }

    #[tokio::test]
    async fn check_in_is_one_time() {
        let store = InMemoryStore::new();
        let event = make_event(None);
        let event_id = event.id;
        let _ = store.insert_event(event).await;

        let Ok(attendee) = store
            .admit_attendee(make_attendee(event_id, "a@example.com"))
            .await
        else {
            panic!("admission failed");
        };

        let first = store.check_in(attendee.id).await;
        assert!(first.is_ok());

        let second = store.check_in(attendee.id).await;
        assert!(matches!(second, Err(ApiError::AlreadyCheckedIn(_))));
    }

    #[tokio::test]
    async fn check_in_unknown_attendee_fails() {
        let store = InMemoryStore::new();
        let result = store.check_in(AttendeeId::from_i64(999)).await;
        assert!(matches!(result, Err(ApiError::AttendeeNotFound(_))));
    }

    #[tokio::test]
    async fn listing_carries_check_in_timestamp() {
        let store = InMemoryStore::new();
        let event = make_event(None);
        let event_id = event.id;
        let _ = store.insert_event(event).await;

        let Ok(attendee) = store
            .admit_attendee(make_attendee(event_id, "a@example.com"))
            .await
        else {
            panic!("admission failed");
        };
        let _ = store.check_in(attendee.id).await;

        let (rows, _) = store
            .list_attendees(event_id, 0, None)
            .await
            .unwrap_or_default();
        let Some(row) = rows.first() else {
            panic!("expected one row");
        };
        assert!(row.checked_in_at.is_some());
    }
}
