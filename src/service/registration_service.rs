//! Registration engine: admits attendees while enforcing the capacity and
//! uniqueness invariants.

use std::sync::Arc;

use crate::domain::{AttendeeId, EventId};
use crate::error::ApiError;
use crate::persistence::EventStore;
use crate::persistence::models::NewAttendee;

/// Decides whether a prospective attendee may be admitted to an event and,
/// if so, performs the admission.
///
/// Stateless between calls: all shared mutable state lives behind the
/// injected [`EventStore`]. Two invariants hold across any set of concurrent
/// calls:
///
/// - no event ever admits more attendees than its `maximum_attendees`;
/// - no two attendees of the same event share an email.
///
/// The pre-insert checks in [`RegistrationService::register`] are cheap
/// fast-path rejections; the invariants themselves are guaranteed by the
/// store's atomic [`EventStore::admit_attendee`], which re-validates both
/// under its own transactional guarantees. Rejections are reported, never
/// retried: they are definitive business-rule outcomes, not transient
/// faults.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    store: Arc<dyn EventStore>,
}

impl RegistrationService {
    /// Creates a new `RegistrationService` over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Registers an attendee for an event and returns the new identifier.
    ///
    /// The caller is responsible for input validation (`name` length, email
    /// syntax); this method assumes well-formed input and enforces business
    /// rules only. The duplicate-email lookup runs first as the cheaper,
    /// more common rejection; the event lookup and the attendee count are
    /// independent reads and are issued concurrently.
    ///
    /// Exactly one successful call produces exactly one attendee row;
    /// failed calls produce none.
    ///
    /// # Errors
    ///
    /// - [`ApiError::DuplicateRegistration`] if the email is already
    ///   registered for this event.
    /// - [`ApiError::EventNotFound`] if `event_id` does not reference an
    ///   existing event.
    /// - [`ApiError::CapacityExceeded`] if the event has a cap and is full.
    /// - [`ApiError::Persistence`] on storage failure.
    pub async fn register(
        &self,
        event_id: EventId,
        name: &str,
        email: &str,
    ) -> Result<AttendeeId, ApiError> {
        if self
            .store
            .attendee_by_event_and_email(event_id, email)
            .await?
            .is_some()
        {
            return Err(ApiError::DuplicateRegistration);
        }

        let (event, count) = tokio::try_join!(
            self.store.event_by_id(event_id),
            self.store.count_attendees(event_id),
        )?;
        let event = event.ok_or(ApiError::EventNotFound(event_id))?;

        if let Some(max) = event.maximum_attendees
            && count >= i64::from(max)
        {
            return Err(ApiError::CapacityExceeded);
        }

        // The only commit point. The store re-checks both invariants
        // atomically, closing the window between the reads above and the
        // insert.
        let attendee = self
            .store
            .admit_attendee(NewAttendee {
                event_id,
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;

        tracing::info!(%event_id, attendee_id = %attendee.id, "attendee registered");
        Ok(attendee.id)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::InMemoryStore;
    use crate::persistence::models::NewEvent;

    async fn make_event(store: &Arc<InMemoryStore>, maximum_attendees: Option<i32>) -> EventId {
        let id = EventId::new();
        let result = store
            .insert_event(NewEvent {
                id,
                title: "Unite Summit".to_string(),
                details: None,
                slug: format!("unite-summit-{id}"),
                maximum_attendees,
            })
            .await;
        assert!(result.is_ok());
        id
    }

    fn make_service(store: &Arc<InMemoryStore>) -> RegistrationService {
        RegistrationService::new(Arc::clone(store) as Arc<dyn EventStore>)
    }

    #[tokio::test]
    async fn admits_then_rejects_duplicate_then_rejects_overflow() {
        let store = Arc::new(InMemoryStore::new());
        let service = make_service(&store);
        let event_id = make_event(&store, Some(1)).await;

        let admitted = service
            .register(event_id, "Alice Smith", "alice@example.com")
            .await;
        assert!(admitted.is_ok());

        let count = store.count_attendees(event_id).await;
        assert!(matches!(count, Ok(1)));

        let duplicate = service
            .register(event_id, "Alice Smith", "alice@example.com")
            .await;
        assert!(matches!(duplicate, Err(ApiError::DuplicateRegistration)));

        let overflow = service
            .register(event_id, "Bob Jones", "bob@example.com")
            .await;
        assert!(matches!(overflow, Err(ApiError::CapacityExceeded)));
    }

    #[tokio::test]
    async fn unlimited_event_never_rejects_for_capacity() {
        let store = Arc::new(InMemoryStore::new());
        let service = make_service(&store);
        let event_id = make_event(&store, None).await;

        for i in 0..1000 {
            let result = service
                .register(event_id, "Guest Person", &format!("guest{i}@example.com"))
                .await;
            assert!(result.is_ok(), "registration {i} failed");
        }

        let count = store.count_attendees(event_id).await;
        assert!(matches!(count, Ok(1000)));
    }

    #[tokio::test]
    async fn unknown_event_never_inserts() {
        let store = Arc::new(InMemoryStore::new());
        let service = make_service(&store);
        let ghost = EventId::new();

        let result = service
            .register(ghost, "Alice Smith", "alice@example.com")
            .await;
        assert!(matches!(result, Err(ApiError::EventNotFound(_))));

        let count = store.count_attendees(ghost).await;
        assert!(matches!(count, Ok(0)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_never_exceed_capacity() {
        let store = Arc::new(InMemoryStore::new());
        let service = make_service(&store);
        let event_id = make_event(&store, Some(5)).await;

        let mut handles = Vec::with_capacity(20);
        for i in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .register(event_id, "Guest Person", &format!("guest{i}@example.com"))
                    .await
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            let Ok(result) = handle.await else {
                panic!("task panicked");
            };
            match result {
                Ok(_) => admitted += 1,
                Err(ApiError::CapacityExceeded) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(admitted, 5);
        let count = store.count_attendees(event_id).await;
        assert!(matches!(count, Ok(5)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_same_email_admits_exactly_one() {
        let store = Arc::new(InMemoryStore::new());
        let service = make_service(&store);
        let event_id = make_event(&store, None).await;

        let first = tokio::spawn({
            let service = service.clone();
            async move {
                service
                    .register(event_id, "Alice Smith", "alice@example.com")
                    .await
            }
        });
        let second = tokio::spawn({
            let service = service.clone();
            async move {
                service
                    .register(event_id, "Alice Smith", "alice@example.com")
                    .await
            }
        });

        let (Ok(first), Ok(second)) = (first.await, second.await) else {
            panic!("task panicked");
        };

        let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
        let duplicates = [&first, &second]
            .iter()
            .filter(|r| matches!(r, Err(ApiError::DuplicateRegistration)))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(duplicates, 1);

        let count = store.count_attendees(event_id).await;
        assert!(matches!(count, Ok(1)));
    }
}
