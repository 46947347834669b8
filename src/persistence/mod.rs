//! Persistence gateway: the sole shared mutable resource.
//!
//! Provides the [`EventStore`] trait consumed by the service layer, with
//! two implementations: [`PostgresStore`] for production and
//! [`InMemoryStore`] for tests and local demos. The gateway owns every
//! transactional guarantee the services rely on; in particular
//! [`EventStore::admit_attendee`] must be atomic with respect to the
//! capacity and uniqueness invariants.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

use crate::domain::{AttendeeId, EventId};
use crate::error::ApiError;
use models::{AttendeeListRow, AttendeeRecord, CheckInRecord, EventRecord, NewAttendee, NewEvent};

/// Number of attendees returned per listing page.
pub const ATTENDEES_PAGE_SIZE: i64 = 10;

/// Storage operations required by the services.
///
/// All methods suspend on I/O. Read methods are pure; the two write methods
/// (`insert_event`, `admit_attendee`, `check_in`) are the only commit points
/// and must fail without side effects.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::DuplicateSlug`] if another event already owns the
    /// slug, or [`ApiError::Persistence`] on storage failure.
    async fn insert_event(&self, event: NewEvent) -> Result<EventRecord, ApiError>;

    /// Looks up an event by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn event_by_id(&self, id: EventId) -> Result<Option<EventRecord>, ApiError>;

    /// Looks up an event by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn event_by_slug(&self, slug: &str) -> Result<Option<EventRecord>, ApiError>;

    /// Looks up an attendee by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn attendee_by_id(&self, id: AttendeeId) -> Result<Option<AttendeeRecord>, ApiError>;

    /// Looks up an attendee of the given event by email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn attendee_by_event_and_email(
        &self,
        event_id: EventId,
        email: &str,
    ) -> Result<Option<AttendeeRecord>, ApiError>;

    /// Returns the number of attendees registered for the given event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn count_attendees(&self, event_id: EventId) -> Result<i64, ApiError>;

    /// Atomically admits a prospective attendee.
    ///
    /// Re-validates the capacity and uniqueness invariants under the store's
    /// own transactional guarantees; callers may use the read methods for
    /// cheap fast-path rejections but must not rely on them for correctness.
    ///
    /// # Errors
    ///
    /// Fails distinctly with [`ApiError::EventNotFound`] if the event does
    /// not exist, [`ApiError::DuplicateRegistration`] if the email is taken
    /// for this event, [`ApiError::CapacityExceeded`] if the event is full,
    /// or [`ApiError::Persistence`] on storage failure. No row is inserted
    /// on any failure.
    async fn admit_attendee(&self, attendee: NewAttendee) -> Result<AttendeeRecord, ApiError>;

    /// Lists attendees of an event, newest registration first.
    ///
    /// Returns one page of [`ATTENDEES_PAGE_SIZE`] rows starting at the
    /// zero-based `page_index`, optionally filtered by a case-insensitive
    /// name substring, together with the total number of matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn list_attendees(
        &self,
        event_id: EventId,
        page_index: u32,
        query: Option<&str>,
    ) -> Result<(Vec<AttendeeListRow>, i64), ApiError>;

    /// Records the one-time check-in of an attendee.
    ///
    /// # Errors
    ///
    /// Fails distinctly with [`ApiError::AttendeeNotFound`] if the attendee
    /// does not exist, [`ApiError::AlreadyCheckedIn`] if a check-in already
    /// exists, or [`ApiError::Persistence`] on storage failure.
    async fn check_in(&self, attendee_id: AttendeeId) -> Result<CheckInRecord, ApiError>;
}
