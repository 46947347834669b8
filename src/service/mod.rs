//! Service layer: business logic orchestration.
//!
//! [`RegistrationService`] is the registration engine enforcing the
//! capacity and uniqueness invariants; [`EventService`] covers the
//! surrounding operations (event creation, lookup, listing, badges,
//! check-in). Both are stateless coordinators over an injected
//! [`crate::persistence::EventStore`].

pub mod event_service;
pub mod registration_service;

pub use event_service::{Badge, EventService};
pub use registration_service::RegistrationService;
