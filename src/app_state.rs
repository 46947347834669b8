//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{EventService, RegistrationService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event CRUD, listing, badge, and check-in logic.
    pub event_service: Arc<EventService>,
    /// Registration engine enforcing capacity and uniqueness.
    pub registration_service: Arc<RegistrationService>,
    /// Base URL used to construct badge check-in links.
    pub public_base_url: String,
}
