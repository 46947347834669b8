//! # eventgate
//!
//! REST API for managing in-person events: creating events, registering
//! attendees, listing them, checking them in, and issuing badges.
//!
//! The registration path is the core of the service: it enforces that an
//! event never admits more attendees than its capacity and that no email
//! registers twice for the same event, including under concurrent requests.
//! Everything else is a thin translation layer between HTTP and the
//! persistence gateway.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── RegistrationService (service/)
//!     ├── EventService (service/)
//!     │
//!     └── EventStore (persistence/)
//!         ├── PostgresStore (production)
//!         └── InMemoryStore (tests, demos)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
