//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`, except `/health` and the
//! optional Swagger UI.

pub mod dto;
pub mod handlers;

use axum::Router;
#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, utoipa::OpenApi)]
#[openapi(
    info(
        title = "eventgate",
        description = "REST API for managing in-person events: registration, capacity enforcement, badges, and check-in."
    ),
    paths(
        handlers::event::create_event,
        handlers::event::get_event,
        handlers::attendee::register_attendee,
        handlers::attendee::list_attendees,
        handlers::attendee::get_attendee_badge,
        handlers::attendee::check_in_attendee,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Events", description = "Event creation and lookup"),
        (name = "Attendees", description = "Registration, listing, badges, and check-in"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
///
/// With the `swagger-ui` feature enabled (the default), interactive API
/// documentation is served at `/docs`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
