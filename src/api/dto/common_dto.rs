//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the attendee listing endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AttendeeListParams {
    /// Zero-based page number. Defaults to 0. Pages hold 10 attendees.
    #[serde(default)]
    pub page_index: u32,
    /// Optional case-insensitive substring filter on attendee names.
    #[serde(default)]
    pub query: Option<String>,
}
