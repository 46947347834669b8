//! Type-safe attendee identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for an attendee.
///
/// Wraps the sequential row id assigned by the store on admission. Unlike
/// [`super::EventId`] it is never generated by the application: the only way
/// to obtain one is from a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AttendeeId(i64);

impl AttendeeId {
    /// Creates an `AttendeeId` from a raw row id.
    #[must_use]
    pub const fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AttendeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AttendeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<AttendeeId> for i64 {
    fn from(id: AttendeeId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_i64() {
        let id = AttendeeId::from_i64(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(AttendeeId::from(42_i64), id);
    }

    #[test]
    fn serde_is_transparent() {
        let id = AttendeeId::from_i64(7);
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");
        let back: AttendeeId = serde_json::from_str(&json).ok().unwrap_or_else(|| {
            panic!("deserialization failed");
        });
        assert_eq!(back, id);
    }

    #[test]
    fn display_is_numeric() {
        let id = AttendeeId::from_i64(1234);
        assert_eq!(format!("{id}"), "1234");
    }
}
