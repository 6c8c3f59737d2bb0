//! Event identifiers and the path extractor that parses them.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::EventError;

/// Store-assigned identifier of an event.
///
/// On the wire it is the 24-character hex encoding of a MongoDB `ObjectId`,
/// always rendered in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(ObjectId);

impl EventId {
    /// Fresh identifier, as the store would assign on insert
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for EventId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<EventId> for ObjectId {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl FromStr for EventId {
    type Err = EventError;

    /// Accepts exactly 24 hex digits; anything else is `InvalidIdentifier`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| EventError::InvalidIdentifier(s.to_string()))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Extracts and validates the `{id}` path segment.
///
/// Runs before any body extractor, so a malformed id answers 400 without
/// decoding the body or touching the store.
///
/// # Example
/// ```ignore
/// async fn delete_event(EventIdPath(id): EventIdPath) -> StatusCode { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EventIdPath(pub EventId);

impl<S> FromRequestParts<S> for EventIdPath
where
    S: Send + Sync,
{
    type Rejection = EventError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| EventError::InvalidIdentifier(e.body_text()))?;

        raw.parse().map(EventIdPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id: EventId = "65a1b2c3d4e5f60718293a4b".parse().unwrap();
        assert_eq!(id.to_string(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn test_display_is_lowercase() {
        let id: EventId = "65A1B2C3D4E5F60718293A4B".parse().unwrap();
        assert_eq!(id.to_string(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in [
            "",
            "abc",
            "65a1b2c3d4e5f60718293a4",
            "65a1b2c3d4e5f60718293a4bc",
            "zza1b2c3d4e5f60718293a4b",
            "65a1b2c3-4e5f-6071-8293-a4b",
        ] {
            let err = raw.parse::<EventId>().unwrap_err();
            assert!(
                matches!(err, EventError::InvalidIdentifier(ref s) if s == raw),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id: EventId = "65a1b2c3d4e5f60718293a4b".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65a1b2c3d4e5f60718293a4b\"");

        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<EventId>("\"nope\"").is_err());
    }
}
