use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::id::EventId;

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Calendar date of an event. Parts are opaque text; no range checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EventDate {
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "2024")]
    pub year: String,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "05")]
    pub month: String,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "17")]
    pub day: String,
}

/// Event as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Store-assigned identifier, omitted until one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "65a1b2c3d4e5f60718293a4b")]
    pub id: Option<EventId>,
    #[serde(default)]
    #[schema(example = "RustConf")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Montreal")]
    pub location: String,
    #[serde(default)]
    pub date: EventDate,
}

/// Payload for creating an event
///
/// Missing or `null` fields decode to empty text. Unknown keys, including
/// any `id` or `_id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateEvent {
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "RustConf")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "Montreal")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: EventDate,
}

/// Partial date for updates; absent or `null` parts stay untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventDate {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
}

/// Payload for a field-level merge update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateEvent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<UpdateEventDate>,
}

impl UpdateEvent {
    /// Dotted field paths and values to overwrite, in a stable order.
    ///
    /// Date parts are addressed individually (`date.year`, ...), so a partial
    /// date never clears its siblings.
    pub fn changes(&self) -> Vec<(&'static str, &str)> {
        let mut changes = Vec::new();

        if let Some(name) = &self.name {
            changes.push(("name", name.as_str()));
        }
        if let Some(location) = &self.location {
            changes.push(("location", location.as_str()));
        }
        if let Some(date) = &self.date {
            if let Some(year) = &date.year {
                changes.push(("date.year", year.as_str()));
            }
            if let Some(month) = &date.month {
                changes.push(("date.month", month.as_str()));
            }
            if let Some(day) = &date.day {
                changes.push(("date.day", day.as_str()));
            }
        }

        changes
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// `$set` body for the present fields
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        for (path, value) in self.changes() {
            set.insert(path, value);
        }
        set
    }

    /// Merge the present fields into an in-memory event
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(name) = &self.name {
            event.name.clone_from(name);
        }
        if let Some(location) = &self.location {
            event.location.clone_from(location);
        }
        if let Some(date) = &self.date {
            if let Some(year) = &date.year {
                event.date.year.clone_from(year);
            }
            if let Some(month) = &date.month {
                event.date.month.clone_from(month);
            }
            if let Some(day) = &date.day {
                event.date.day.clone_from(day);
            }
        }
    }
}

/// Stored shape of an event in the `events` collection
///
/// `_id` is left out on insert so the server assigns it. Decoding tolerates
/// missing or `null` business fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: EventDate,
}

impl From<CreateEvent> for EventDocument {
    fn from(input: CreateEvent) -> Self {
        Self {
            id: None,
            name: input.name,
            location: input.location,
            date: input.date,
        }
    }
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id.map(EventId::from),
            name: doc.name,
            location: doc.location,
            date: doc.date,
        }
    }
}

impl Event {
    /// Build a stored event from a create payload and its assigned id
    pub fn from_create(id: EventId, input: CreateEvent) -> Self {
        Self {
            id: Some(id),
            name: input.name,
            location: input.location,
            date: input.date,
        }
    }
}
