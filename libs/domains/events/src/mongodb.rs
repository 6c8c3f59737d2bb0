//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
};
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::id::EventId;
use crate::models::{CreateEvent, Event, EventDocument, UpdateEvent};
use crate::repository::EventRepository;

/// Default collection name
pub const EVENTS_COLLECTION: &str = "events";

/// MongoDB implementation of the EventRepository
///
/// Holds a collection handle; cloning it shares the client's pool.
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    /// Create a repository over the `events` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
    /// let repo = MongoEventRepository::new(&client.database("events"));
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, EVENTS_COLLECTION)
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<EventDocument>(collection_name),
        }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<EventDocument> {
        &self.collection
    }

    fn id_filter(id: EventId) -> Document {
        doc! { "_id": id.as_object_id() }
    }

    /// `$set` update for the present fields, or `None` when nothing changes
    ///
    /// MongoDB rejects an empty `$set`, so an empty update skips the write.
    fn build_update(input: &UpdateEvent) -> Option<Document> {
        if input.is_empty() {
            return None;
        }
        Some(doc! { "$set": input.to_set_document() })
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> EventResult<Vec<Event>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, input), fields(event_name = %input.name))]
    async fn insert(&self, input: CreateEvent) -> EventResult<EventId> {
        let result = self
            .collection
            .insert_one(EventDocument::from(input))
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(EventId::from)
            .ok_or_else(|| {
                EventError::Store(format!(
                    "store assigned a non-ObjectId identifier: {}",
                    result.inserted_id
                ))
            })?;

        tracing::info!(event_id = %id, "Event inserted");
        Ok(id)
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn find_by_id(&self, id: EventId) -> EventResult<Option<Event>> {
        let document = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(document.map(Event::from))
    }

    #[instrument(skip(self, input), fields(event_id = %id))]
    async fn update_by_id(&self, id: EventId, input: UpdateEvent) -> EventResult<()> {
        let Some(update) = Self::build_update(&input) else {
            tracing::debug!("Empty update, skipping write");
            return Ok(());
        };

        let result = self
            .collection
            .update_one(Self::id_filter(id), update)
            .await?;

        tracing::info!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Event updated"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn delete_by_id(&self, id: EventId) -> EventResult<()> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?;

        tracing::info!(deleted = deleted.is_some(), "Event deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UpdateEventDate;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_id_filter() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let filter = MongoEventRepository::id_filter(EventId::from(oid));
        assert_eq!(filter, doc! { "_id": oid });
    }

    #[test]
    fn test_build_update_only_present_fields() {
        let input = UpdateEvent {
            name: None,
            location: Some("Oslo".into()),
            date: Some(UpdateEventDate {
                year: None,
                month: Some("03".into()),
                day: None,
            }),
        };

        let update = MongoEventRepository::build_update(&input).unwrap();
        assert_eq!(
            update,
            doc! { "$set": { "location": "Oslo", "date.month": "03" } }
        );
    }

    #[test]
    fn test_build_update_empty_is_none() {
        assert!(MongoEventRepository::build_update(&UpdateEvent::default()).is_none());
    }
}
