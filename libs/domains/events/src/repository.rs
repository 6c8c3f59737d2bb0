use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::EventResult;
use crate::id::EventId;
use crate::models::{CreateEvent, Event, UpdateEvent};

/// Repository trait for Event persistence
///
/// Every method is one store round trip. Writes do not return the record;
/// the service re-reads it when the caller needs canonical state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events in store order
    async fn list_all(&self) -> EventResult<Vec<Event>>;

    /// Persist a new event and return the identifier the store assigned
    async fn insert(&self, input: CreateEvent) -> EventResult<EventId>;

    /// Fetch one event by id
    async fn find_by_id(&self, id: EventId) -> EventResult<Option<Event>>;

    /// Overwrite the present fields of one event. No match is not an error.
    async fn update_by_id(&self, id: EventId, input: UpdateEvent) -> EventResult<()>;

    /// Remove one event. No match is not an error.
    async fn delete_by_id(&self, id: EventId) -> EventResult<()>;
}

/// In-memory implementation of EventRepository (for development and tests)
///
/// Keeps insertion order, matching what a plain collection scan returns.
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_all(&self) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;
        Ok(events.clone())
    }

    async fn insert(&self, input: CreateEvent) -> EventResult<EventId> {
        let id = EventId::new();
        self.events.write().await.push(Event::from_create(id, input));

        tracing::info!(event_id = %id, "Created event");
        Ok(id)
    }

    async fn find_by_id(&self, id: EventId) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == Some(id)).cloned())
    }

    async fn update_by_id(&self, id: EventId, input: UpdateEvent) -> EventResult<()> {
        let mut events = self.events.write().await;
        match events.iter_mut().find(|e| e.id == Some(id)) {
            Some(event) => {
                input.apply_to(event);
                tracing::info!(event_id = %id, "Updated event");
            }
            None => tracing::debug!(event_id = %id, "Update matched no event"),
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: EventId) -> EventResult<()> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| e.id != Some(id));

        tracing::info!(event_id = %id, deleted = before != events.len(), "Deleted event");
        Ok(())
    }
}
