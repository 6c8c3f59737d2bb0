//! Event Service - read-after-write orchestration over the repository

use std::sync::Arc;
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::id::EventId;
use crate::models::{CreateEvent, Event, UpdateEvent};
use crate::repository::EventRepository;

/// Event service
///
/// Writes are followed by a re-read so callers always get the stored state.
/// Nothing is rolled back if the re-read fails; the write stays.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    /// Create a new EventService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every event
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> EventResult<Vec<Event>> {
        self.repository.list_all().await
    }

    /// Insert an event and return it as stored
    ///
    /// A record that cannot be read back right after insert is a store failure.
    #[instrument(skip(self, input), fields(event_name = %input.name))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        let id = self.repository.insert(input).await?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EventError::Store(format!("event {} missing after insert", id)))
    }

    /// Merge the present fields into an event and return it as stored
    ///
    /// An id that matches nothing turns the write into a no-op and surfaces
    /// here as `NotFound` from the re-read.
    #[instrument(skip(self, input), fields(event_id = %id))]
    pub async fn update_event(&self, id: EventId, input: UpdateEvent) -> EventResult<Event> {
        self.repository.update_by_id(id, input).await?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// Delete an event; deleting a missing event succeeds
    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn delete_event(&self, id: EventId) -> EventResult<()> {
        self.repository.delete_by_id(id).await
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDate;
    use crate::repository::MockEventRepository;
    use mockall::predicate::eq;

    fn stored(id: EventId, name: &str) -> Event {
        Event {
            id: Some(id),
            name: name.to_string(),
            location: "Tokyo".to_string(),
            date: EventDate {
                year: "2025".to_string(),
                month: "04".to_string(),
                day: "01".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_create_returns_refetched_record() {
        let mut mock_repo = MockEventRepository::new();
        let id = EventId::new();

        mock_repo
            .expect_insert()
            .times(1)
            .returning(move |_| Ok(id));
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |id| Ok(Some(stored(id, "Launch"))));

        let service = EventService::new(mock_repo);
        let event = service
            .create_event(CreateEvent {
                name: "Launch".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(event.id, Some(id));
        assert_eq!(event.name, "Launch");
    }

    #[tokio::test]
    async fn test_create_missing_after_insert_is_store_error() {
        let mut mock_repo = MockEventRepository::new();
        let id = EventId::new();

        mock_repo.expect_insert().returning(move |_| Ok(id));
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let err = service
            .create_event(CreateEvent::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::Store(_)));
    }

    #[tokio::test]
    async fn test_create_insert_failure_skips_refetch() {
        let mut mock_repo = MockEventRepository::new();

        mock_repo
            .expect_insert()
            .returning(|_| Err(EventError::Store("no primary".to_string())));
        mock_repo.expect_find_by_id().never();

        let service = EventService::new(mock_repo);
        let err = service
            .create_event(CreateEvent::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no primary");
    }

    #[tokio::test]
    async fn test_update_refetches_merged_record() {
        let mut mock_repo = MockEventRepository::new();
        let id = EventId::new();
        let input = UpdateEvent {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };

        mock_repo
            .expect_update_by_id()
            .with(eq(id), eq(input.clone()))
            .times(1)
            .returning(|_, _| Ok(()));
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |id| Ok(Some(stored(id, "Renamed"))));

        let service = EventService::new(mock_repo);
        let event = service.update_event(id, input).await.unwrap();

        assert_eq!(event.name, "Renamed");
        assert_eq!(event.location, "Tokyo");
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let mut mock_repo = MockEventRepository::new();
        let id = EventId::new();

        mock_repo.expect_update_by_id().returning(|_, _| Ok(()));
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let err = service
            .update_event(id, UpdateEvent::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_update_store_failure_propagates() {
        let mut mock_repo = MockEventRepository::new();

        mock_repo
            .expect_update_by_id()
            .returning(|_, _| Err(EventError::Store("timeout".to_string())));
        mock_repo.expect_find_by_id().never();

        let service = EventService::new(mock_repo);
        let err = service
            .update_event(EventId::new(), UpdateEvent::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EventError::Store(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let mut mock_repo = MockEventRepository::new();
        let id = EventId::new();

        mock_repo
            .expect_delete_by_id()
            .with(eq(id))
            .times(2)
            .returning(|_| Ok(()));

        let service = EventService::new(mock_repo);
        service.delete_event(id).await.unwrap();
        service.delete_event(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_passes_through() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_list_all().returning(|| Ok(vec![]));

        let service = EventService::new(mock_repo);
        assert!(service.list_events().await.unwrap().is_empty());
    }
}
