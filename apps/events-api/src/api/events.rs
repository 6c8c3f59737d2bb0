//! Events API routes
//!
//! Wires the events domain to the shared MongoDB database.

use axum::Router;
use domain_events::{EventService, MongoEventRepository, router as events_router};

use crate::state::AppState;

/// Create the events router over the `events` collection
pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(&state.db);
    let service = EventService::new(repository);

    events_router(service)
}
