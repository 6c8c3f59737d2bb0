use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_extra::extract::WithRejection;
use axum_helpers::errors::responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{EventError, EventResult};
use crate::id::EventIdPath;
use crate::models::{CreateEvent, Event, EventDate, UpdateEvent, UpdateEventDate};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, update_event, delete_event),
    components(
        schemas(Event, EventDate, CreateEvent, UpdateEvent, UpdateEventDate),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Events", description = "Event management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
///
/// Paths are absolute (`/events`, `/events/{id}`); merge the router rather
/// than nesting it.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
        .with_state(shared_service)
}

/// Decode a request body that must be a JSON object
///
/// serde's derived structs also accept a JSON array, filling fields by
/// position; only objects are valid payloads here.
fn decode_object<T: DeserializeOwned>(body: Value) -> EventResult<T> {
    if !body.is_object() {
        return Err(EventError::MalformedBody("expected a JSON object".to_string()));
    }
    Ok(serde_json::from_value(body)?)
}

/// List all events
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events().await?;
    Ok(Json(events))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, EventError>,
) -> EventResult<impl IntoResponse> {
    let input: CreateEvent = decode_object(body)?;
    let event = service.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update an event (field-level merge)
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    EventIdPath(id): EventIdPath,
    WithRejection(Json(body), _): WithRejection<Json<Value>, EventError>,
) -> EventResult<Json<Event>> {
    let input: UpdateEvent = decode_object(body)?;
    let event = service.update_event(id, input).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (24-character hex)")
    ),
    responses(
        (status = 204, description = "Event deleted, or did not exist"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    EventIdPath(id): EventIdPath,
) -> EventResult<impl IntoResponse> {
    service.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
