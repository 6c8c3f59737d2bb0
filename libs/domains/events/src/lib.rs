//! Events Domain
//!
//! A single resource, the event (name, location, date), served over REST
//! and stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! HTTP ─► handlers ─► EventIdPath (path id) ─► EventService ─► EventRepository
//!                                                 │                 ├─ MongoEventRepository
//!                                                 │                 └─ InMemoryEventRepository
//!                                                 └─ re-reads after every write
//! ```

pub mod handlers;

mod error;
mod id;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{EventError, EventResult};
pub use handlers::{ApiDoc, router};
pub use id::{EventId, EventIdPath};
pub use models::{CreateEvent, Event, EventDate, EventDocument, UpdateEvent, UpdateEventDate};
pub use self::mongodb::{EVENTS_COLLECTION, MongoEventRepository};
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
