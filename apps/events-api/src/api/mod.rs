//! API routes module
//!
//! This module defines all HTTP routes of the events service.

pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: merged at the root by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(events::router(state))
        .merge(health::router(state.clone()))
}
