//! Application state management.
//!
//! Built once in `main` and handed to the routers that need it.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the client and database handles share one pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
