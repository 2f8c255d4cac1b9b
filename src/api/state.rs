//! Application state shared with every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserRepository, UserStore};

/// Application state: the repository handle built at startup plus the
/// settings handlers report back.
#[derive(Clone)]
pub struct AppState {
    /// User persistence gateway
    pub users: Arc<dyn UserRepository>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
    /// Greeting served from the root endpoint
    pub greeting: Arc<str>,
    /// Deployment environment name
    pub environment: Arc<str>,
}

impl AppState {
    /// Create application state backed by the SeaORM user store.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        Self::new(users, database, config)
    }

    /// Create application state with a manually injected repository.
    pub fn new(users: Arc<dyn UserRepository>, database: Arc<Database>, config: &Config) -> Self {
        Self {
            users,
            database,
            greeting: Arc::from(config.greeting.as_str()),
            environment: Arc::from(config.environment.as_str()),
        }
    }
}
