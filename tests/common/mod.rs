//! Shared helpers for integration tests.

use std::sync::Arc;

use sea_orm::ConnectOptions;

use user_crud_api::api::{create_router, AppState};
use user_crud_api::config::Config;
use user_crud_api::infra::{Database, UserStore};

/// Fresh in-memory SQLite database with migrations applied.
///
/// The pool is pinned to a single connection so every query sees the same
/// in-memory database.
#[allow(dead_code)]
pub async fn test_database() -> Database {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect_with(options)
        .await
        .expect("in-memory sqlite should connect");
    db.run_migrations().await.expect("migrations should apply");
    db
}

#[allow(dead_code)]
pub async fn test_store() -> UserStore {
    UserStore::new(test_database().await.get_connection())
}

#[allow(dead_code)]
pub async fn test_app() -> axum::Router {
    let config = Config {
        greeting: "Howdy".to_string(),
        environment: "Testing".to_string(),
        ..Config::default()
    };
    let state = AppState::from_config(Arc::new(test_database().await), &config);
    create_router(state)
}
