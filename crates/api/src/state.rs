use std::sync::Arc;

use lucrum_core::store::ProgressStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lucrum_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Progress store the training operations run against.
    pub store: Arc<dyn ProgressStore>,
}

impl AppState {
    /// Build state backed by PostgreSQL for both the pool and the store.
    pub fn new(pool: lucrum_db::DbPool, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(lucrum_db::PgProgressStore::new(pool.clone())),
            pool,
            config: Arc::new(config),
        }
    }
}
