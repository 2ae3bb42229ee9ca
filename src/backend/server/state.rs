/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container for the server:
 * - the connection registry (the only cross-request shared mutable
 *   resource in this service)
 * - the optional Postgres pool
 *
 * # Thread Safety
 *
 * Both fields are cheaply cloneable handles; the registry guards its map
 * internally and the pool is already shareable.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::error::BackendError;
use crate::backend::realtime::registry::ConnectionRegistry;

/// Application state shared by every handler
///
/// The registry is created once at process start and never torn down. The
/// pool is `None` when `DATABASE_URL` is not configured; persistence-backed
/// handlers then answer 503 while the push endpoint keeps working.
#[derive(Clone)]
pub struct AppState {
    /// Registry of live push connections
    pub registry: ConnectionRegistry,

    /// Database connection pool, absent when the database is not configured
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            db_pool,
        }
    }

    /// The pool, or `BackendError::Unavailable` when the server runs
    /// without a database.
    pub fn pool(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or(BackendError::Unavailable)
    }
}

/// Allows handlers to extract the registry directly from `AppState`.
impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

/// Allows handlers to extract the optional pool directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
