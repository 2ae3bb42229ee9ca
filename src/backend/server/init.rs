/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Create the connection registry (lives for the whole process)
 * 2. Load the optional database pool and run migrations
 * 3. Create and configure the router
 *
 * # Error Handling
 *
 * The function is designed to be resilient: a missing database disables
 * persistence-backed routes (503) but the push endpoint keeps working, so
 * the server is still useful behind a separate API instance.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing gasakboard server");

    let db_pool = load_database().await;

    let app_state = AppState::new(db_pool);

    tracing::info!("Connection registry and state initialized");

    create_router(app_state)
}
