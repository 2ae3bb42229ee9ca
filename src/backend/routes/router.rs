/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines all
 * route configurations into a single Axum router.
 *
 * # Routes
 *
 * Everything lives under `/api/kanban`, behind the authentication
 * middleware:
 *
 * - `GET  /api/kanban/events` - push stream subscription (SSE)
 * - `GET|POST /api/kanban/boards`
 * - `GET|POST /api/kanban/columns`, `PUT|DELETE /api/kanban/columns/{id}`
 * - `GET|POST /api/kanban/tasks`, `PUT /api/kanban/tasks/bulk`,
 *   `PUT|DELETE /api/kanban/tasks/{id}`
 * - `GET  /api/kanban/users`
 *
 * A permissive CORS layer wraps the API so browser clients on other
 * origins can read the event stream.
 */

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::backend::kanban::handlers;
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::realtime::subscription::handle_events_subscription;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (connection registry, database pool)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let api = Router::new()
        .route("/events", get(handle_events_subscription))
        .route(
            "/boards",
            get(handlers::list_boards).post(handlers::create_board),
        )
        .route(
            "/columns",
            get(handlers::list_columns).post(handlers::create_column),
        )
        .route(
            "/columns/{id}",
            put(handlers::update_column).delete(handlers::delete_column),
        )
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/tasks/bulk", put(handlers::bulk_update_tasks))
        .route(
            "/tasks/{id}",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/users", get(handlers::list_users))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(CorsLayer::permissive());

    Router::new()
        .nest("/api/kanban", api)
        .fallback(|| async { "404 Not Found" })
        .with_state(app_state)
}
