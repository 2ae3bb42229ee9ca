/**
 * Column Handlers
 *
 * GET    /api/kanban/columns?boardId= - a board's columns in order
 * POST   /api/kanban/columns          - create a column
 * PUT    /api/kanban/columns/{id}     - rename/recolor/reposition
 * DELETE /api/kanban/columns/{id}     - delete (tasks cascade)
 *
 * Mutations broadcast `column_*` updates to every other connected client.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::kanban::db;
use crate::backend::kanban::handlers::BoardQuery;
use crate::backend::middleware::AuthUser;
use crate::backend::realtime::broadcast_update;
use crate::backend::server::state::AppState;
use crate::shared::model::{BoardColumn, CreateColumnRequest, UpdateColumnRequest};
use crate::shared::KanbanUpdate;

/// Color assigned to columns created without one.
const DEFAULT_COLUMN_COLOR: &str = "#6b7280";

/// List a board's columns (GET /api/kanban/columns?boardId=)
pub async fn list_columns(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Vec<BoardColumn>>, BackendError> {
    let pool = state.pool()?;

    if !db::board_visible(pool, query.board_id, &user).await? {
        return Err(BackendError::not_found("Board not found or access denied"));
    }

    let columns = db::fetch_columns(pool, query.board_id).await?;
    Ok(Json(columns))
}

/// Create a column (POST /api/kanban/columns)
///
/// The client supplies the identifier (derived from the title, or the
/// forced default for a board's first column); the server assigns the next
/// order position.
pub async fn create_column(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateColumnRequest>,
) -> Result<(StatusCode, Json<BoardColumn>), BackendError> {
    let pool = state.pool()?;

    if req.id.trim().is_empty() || req.title.trim().is_empty() {
        return Err(BackendError::bad_request("ID and title are required"));
    }

    let order = db::next_column_order(pool, req.board_id).await?;
    let color = req.color.as_deref().unwrap_or(DEFAULT_COLUMN_COLOR);
    let column = db::insert_column(pool, &req, color, order).await?;

    broadcast_update(
        &state.registry,
        &KanbanUpdate::column_created(&column),
        Some(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(column)))
}

/// Update a column (PUT /api/kanban/columns/{id})
pub async fn update_column(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateColumnRequest>,
) -> Result<Json<BoardColumn>, BackendError> {
    let pool = state.pool()?;

    let column = db::update_column(pool, &id, &req)
        .await?
        .ok_or_else(|| BackendError::not_found("Column not found"))?;

    broadcast_update(
        &state.registry,
        &KanbanUpdate::column_updated(&column),
        Some(user.user_id),
    );

    Ok(Json(column))
}

/// Delete a column (DELETE /api/kanban/columns/{id})
///
/// Tasks in the column are removed by the database cascade; clients mirror
/// the cascade locally when they see the broadcast.
pub async fn delete_column(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let pool = state.pool()?;

    let (column_id, board_id) = db::delete_column(pool, &id)
        .await?
        .ok_or_else(|| BackendError::not_found("Column not found"))?;

    broadcast_update(
        &state.registry,
        &KanbanUpdate::column_deleted(&column_id, board_id),
        Some(user.user_id),
    );

    Ok(Json(
        serde_json::json!({ "message": "Column deleted successfully" }),
    ))
}
