/**
 * Board Handlers
 *
 * GET /api/kanban/boards - boards visible to the caller
 * POST /api/kanban/boards - create a board plus its default columns
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::error::BackendError;
use crate::backend::kanban::db;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::model::{Board, CreateBoardRequest};

/// List boards (GET /api/kanban/boards)
///
/// Admins see every admin-owned board (the shared pool); leaders and
/// members see only their own.
pub async fn list_boards(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Board>>, BackendError> {
    let pool = state.pool()?;
    let boards = db::fetch_boards(pool, &user).await?;
    Ok(Json(boards))
}

/// Create a board (POST /api/kanban/boards)
///
/// A fresh board always starts with the default TODO / IN_PROGRESS / DONE
/// columns so clients have a landing column for new tasks.
pub async fn create_board(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), BackendError> {
    let pool = state.pool()?;

    if req.title.trim().is_empty() {
        return Err(BackendError::bad_request("Title is required"));
    }

    tracing::info!(
        "[Server] Creating board '{}' for user {}",
        req.title,
        user.user_id
    );

    let board = db::insert_board(pool, user.user_id, &req.title).await?;
    db::insert_default_columns(pool, board.id).await?;

    Ok((StatusCode::CREATED, Json(board)))
}
