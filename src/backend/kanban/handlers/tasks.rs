/**
 * Task Handlers
 *
 * GET    /api/kanban/tasks?boardId= - a board's tasks in order
 * POST   /api/kanban/tasks          - create a task
 * PUT    /api/kanban/tasks/{id}     - partial update
 * DELETE /api/kanban/tasks/{id}     - delete
 * PUT    /api/kanban/tasks/bulk     - drag-and-drop position batch
 *
 * The bulk route exists so a whole drag gesture persists in one request
 * instead of one round trip per moved item. Mutations broadcast `task_*`
 * updates to every other connected client.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::kanban::db;
use crate::backend::kanban::handlers::BoardQuery;
use crate::backend::middleware::AuthUser;
use crate::backend::realtime::broadcast_update;
use crate::backend::server::state::AppState;
use crate::shared::model::{BulkUpdateRequest, CreateTaskRequest, Task, UpdateTaskRequest};
use crate::shared::KanbanUpdate;

/// List a board's tasks (GET /api/kanban/tasks?boardId=)
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Vec<Task>>, BackendError> {
    let pool = state.pool()?;

    if !db::board_visible(pool, query.board_id, &user).await? {
        return Err(BackendError::not_found("Board not found or access denied"));
    }

    let tasks = db::fetch_tasks(pool, query.board_id, &user).await?;
    Ok(Json(tasks))
}

/// Create a task (POST /api/kanban/tasks)
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), BackendError> {
    let pool = state.pool()?;

    if req.title.trim().is_empty() || req.status.trim().is_empty() || req.column_id.trim().is_empty()
    {
        return Err(BackendError::bad_request(
            "Title, status, columnId, and boardId are required",
        ));
    }

    let order = db::next_task_order(pool, req.board_id, &req.column_id, user.user_id).await?;
    let task_id = db::insert_task(pool, user.user_id, &req, order).await?;
    let task = db::fetch_task_with_users(pool, task_id)
        .await?
        .ok_or_else(|| BackendError::state("Created task vanished before read-back"))?;

    broadcast_update(
        &state.registry,
        &KanbanUpdate::task_created(&task),
        Some(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task (PUT /api/kanban/tasks/{id})
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, BackendError> {
    let pool = state.pool()?;

    let task_id = db::update_task(pool, id, &req, &user)
        .await?
        .ok_or_else(|| BackendError::not_found("Task not found or access denied"))?;
    let task = db::fetch_task_with_users(pool, task_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Task not found"))?;

    broadcast_update(
        &state.registry,
        &KanbanUpdate::task_updated(serde_json::json!(task), task.board_id),
        Some(user.user_id),
    );

    Ok(Json(task))
}

/// Delete a task (DELETE /api/kanban/tasks/{id})
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let pool = state.pool()?;

    let (task_id, board_id) = db::delete_task(pool, id, &user)
        .await?
        .ok_or_else(|| BackendError::not_found("Task not found or access denied"))?;

    broadcast_update(
        &state.registry,
        &KanbanUpdate::task_deleted(task_id, board_id),
        Some(user.user_id),
    );

    Ok(Json(
        serde_json::json!({ "message": "Task deleted successfully" }),
    ))
}

/// Bulk position update (PUT /api/kanban/tasks/bulk)
///
/// Applies each entry independently; entries the caller cannot write are
/// skipped rather than failing the batch. Responds with the full updated
/// tasks (creator/assignee resolved) and broadcasts one `task_updated`
/// event carrying the whole batch.
pub async fn bulk_update_tasks(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<BulkUpdateRequest>,
) -> Result<Json<Vec<Task>>, BackendError> {
    let pool = state.pool()?;

    let mut updated_ids = Vec::new();
    for update in &req.tasks {
        if let Some(id) = db::apply_position_update(pool, update, &user).await? {
            updated_ids.push(id);
        }
    }

    if updated_ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let tasks = db::fetch_tasks_with_users_by_ids(pool, &updated_ids).await?;

    if let Some(board_id) = tasks.first().map(|t| t.board_id) {
        broadcast_update(
            &state.registry,
            &KanbanUpdate::task_updated(serde_json::json!({ "tasks": tasks }), board_id),
            Some(user.user_id),
        );
    }

    Ok(Json(tasks))
}
