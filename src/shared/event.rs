/**
 * Real-time Update Event
 *
 * This module defines the event pushed to connected clients whenever board
 * state changes. The payload is an invalidation hint, not an authoritative
 * delta: receivers react by refetching the affected collection, never by
 * applying the payload directly.
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::model::{Board, BoardColumn, Task};

/// Kind of real-time update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    /// Handshake emitted as the first frame of every stream
    Connected,
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    ColumnCreated,
    ColumnUpdated,
    ColumnDeleted,
    BoardUpdated,
}

/// Real-time update event delivered over the push stream
///
/// `board_id` scopes relevance: subscribers viewing a different board drop
/// the event. `user_id` is only populated on the `connected` handshake; for
/// mutations the originator is excluded at fan-out time instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanUpdate {
    /// Kind of update
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    /// Opaque payload (the affected entity or a collection)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    /// Board the update belongs to
    #[serde(rename = "boardId", default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<Uuid>,
    /// User the update concerns (handshake only)
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl KanbanUpdate {
    /// Create a new update event
    pub fn new(kind: UpdateKind, data: Value) -> Self {
        Self {
            kind,
            data,
            board_id: None,
            user_id: None,
        }
    }

    /// Scope the event to a board
    pub fn with_board(mut self, board_id: Uuid) -> Self {
        self.board_id = Some(board_id);
        self
    }

    /// The handshake frame confirming a live stream
    pub fn connected(user_id: Uuid) -> Self {
        Self {
            kind: UpdateKind::Connected,
            data: Value::Null,
            board_id: None,
            user_id: Some(user_id),
        }
    }

    pub fn task_created(task: &Task) -> Self {
        Self::new(UpdateKind::TaskCreated, serde_json::json!(task)).with_board(task.board_id)
    }

    pub fn task_updated(data: Value, board_id: Uuid) -> Self {
        Self::new(UpdateKind::TaskUpdated, data).with_board(board_id)
    }

    pub fn task_deleted(task_id: Uuid, board_id: Uuid) -> Self {
        Self::new(UpdateKind::TaskDeleted, serde_json::json!({ "id": task_id }))
            .with_board(board_id)
    }

    pub fn column_created(column: &BoardColumn) -> Self {
        Self::new(UpdateKind::ColumnCreated, serde_json::json!(column)).with_board(column.board_id)
    }

    pub fn column_updated(column: &BoardColumn) -> Self {
        Self::new(UpdateKind::ColumnUpdated, serde_json::json!(column)).with_board(column.board_id)
    }

    pub fn column_deleted(column_id: &str, board_id: Uuid) -> Self {
        Self::new(
            UpdateKind::ColumnDeleted,
            serde_json::json!({ "id": column_id }),
        )
        .with_board(board_id)
    }

    pub fn board_updated(board: &Board) -> Self {
        Self::new(UpdateKind::BoardUpdated, serde_json::json!(board)).with_board(board.id)
    }
}
