//! Kanban value objects
//!
//! Boards, columns, tasks and the request payloads exchanged with the
//! Kanban API. Column identifiers are title-derived strings (a column id
//! doubles as a task's status value); everything else is keyed by UUID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Platform role of a user. Role computation itself belongs to the org
/// platform; this crate only scopes queries by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Leader,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Leader => "leader",
            Role::Member => "member",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "leader" => Ok(Role::Leader),
            "member" => Ok(Role::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A named collection of columns and tasks, owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named, ordered lane within a board.
///
/// `order` values are dense, zero-based integers unique per board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub id: String,
    pub title: String,
    pub color: Option<String>,
    pub board_id: Uuid,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal user reference resolved onto tasks (creator/assignee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A unit of work belonging to exactly one column of one board.
///
/// `status` mirrors the column identifier; `order` is dense per
/// (board, column) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub column_id: String,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub created_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_by: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub assigned_to: Option<UserRef>,
}

/// A user that tasks can be assigned to. Which users are listed is a
/// role-scoping decision made server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignableUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
}

/// Body of `POST /api/kanban/boards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
}

/// Body of `POST /api/kanban/columns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    pub id: String,
    pub title: String,
    pub color: Option<String>,
    pub board_id: Uuid,
}

/// Body of `PUT /api/kanban/columns/{id}`. All fields optional; absent
/// fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateColumnRequest {
    pub title: Option<String>,
    pub color: Option<String>,
    pub order: Option<i32>,
}

/// Body of `POST /api/kanban/tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub column_id: String,
    pub board_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
}

/// Body of `PUT /api/kanban/tasks/{id}`. Partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub column_id: Option<String>,
    pub order: Option<i32>,
}

/// One entry of the bulk drag-persistence payload
/// (`PUT /api/kanban/tasks/bulk`).
///
/// A whole drag gesture is persisted in one request instead of one
/// `PUT /tasks/{id}` round trip per moved item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPositionUpdate {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub order: Option<i32>,
}

/// Body of `PUT /api/kanban/tasks/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    pub tasks: Vec<TaskPositionUpdate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Scrim block".to_string(),
            description: None,
            status: "TODO".to_string(),
            column_id: "TODO".to_string(),
            board_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_by_id: Uuid::new_v4(),
            assigned_to_id: None,
            order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
            assigned_to: None,
        }
    }

    #[test]
    fn test_task_wire_format_is_camel_case() {
        let task = sample_task();
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("columnId").is_some());
        assert!(json.get("boardId").is_some());
        assert!(json.get("createdById").is_some());
        assert!(json.get("column_id").is_none());
    }

    #[test]
    fn test_task_omits_unresolved_user_refs() {
        let task = sample_task();
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdBy").is_none());
        assert!(json.get("assignedTo").is_none());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Leader, Role::Member] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn test_position_update_skips_absent_fields() {
        let update = TaskPositionUpdate {
            id: Uuid::new_v4(),
            status: Some("DONE".to_string()),
            column_id: None,
            order: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("status").is_some());
        assert!(json.get("columnId").is_none());
        assert!(json.get("order").is_none());
    }
}
