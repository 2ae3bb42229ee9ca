//! Kanban HTTP handlers
//!
//! One file per resource. Handlers authenticate through the `AuthUser`
//! extractor, scope queries by role in `db`, and broadcast a realtime
//! update (excluding the acting user) after every successful mutation.

pub mod boards;
pub mod columns;
pub mod tasks;
pub mod users;

pub use boards::{create_board, list_boards};
pub use columns::{create_column, delete_column, list_columns, update_column};
pub use tasks::{bulk_update_tasks, create_task, delete_task, list_tasks, update_task};
pub use users::list_users;

use serde::Deserialize;

/// Query parameters for the board-scoped collection routes.
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    #[serde(rename = "boardId")]
    pub board_id: uuid::Uuid,
}
