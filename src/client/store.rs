//! Reconciling Task/Column Store
//!
//! Single source of truth for the board a client is currently viewing.
//! Every mutating operation follows the same contract: set the loading
//! flag, call the persistence API, then either merge the server's returned
//! representation into local state or record the failure in the error slot.
//! Local state is never trusted over the server's: merges always take the
//! server shape.
//!
//! The one deliberate exception is the drag-reorder path (see `dnd`):
//! reordering mutates local state before the round trip completes so the
//! drop lands instantly, and a failed persistence leaves local state
//! diverged until the next full refetch (realtime-triggered or manual)
//! reconverges it. That divergence window is a latency/consistency
//! trade-off, not an oversight.
//!
//! # Error Contract
//!
//! Operations record failures in the `error` slot for the UI to poll. Only
//! `create_board` additionally returns its failure, because first-run
//! bootstrap ("create a default board if none exists") must branch on it.

use thiserror::Error;
use uuid::Uuid;

use crate::client::api::{ApiError, KanbanApi};
use crate::shared::model::{
    AssignableUser, Board, BoardColumn, CreateBoardRequest, CreateColumnRequest,
    CreateTaskRequest, Task, TaskPositionUpdate, UpdateColumnRequest, UpdateTaskRequest,
};

/// Identifier forced onto the first column of every board so a default
/// landing column always exists.
pub const DEFAULT_COLUMN_ID: &str = "TODO";

/// Color assigned to columns created without one.
pub const DEFAULT_COLUMN_COLOR: &str = "#6b7280";

/// Errors surfaced by store operations that return a `Result`
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Derive a column identifier from its title: uppercased, whitespace runs
/// joined with underscores.
pub fn column_id_from_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Client-side authoritative cache of the current board's state.
///
/// Generic over the persistence API so tests can run against an in-memory
/// implementation.
pub struct BoardStore<A> {
    api: A,
    pub boards: Vec<Board>,
    pub columns: Vec<BoardColumn>,
    pub tasks: Vec<Task>,
    pub users: Vec<AssignableUser>,
    pub current_board_id: Option<Uuid>,
    pub dragged_task: Option<Uuid>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<A: KanbanApi> BoardStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            boards: Vec::new(),
            columns: Vec::new(),
            tasks: Vec::new(),
            users: Vec::new(),
            current_board_id: None,
            dragged_task: None,
            is_loading: false,
            error: None,
        }
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn finish(&mut self, error: Option<String>) {
        self.is_loading = false;
        self.error = error;
    }

    /// Select the board the client is viewing.
    pub fn set_current_board(&mut self, board_id: Uuid) {
        self.current_board_id = Some(board_id);
    }

    /// Track the task currently being dragged (UI overlay state).
    pub fn drag_task(&mut self, task_id: Option<Uuid>) {
        self.dragged_task = task_id;
    }

    /// Fetch all boards visible to the caller and replace the local list.
    /// Selects the first board when none is current yet.
    pub async fn load_boards(&mut self) {
        self.begin();
        match self.api.load_boards().await {
            Ok(boards) => {
                if self.current_board_id.is_none() {
                    self.current_board_id = boards.first().map(|b| b.id);
                }
                self.boards = boards;
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Create a board, make it current and load its columns.
    ///
    /// Unlike the other operations this also returns the failure, so a
    /// caller creating a default board on first use can detect it.
    pub async fn create_board(&mut self, title: &str) -> Result<(), StoreError> {
        if title.trim().is_empty() {
            let error = StoreError::Validation("Board title cannot be empty".to_string());
            self.error = Some(error.to_string());
            return Err(error);
        }

        self.begin();
        let req = CreateBoardRequest {
            title: title.to_string(),
        };
        match self.api.create_board(&req).await {
            Ok(board) => {
                let board_id = board.id;
                self.boards.push(board);
                self.current_board_id = Some(board_id);
                self.finish(None);
                self.load_columns(board_id).await;
                Ok(())
            }
            Err(e) => {
                self.finish(Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Replace the local column list with the server's state for the board.
    ///
    /// This is the refresh the realtime subscriber triggers after a
    /// debounced `column_*` event.
    pub async fn load_columns(&mut self, board_id: Uuid) {
        self.begin();
        match self.api.load_columns(board_id).await {
            Ok(columns) => {
                self.columns = columns;
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Replace the local task list with the server's state for the board.
    pub async fn load_tasks(&mut self, board_id: Uuid) {
        self.begin();
        match self.api.load_tasks(board_id).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Create a column on the current board and append it locally.
    ///
    /// The very first column of a board is force-assigned the fixed
    /// [`DEFAULT_COLUMN_ID`] regardless of title; later columns derive
    /// their id from the title.
    pub async fn add_col(&mut self, title: &str, color: Option<&str>) {
        let Some(board_id) = self.current_board_id else {
            self.error = Some("No board selected".to_string());
            return;
        };

        let column_id = if self.columns.is_empty() {
            DEFAULT_COLUMN_ID.to_string()
        } else {
            column_id_from_title(title)
        };

        self.begin();
        let req = CreateColumnRequest {
            id: column_id,
            title: title.to_string(),
            color: Some(color.unwrap_or(DEFAULT_COLUMN_COLOR).to_string()),
            board_id,
        };
        match self.api.create_column(&req).await {
            Ok(column) => {
                self.columns.push(column);
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Rename/recolor a column and merge the server's version by id.
    pub async fn update_col(&mut self, id: &str, new_name: &str, color: Option<&str>) {
        self.begin();
        let req = UpdateColumnRequest {
            title: Some(new_name.to_string()),
            color: color.map(str::to_string),
            order: None,
        };
        match self.api.update_column(id, &req).await {
            Ok(updated) => {
                for column in &mut self.columns {
                    if column.id == id {
                        *column = updated.clone();
                    }
                }
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Delete a column remotely, then drop it and every task in it from
    /// local state, mirroring the server's cascade. Confirmation is a UI
    /// concern, not the store's.
    pub async fn remove_col(&mut self, id: &str) {
        self.begin();
        match self.api.delete_column(id).await {
            Ok(()) => {
                self.columns.retain(|column| column.id != id);
                self.tasks.retain(|task| task.column_id != id);
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Create a task in the first column of the current board and append
    /// the server's representation (creator/assignee resolved) locally.
    ///
    /// Requires a current board and at least one column; both failures are
    /// recorded, not thrown.
    pub async fn add_task(
        &mut self,
        title: &str,
        description: Option<&str>,
        assigned_to_id: Option<Uuid>,
    ) {
        let Some(board_id) = self.current_board_id else {
            self.error = Some("No board selected".to_string());
            return;
        };
        let Some(first_column) = self.columns.first() else {
            self.error = Some("No columns available. Please create a column first.".to_string());
            return;
        };
        let column_id = first_column.id.clone();

        self.begin();
        let req = CreateTaskRequest {
            title: title.to_string(),
            description: description.map(str::to_string),
            status: column_id.clone(),
            column_id,
            board_id,
            assigned_to_id,
        };
        match self.api.create_task(&req).await {
            Ok(task) => {
                self.tasks.push(task);
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Partial task update; the matching local task is replaced wholesale
    /// by the server's returned representation.
    pub async fn update_task(&mut self, id: Uuid, updates: UpdateTaskRequest) {
        self.begin();
        match self.api.update_task(id, &updates).await {
            Ok(updated) => {
                for task in &mut self.tasks {
                    if task.id == id {
                        *task = updated.clone();
                    }
                }
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Delete a task remotely, then filter it out of local state.
    pub async fn remove_task(&mut self, id: Uuid) {
        self.begin();
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Persist a drag gesture in one request.
    ///
    /// Each task in the response replaces its local counterpart by id;
    /// tasks missing from the response are left untouched.
    pub async fn bulk_update_tasks(&mut self, updates: &[TaskPositionUpdate]) {
        self.begin();
        match self.api.bulk_update_tasks(updates).await {
            Ok(updated) => {
                for task in &mut self.tasks {
                    if let Some(fresh) = updated.iter().find(|u| u.id == task.id) {
                        *task = fresh.clone();
                    }
                }
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }

    /// Fetch the assignable-user list and replace the local one.
    pub async fn load_users(&mut self) {
        self.begin();
        match self.api.load_users().await {
            Ok(users) => {
                self.users = users;
                self.finish(None);
            }
            Err(e) => self.finish(Some(e.to_string())),
        }
    }
}
