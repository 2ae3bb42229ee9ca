//! Test fixtures: an in-memory `KanbanApi` implementation and entity
//! builders shared by the integration suites.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use gasakboard::client::{ApiError, KanbanApi};
use gasakboard::shared::model::{
    AssignableUser, Board, BoardColumn, CreateBoardRequest, CreateColumnRequest,
    CreateTaskRequest, Role, Task, TaskPositionUpdate, UpdateColumnRequest, UpdateTaskRequest,
};

pub fn board(title: &str) -> Board {
    Board {
        id: Uuid::new_v4(),
        title: title.to_string(),
        user_id: Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn column(board_id: Uuid, id: &str, title: &str, order: i32) -> BoardColumn {
    BoardColumn {
        id: id.to_string(),
        title: title.to_string(),
        color: Some("#6b7280".to_string()),
        board_id,
        order,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn task(board_id: Uuid, column_id: &str, title: &str, order: i32) -> Task {
    let user_id = Uuid::new_v4();
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        status: column_id.to_string(),
        column_id: column_id.to_string(),
        board_id,
        user_id,
        created_by_id: user_id,
        assigned_to_id: None,
        order,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        created_by: None,
        assigned_to: None,
    }
}

pub fn assignable_user(name: &str) -> AssignableUser {
    AssignableUser {
        id: Uuid::new_v4(),
        name: Some(name.to_string()),
        email: format!("{}@gasak.gg", name.to_lowercase()),
        role: Role::Admin,
    }
}

/// Backing state of the in-memory API, inspectable by tests.
#[derive(Default)]
pub struct ApiState {
    pub boards: Vec<Board>,
    pub columns: Vec<BoardColumn>,
    pub tasks: Vec<Task>,
    pub users: Vec<AssignableUser>,

    /// Every bulk batch the store sent, in order.
    pub bulk_calls: Vec<Vec<TaskPositionUpdate>>,
    /// Collection-load counters, for debounce assertions.
    pub board_loads: usize,
    pub column_loads: usize,
    pub task_loads: usize,

    /// When set, the next call fails once with this message.
    pub fail_next: Option<String>,
}

/// In-memory `KanbanApi` mirroring the server's observable contract
/// (order assignment, default columns on new boards, column-delete
/// cascade).
#[derive(Clone, Default)]
pub struct InMemoryApi {
    pub state: Arc<Mutex<ApiState>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(setup: impl FnOnce(&mut ApiState)) -> Self {
        let api = Self::new();
        setup(&mut api.state.lock().unwrap());
        api
    }

    pub fn fail_next(&self, message: &str) {
        self.state.lock().unwrap().fail_next = Some(message.to_string());
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        if let Some(message) = self.state.lock().unwrap().fail_next.take() {
            return Err(ApiError::Status {
                status: 500,
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KanbanApi for InMemoryApi {
    async fn load_boards(&self) -> Result<Vec<Board>, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.board_loads += 1;
        Ok(state.boards.clone())
    }

    async fn create_board(&self, req: &CreateBoardRequest) -> Result<Board, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let new_board = board(&req.title);
        // The server seeds every new board with the default column trio.
        let defaults = [("TODO", "Todo"), ("IN_PROGRESS", "In Progress"), ("DONE", "Done")];
        for (order, (id, title)) in defaults.into_iter().enumerate() {
            state.columns.push(column(new_board.id, id, title, order as i32));
        }
        state.boards.push(new_board.clone());
        Ok(new_board)
    }

    async fn load_columns(&self, board_id: Uuid) -> Result<Vec<BoardColumn>, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.column_loads += 1;
        let mut columns: Vec<_> = state
            .columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect();
        columns.sort_by_key(|c| c.order);
        Ok(columns)
    }

    async fn create_column(&self, req: &CreateColumnRequest) -> Result<BoardColumn, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let order = state
            .columns
            .iter()
            .filter(|c| c.board_id == req.board_id)
            .count() as i32;
        let mut new_column = column(req.board_id, &req.id, &req.title, order);
        new_column.color = req.color.clone();
        state.columns.push(new_column.clone());
        Ok(new_column)
    }

    async fn update_column(
        &self,
        id: &str,
        req: &UpdateColumnRequest,
    ) -> Result<BoardColumn, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let found = state.columns.iter_mut().find(|c| c.id == id);
        let Some(col) = found else {
            return Err(ApiError::Status {
                status: 404,
                message: "Column not found".to_string(),
            });
        };
        if let Some(title) = &req.title {
            col.title = title.clone();
        }
        if let Some(color) = &req.color {
            col.color = Some(color.clone());
        }
        if let Some(order) = req.order {
            col.order = order;
        }
        col.updated_at = Utc::now();
        Ok(col.clone())
    }

    async fn delete_column(&self, id: &str) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.columns.retain(|c| c.id != id);
        // FK cascade
        state.tasks.retain(|t| t.column_id != id);
        Ok(())
    }

    async fn load_tasks(&self, board_id: Uuid) -> Result<Vec<Task>, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.task_loads += 1;
        let mut tasks: Vec<_> = state
            .tasks
            .iter()
            .filter(|t| t.board_id == board_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let order = state
            .tasks
            .iter()
            .filter(|t| t.board_id == req.board_id && t.column_id == req.column_id)
            .count() as i32;
        let mut new_task = task(req.board_id, &req.column_id, &req.title, order);
        new_task.description = req.description.clone();
        new_task.status = req.status.clone();
        new_task.assigned_to_id = req.assigned_to_id;
        state.tasks.push(new_task.clone());
        Ok(new_task)
    }

    async fn update_task(&self, id: Uuid, req: &UpdateTaskRequest) -> Result<Task, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let found = state.tasks.iter_mut().find(|t| t.id == id);
        let Some(task) = found else {
            return Err(ApiError::Status {
                status: 404,
                message: "Task not found".to_string(),
            });
        };
        if let Some(title) = &req.title {
            task.title = title.clone();
        }
        if let Some(description) = &req.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = &req.status {
            task.status = status.clone();
        }
        if let Some(column_id) = &req.column_id {
            task.column_id = column_id.clone();
        }
        if let Some(order) = req.order {
            task.order = order;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.tasks.retain(|t| t.id != id);
        Ok(())
    }

    async fn bulk_update_tasks(
        &self,
        updates: &[TaskPositionUpdate],
    ) -> Result<Vec<Task>, ApiError> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.bulk_calls.push(updates.to_vec());

        let mut updated = Vec::new();
        for update in updates {
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == update.id) {
                if let Some(status) = &update.status {
                    task.status = status.clone();
                }
                if let Some(column_id) = &update.column_id {
                    task.column_id = column_id.clone();
                }
                if let Some(order) = update.order {
                    task.order = order;
                }
                task.updated_at = Utc::now();
                updated.push(task.clone());
            }
        }
        Ok(updated)
    }

    async fn load_users(&self) -> Result<Vec<AssignableUser>, ApiError> {
        self.check_failure()?;
        Ok(self.state.lock().unwrap().users.clone())
    }
}
