//! Persistence API Client
//!
//! The `KanbanApi` trait is the store's only window onto the server. The
//! production implementation speaks HTTP with `reqwest`; tests substitute
//! an in-memory implementation behind the same trait.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::client::config::ClientConfig;
use crate::shared::model::{
    AssignableUser, Board, BoardColumn, BulkUpdateRequest, CreateBoardRequest,
    CreateColumnRequest, CreateTaskRequest, Task, TaskPositionUpdate, UpdateColumnRequest,
    UpdateTaskRequest,
};

/// Errors from the persistence API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("request failed with status {status}: {message}")]
    Status {
        status: u16,
        message: String,
    },
}

/// Operations the store needs from the server
///
/// One method per REST route. All scoping (which boards, which users) is
/// decided server-side; the client just asks.
#[async_trait]
pub trait KanbanApi: Send + Sync {
    async fn load_boards(&self) -> Result<Vec<Board>, ApiError>;
    async fn create_board(&self, req: &CreateBoardRequest) -> Result<Board, ApiError>;
    async fn load_columns(&self, board_id: Uuid) -> Result<Vec<BoardColumn>, ApiError>;
    async fn create_column(&self, req: &CreateColumnRequest) -> Result<BoardColumn, ApiError>;
    async fn update_column(
        &self,
        id: &str,
        req: &UpdateColumnRequest,
    ) -> Result<BoardColumn, ApiError>;
    async fn delete_column(&self, id: &str) -> Result<(), ApiError>;
    async fn load_tasks(&self, board_id: Uuid) -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task, ApiError>;
    async fn update_task(&self, id: Uuid, req: &UpdateTaskRequest) -> Result<Task, ApiError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError>;
    async fn bulk_update_tasks(
        &self,
        updates: &[TaskPositionUpdate],
    ) -> Result<Vec<Task>, ApiError>;
    async fn load_users(&self) -> Result<Vec<AssignableUser>, ApiError>;
}

/// HTTP implementation of [`KanbanApi`]
#[derive(Debug, Clone)]
pub struct HttpKanbanApi {
    config: ClientConfig,
    client: Client,
}

impl HttpKanbanApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.config.api_url(path));
        if let Some(token) = self.config.token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl KanbanApi for HttpKanbanApi {
    async fn load_boards(&self) -> Result<Vec<Board>, ApiError> {
        let response = self.request(Method::GET, "/api/kanban/boards").send().await?;
        Self::parse(response).await
    }

    async fn create_board(&self, req: &CreateBoardRequest) -> Result<Board, ApiError> {
        let response = self
            .request(Method::POST, "/api/kanban/boards")
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn load_columns(&self, board_id: Uuid) -> Result<Vec<BoardColumn>, ApiError> {
        let response = self
            .request(Method::GET, "/api/kanban/columns")
            .query(&[("boardId", board_id.to_string())])
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_column(&self, req: &CreateColumnRequest) -> Result<BoardColumn, ApiError> {
        let response = self
            .request(Method::POST, "/api/kanban/columns")
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn update_column(
        &self,
        id: &str,
        req: &UpdateColumnRequest,
    ) -> Result<BoardColumn, ApiError> {
        let response = self
            .request(Method::PUT, &format!("/api/kanban/columns/{}", id))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn delete_column(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/api/kanban/columns/{}", id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn load_tasks(&self, board_id: Uuid) -> Result<Vec<Task>, ApiError> {
        let response = self
            .request(Method::GET, "/api/kanban/tasks")
            .query(&[("boardId", board_id.to_string())])
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task, ApiError> {
        let response = self
            .request(Method::POST, "/api/kanban/tasks")
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn update_task(&self, id: Uuid, req: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let response = self
            .request(Method::PUT, &format!("/api/kanban/tasks/{}", id))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/api/kanban/tasks/{}", id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn bulk_update_tasks(
        &self,
        updates: &[TaskPositionUpdate],
    ) -> Result<Vec<Task>, ApiError> {
        let body = BulkUpdateRequest {
            tasks: updates.to_vec(),
        };
        let response = self
            .request(Method::PUT, "/api/kanban/tasks/bulk")
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn load_users(&self) -> Result<Vec<AssignableUser>, ApiError> {
        let response = self.request(Method::GET, "/api/kanban/users").send().await?;
        Self::parse(response).await
    }
}
