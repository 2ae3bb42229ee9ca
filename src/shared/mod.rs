//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client library and the backend server. All types are designed for
//! serialization and transmission over HTTP; the wire format is the
//! camelCase JSON the platform's existing API speaks.

/// Kanban value objects and request payloads
pub mod model;

/// Real-time update event
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use event::{KanbanUpdate, UpdateKind};
pub use model::{
    AssignableUser, Board, BoardColumn, Role, Task, TaskPositionUpdate, UserRef,
};
