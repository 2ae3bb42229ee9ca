//! Kanban REST API
//!
//! Route handlers and persistence for boards, columns, tasks and the
//! assignable-user list. Every successful mutation broadcasts a realtime
//! update with the acting user excluded, which is how REST mutations become
//! pushes to the other connected clients.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;
