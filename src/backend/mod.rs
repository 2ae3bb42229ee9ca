//! Backend Module
//!
//! Server-side code: the Axum HTTP server exposing the Kanban REST API and
//! the Server-Sent Events push endpoint. Only compiled with the `server`
//! feature.
//!
//! # Architecture
//!
//! - **`realtime`** - Connection registry, broadcast dispatcher, SSE endpoint
//! - **`kanban`** - REST handlers and Postgres persistence
//! - **`auth`** / **`middleware`** - JWT verification and request identity
//! - **`server`** - Application state and bootstrap
//! - **`routes`** - Router assembly
//! - **`error`** - Backend error types and HTTP conversion

/// Backend error types
pub mod error;

/// Session token helpers
pub mod auth;

/// Request middleware (authentication)
pub mod middleware;

/// Real-time update system
pub mod realtime;

/// Kanban REST API and persistence
pub mod kanban;

/// Server state and bootstrap
pub mod server;

/// Router configuration
pub mod routes;
