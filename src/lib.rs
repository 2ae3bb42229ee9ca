#![recursion_limit = "256"]

//! gasakboard - Real-time Kanban core
//!
//! gasakboard is the real-time Kanban synchronization service of the GASAK
//! esports organization platform. It keeps drag-and-drop task and column
//! state consistent across concurrent users by pairing a server-push event
//! stream with a client-side reconciling store.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types used by both halves
//!   - Board/column/task value objects and request payloads
//!   - The realtime update event
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with the `server` feature)
//!   - Axum HTTP server with the Kanban REST API
//!   - Connection registry and broadcast dispatcher
//!   - Server-Sent Events push endpoint
//!   - JWT verification middleware and Postgres persistence
//!
//! - **`client`** - Headless client library
//!   - Reconciling task/column store with optimistic mutation
//!   - Drag-and-drop reordering semantics
//!   - Realtime subscriber with debounced refetch and fixed-delay reconnect
//!
//! # Data Flow
//!
//! A mutation (for example, moving a task) is applied to the client store,
//! persisted through the REST API, and on success the handler broadcasts an
//! update event to every other registered connection. Each receiving client
//! filters the event by its current board, debounces bursts, and refetches
//! the affected collection. Delivery is best-effort and in-memory; a client
//! that misses events converges on its next full refetch.
//!
//! # Feature Flags
//!
//! - **`server`** - Enables the backend module and the `gasakboard-server`
//!   binary. The client library compiles without it.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "server")]
pub mod backend;

/// Headless client library: store, subscriber, persistence client
pub mod client;
