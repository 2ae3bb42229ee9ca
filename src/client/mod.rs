//! Client Module
//!
//! The headless client half of the realtime Kanban core. The platform's UI
//! layers (dialogs, board rendering, drag sensors) sit on top of this
//! module; nothing in here draws anything.
//!
//! # Pieces
//!
//! - **`config`** - Server URL and bearer token
//! - **`api`** - The `KanbanApi` trait and its HTTP implementation
//! - **`store`** - Reconciling task/column store (single source of truth
//!   for the board being viewed)
//! - **`dnd`** - Drag-and-drop reordering semantics
//! - **`debounce`** - Single-slot cancellable timer
//! - **`subscriber`** - Push stream consumer with fixed-delay reconnect

/// Client configuration
pub mod config;

/// Persistence API client
pub mod api;

/// Reconciling task/column store
pub mod store;

/// Drag-and-drop reordering
pub mod dnd;

/// Cancellable single-slot timer
pub mod debounce;

/// Realtime subscriber
pub mod subscriber;

pub use api::{ApiError, HttpKanbanApi, KanbanApi};
pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use dnd::{array_move, DragEntity};
pub use store::{BoardStore, StoreError};
pub use subscriber::{ConnectionState, KanbanRealtime, ReconnectPolicy};
