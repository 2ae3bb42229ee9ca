//! Backend error handling
//!
//! - **`types`** - The `BackendError` enum and status-code mapping
//! - **`conversion`** - `IntoResponse` implementation for Axum handlers

pub mod conversion;
pub mod types;

pub use types::BackendError;
