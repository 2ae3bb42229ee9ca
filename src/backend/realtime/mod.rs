//! Real-time Update Module
//!
//! This module pushes board updates to connected clients over Server-Sent
//! Events. SSE is one-way server-to-client, which is all this system needs:
//! clients never send anything back over the stream, they refetch over the
//! REST API instead.
//!
//! # Architecture
//!
//! The realtime module is organized into focused submodules:
//!
//! - **`registry`** - Process-wide map of user id to live push handle
//! - **`broadcast`** - Fan-out of one event to every connection but the
//!   originator's
//! - **`subscription`** - The SSE endpoint handler and its cleanup guard
//!
//! # Delivery Guarantees
//!
//! At-most-once, unordered, best-effort. A connection whose channel is
//! broken at broadcast time is dropped from the registry and skipped; the
//! affected client reconverges through its reconnect-and-refetch loop, not
//! through replay.
//!
//! # Deployment Note
//!
//! The registry is process-local. Running more than one server instance
//! requires backing it with an external pub/sub channel behind the same
//! `ConnectionRegistry` surface.

/// Process-wide connection registry
pub mod registry;

/// Event fan-out
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::broadcast_update;
pub use registry::ConnectionRegistry;
pub use subscription::handle_events_subscription;
