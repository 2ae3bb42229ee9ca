/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events handler for the
 * `GET /api/kanban/events` endpoint: a long-lived, one-way stream of board
 * update events.
 *
 * # Connection Lifecycle
 *
 * - On open: the request must carry an authenticated user (the auth
 *   middleware rejects with 401 before a stream is created). The
 *   connection is registered and a `connected` handshake frame is emitted
 *   immediately so the client can confirm the stream is live.
 * - On close: a guard owned by the stream unregisters the connection. The
 *   guard's `Drop` runs on every termination path - client disconnect,
 *   network failure, or server shutdown.
 *
 * The stream never terminates on its own; it stays open until the
 * transport closes it or the registry entry is replaced by a newer
 * connection for the same user (which drops the entry's sender and ends
 * this stream). Axum's keep-alive mechanism injects comment frames to keep
 * intermediaries from cutting the idle connection.
 */

use std::convert::Infallible;

use axum::{
    extract::State,
    http::header,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
};
use tokio_stream::{wrappers::UnboundedReceiverStream, StreamExt};
use uuid::Uuid;

use crate::backend::middleware::AuthUser;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::backend::server::state::AppState;
use crate::shared::KanbanUpdate;

/// Unregisters the connection when the stream is dropped.
struct ConnectionGuard {
    registry: ConnectionRegistry,
    user_id: Uuid,
    generation: u64,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.registry.unregister(self.user_id, self.generation);
    }
}

/// Handle a push stream subscription (GET /api/kanban/events)
///
/// Each message on the stream is a single JSON-encoded [`KanbanUpdate`] in
/// its own `data:` frame. The first message after connect is always
/// `{"type":"connected","userId":...}`.
///
/// The response disables caching so intermediaries do not buffer the
/// stream; cross-origin reads are allowed by the CORS layer on the router.
pub async fn handle_events_subscription(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> impl IntoResponse {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    let generation = state.registry.register(user.user_id, tx.clone());
    let guard = ConnectionGuard {
        registry: state.registry.clone(),
        user_id: user.user_id,
        generation,
    };

    // Handshake before any update can be broadcast to this connection.
    match serde_json::to_string(&KanbanUpdate::connected(user.user_id)) {
        Ok(frame) => {
            let _ = tx.send(frame);
        }
        Err(e) => tracing::error!("[Realtime] Failed to serialize handshake: {:?}", e),
    }

    // The registry holds the only sender once `tx` goes out of scope, so
    // the stream ends when the entry is removed or replaced. The guard is
    // owned by the closure and dropped with the stream.
    let stream = UnboundedReceiverStream::new(rx).map(move |frame| {
        let _ = &guard;
        Ok::<Event, Infallible>(Event::default().data(frame))
    });

    (
        [(header::CACHE_CONTROL, "no-cache")],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
}
