/**
 * Real-time Event Broadcasting
 *
 * Fan-out of one board update to every registered connection except the
 * originator's. Called from the Kanban REST handlers after each successful
 * mutation, with the acting user's id as the exclusion, so local REST
 * mutations become pushes to every other client.
 *
 * # Failure Policy
 *
 * Fire-and-forget. The event is serialized once; a connection whose
 * channel is broken is removed from the registry and skipped, and the
 * broadcast continues to the remaining connections. One bad channel never
 * aborts the broadcast, and no write is retried.
 */

use uuid::Uuid;

use crate::backend::realtime::registry::ConnectionRegistry;
use crate::shared::KanbanUpdate;

/// Broadcast an update to every connection except the excluded user's
///
/// # Arguments
///
/// * `registry` - The connection registry
/// * `update` - The event to broadcast
/// * `exclude_user` - The originating user, excluded from fan-out
///
/// # Returns
///
/// Number of connections the event was delivered to (0 if none are
/// registered or the event failed to serialize).
pub fn broadcast_update(
    registry: &ConnectionRegistry,
    update: &KanbanUpdate,
    exclude_user: Option<Uuid>,
) -> usize {
    let frame = match serde_json::to_string(update) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!("[Realtime] Failed to serialize update: {:?}", e);
            return 0;
        }
    };

    let delivered = registry.fan_out(&frame, exclude_user);
    tracing::debug!(
        "[Realtime] {:?} event delivered to {} connection(s)",
        update.kind,
        delivered
    );
    delivered
}
