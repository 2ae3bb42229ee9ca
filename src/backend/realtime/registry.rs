/**
 * Connection Registry
 *
 * Process-wide map from a user id to that user's open push channel. One
 * registry instance is created at server start, lives in `AppState`, and is
 * never torn down.
 *
 * # Connection Model
 *
 * At most one live handle per user id: a new registration silently
 * replaces the prior entry, so with multiple open tabs only the most
 * recently opened one receives pushes. Each registration is stamped with a
 * generation counter; unregistration only removes the entry when the
 * generation still matches, so the cleanup of a replaced stream cannot
 * evict its successor.
 *
 * # Concurrency
 *
 * A single mutex over the map. Entries are independent and no operation
 * awaits while holding the lock, so per-key map insert/delete atomicity is
 * all that is required.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// A registered push handle plus the generation it was registered under.
struct Connection {
    generation: u64,
    sender: UnboundedSender<String>,
}

/// Registry of live push connections, keyed by user id.
///
/// Cloning is cheap and shares the underlying map; every request handler
/// in the process sees the same registry.
#[derive(Clone)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<Uuid, Connection>>>,
    next_generation: Arc<AtomicU64>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a push handle for a user, replacing any prior entry.
    ///
    /// Returns the generation stamp to pass back to [`unregister`].
    ///
    /// [`unregister`]: ConnectionRegistry::unregister
    pub fn register(&self, user_id: Uuid, sender: UnboundedSender<String>) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let replaced = self
            .connections
            .lock()
            .unwrap()
            .insert(user_id, Connection { generation, sender });
        if replaced.is_some() {
            tracing::debug!("[Realtime] Replaced existing connection for user {}", user_id);
        }
        tracing::info!("[Realtime] Stream connected for user {}", user_id);
        generation
    }

    /// Remove a user's entry if it still belongs to the given generation.
    ///
    /// No-op when the entry is absent or has been superseded by a newer
    /// connection.
    pub fn unregister(&self, user_id: Uuid, generation: u64) {
        let mut connections = self.connections.lock().unwrap();
        if connections
            .get(&user_id)
            .is_some_and(|conn| conn.generation == generation)
        {
            connections.remove(&user_id);
            tracing::info!("[Realtime] Stream disconnected for user {}", user_id);
        }
    }

    /// Write one serialized frame to every connection except the excluded
    /// user's. Connections whose channel is closed are removed; the write
    /// is never retried and the loop continues to the remaining entries.
    ///
    /// Returns the number of connections the frame was delivered to.
    pub(crate) fn fan_out(&self, frame: &str, exclude_user: Option<Uuid>) -> usize {
        let mut connections = self.connections.lock().unwrap();
        let mut dead = Vec::new();
        let mut delivered = 0;

        for (user_id, connection) in connections.iter() {
            if Some(*user_id) == exclude_user {
                continue;
            }
            match connection.sender.send(frame.to_string()) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    tracing::warn!("[Realtime] Dropping dead connection for user {}", user_id);
                    dead.push(*user_id);
                }
            }
        }

        for user_id in dead {
            connections.remove(&user_id);
        }

        delivered
    }

    /// Number of live connections (for debugging)
    pub fn connection_count(&self) -> usize {
        self.connections.lock().unwrap().len()
    }

    /// Whether a user currently has a registered connection (for debugging)
    pub fn is_connected(&self, user_id: &Uuid) -> bool {
        self.connections.lock().unwrap().contains_key(user_id)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_register_and_unregister() {
        let registry = ConnectionRegistry::new();
        let user_id = Uuid::new_v4();
        let (tx, _rx) = mpsc::unbounded_channel();

        let generation = registry.register(user_id, tx);
        assert!(registry.is_connected(&user_id));

        registry.unregister(user_id, generation);
        assert!(!registry.is_connected(&user_id));
        assert_eq!(registry.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_unregister_absent_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.unregister(Uuid::new_v4(), 1);
        assert_eq!(registry.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_new_registration_replaces_prior_entry() {
        let registry = ConnectionRegistry::new();
        let user_id = Uuid::new_v4();
        let (tx_old, mut rx_old) = mpsc::unbounded_channel();
        let (tx_new, mut rx_new) = mpsc::unbounded_channel();

        registry.register(user_id, tx_old);
        registry.register(user_id, tx_new);
        assert_eq!(registry.connection_count(), 1);

        registry.fan_out("frame", None);
        assert!(rx_old.try_recv().is_err());
        assert_eq!(rx_new.try_recv().unwrap(), "frame");
    }

    #[tokio::test]
    async fn test_stale_unregister_keeps_successor() {
        let registry = ConnectionRegistry::new();
        let user_id = Uuid::new_v4();
        let (tx_old, _rx_old) = mpsc::unbounded_channel();
        let (tx_new, _rx_new) = mpsc::unbounded_channel();

        let old_generation = registry.register(user_id, tx_old);
        registry.register(user_id, tx_new);

        // Late cleanup from the replaced stream must not evict the new one.
        registry.unregister(user_id, old_generation);
        assert!(registry.is_connected(&user_id));
        assert_eq!(registry.connection_count(), 1);
    }
}
