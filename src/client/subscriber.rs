//! Realtime Subscriber
//!
//! Consumes the server's push stream and translates events into store
//! refresh actions, scoped to the board being viewed and debounced so a
//! burst (a bulk drag producing several updates) collapses into one
//! refetch.
//!
//! # Connection Lifecycle
//!
//! An explicit state machine published on a watch channel:
//!
//! ```text
//! Connecting -> Open -> Erroring -> (wait) -> Connecting -> ...
//!                                `- shutdown -> Closed
//! ```
//!
//! Any stream termination - connect failure, non-success status, transport
//! error, clean EOF - is treated the same way: close the broken
//! connection, wait the fixed reconnect delay, open a fresh one.
//! Unbounded attempts, no backoff growth. Malformed frames are logged and
//! discarded without touching stream health.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::client::api::KanbanApi;
use crate::client::config::ClientConfig;
use crate::client::debounce::Debouncer;
use crate::client::store::BoardStore;
use crate::shared::{KanbanUpdate, UpdateKind};

/// Quiet period required before a refresh fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Fixed delay between reconnect attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Path of the push stream endpoint.
const EVENTS_PATH: &str = "/api/kanban/events";

/// Connection state of the subscriber, observable via [`KanbanRealtime::watch_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Erroring,
    Closed,
}

/// Reconnect policy: a fixed delay, retried without bound.
///
/// Kept as its own type so the delay is injectable in tests instead of
/// buried in timer plumbing.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    delay: Duration,
}

impl ReconnectPolicy {
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(RECONNECT_DELAY)
    }
}

/// Handle to a running realtime subscription.
///
/// Dropping the handle without calling [`shutdown`] leaves the background
/// task running; owners are expected to shut it down when the board view
/// unmounts.
///
/// [`shutdown`]: KanbanRealtime::shutdown
pub struct KanbanRealtime {
    task: JoinHandle<()>,
    state_tx: Arc<watch::Sender<ConnectionState>>,
    debouncer: Arc<Debouncer>,
}

impl KanbanRealtime {
    /// Open the stream with the standard fixed 5-second reconnect delay.
    pub fn spawn<A>(config: ClientConfig, store: Arc<Mutex<BoardStore<A>>>) -> Self
    where
        A: KanbanApi + 'static,
    {
        Self::with_policy(config, store, ReconnectPolicy::default())
    }

    /// Open the stream with a custom reconnect policy.
    pub fn with_policy<A>(
        config: ClientConfig,
        store: Arc<Mutex<BoardStore<A>>>,
        policy: ReconnectPolicy,
    ) -> Self
    where
        A: KanbanApi + 'static,
    {
        let (state_tx, _) = watch::channel(ConnectionState::Connecting);
        let state_tx = Arc::new(state_tx);
        let debouncer = Arc::new(Debouncer::new());

        let task = tokio::spawn(run_subscription(
            config,
            store,
            policy,
            state_tx.clone(),
            debouncer.clone(),
        ));

        Self {
            task,
            state_tx,
            debouncer,
        }
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    /// Subscribe to connection state changes.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Cancel the pending debounce timer and close the stream. No leaked
    /// timers, no dangling connection.
    pub fn shutdown(self) {
        self.debouncer.cancel();
        self.task.abort();
        self.state_tx.send_replace(ConnectionState::Closed);
        tracing::info!("[Sync] realtime subscription closed");
    }
}

async fn run_subscription<A>(
    config: ClientConfig,
    store: Arc<Mutex<BoardStore<A>>>,
    policy: ReconnectPolicy,
    state: Arc<watch::Sender<ConnectionState>>,
    debouncer: Arc<Debouncer>,
) where
    A: KanbanApi + 'static,
{
    let client = reqwest::Client::new();
    let url = config.api_url(EVENTS_PATH);

    loop {
        state.send_replace(ConnectionState::Connecting);

        let mut request = client.get(&url);
        if let Some(token) = config.token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[Sync] failed to open event stream (will retry): {}", e);
                state.send_replace(ConnectionState::Erroring);
                policy.wait().await;
                continue;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "[Sync] event stream rejected with status {} (will retry)",
                response.status()
            );
            state.send_replace(ConnectionState::Erroring);
            policy.wait().await;
            continue;
        }

        state.send_replace(ConnectionState::Open);
        tracing::info!("[Sync] event stream open");

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        loop {
            match stream.next().await {
                Some(Ok(chunk)) => {
                    let chunk_str = match std::str::from_utf8(&chunk) {
                        Ok(s) => s,
                        Err(e) => {
                            tracing::warn!("[Sync] invalid UTF-8 on event stream: {}", e);
                            break;
                        }
                    };
                    buffer.push_str(chunk_str);

                    while let Some(newline) = buffer.find('\n') {
                        let line = buffer[..newline].trim_end_matches('\r').to_string();
                        buffer.drain(..=newline);

                        // Empty lines separate frames; ':' lines are
                        // keep-alive comments.
                        if line.is_empty() || line.starts_with(':') {
                            continue;
                        }

                        if let Some(data) = line.strip_prefix("data: ") {
                            match serde_json::from_str::<KanbanUpdate>(data) {
                                Ok(update) => handle_update(&store, &debouncer, update).await,
                                Err(e) => {
                                    tracing::warn!("[Sync] discarding malformed event: {}", e)
                                }
                            }
                        }
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!("[Sync] event stream error: {}", e);
                    break;
                }
                None => {
                    tracing::warn!("[Sync] event stream closed by server");
                    break;
                }
            }
        }

        state.send_replace(ConnectionState::Erroring);
        policy.wait().await;
    }
}

/// Filter one parsed event and schedule the matching refresh.
///
/// Events scoped to a board other than the one currently viewed are
/// dropped. Qualifying events reset the single debounce slot; when the
/// window elapses quietly the action refetches the collection the event
/// kind maps to, for the board current at fire time.
pub async fn handle_update<A>(
    store: &Arc<Mutex<BoardStore<A>>>,
    debouncer: &Debouncer,
    update: KanbanUpdate,
) where
    A: KanbanApi + 'static,
{
    if update.kind == UpdateKind::Connected {
        tracing::debug!("[Sync] stream handshake confirmed for {:?}", update.user_id);
        return;
    }

    if let Some(board_id) = update.board_id {
        let current = store.lock().await.current_board_id;
        if current != Some(board_id) {
            return;
        }
    }

    let store = store.clone();
    let kind = update.kind;
    debouncer.schedule(DEBOUNCE_WINDOW, async move {
        let mut store = store.lock().await;
        let Some(board_id) = store.current_board_id else {
            return;
        };
        match kind {
            UpdateKind::TaskCreated | UpdateKind::TaskUpdated | UpdateKind::TaskDeleted => {
                store.load_tasks(board_id).await;
            }
            UpdateKind::ColumnCreated | UpdateKind::ColumnUpdated | UpdateKind::ColumnDeleted => {
                store.load_columns(board_id).await;
            }
            UpdateKind::BoardUpdated => {
                store.load_boards().await;
            }
            UpdateKind::Connected => {}
        }
    });
}
