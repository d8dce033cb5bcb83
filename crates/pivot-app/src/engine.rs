//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the message channel, the sync loop, the shutdown signal,
//! settings and the API client, so both runners only have to feed it
//! messages and read `state`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use pivot_api::EngineApi;
use pivot_core::prelude::*;

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::{AppState, ConnectionState};
use crate::sync::{spawn_sync_loop, SyncHandle};

/// How long shutdown waits for the sync loop to stop
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    generation: u64,
    connection: ConnectionState,
    notifications: u64,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            generation: state.sync.last_generation,
            connection: state.sync.connection.clone(),
            notifications: state.notifications.total(),
        }
    }
}

/// Orchestration engine for the Pivot console.
///
/// Encapsulates everything shared between the TUI and headless runners:
/// - TEA state management
/// - Message channel
/// - Polling sync loop
/// - Shutdown signaling
/// - Settings
/// - Event broadcasting for external consumers
pub struct Engine<A> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, terminal events).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    /// Loaded settings
    pub settings: Settings,

    api: Arc<A>,
    sync: SyncHandle,
    sync_task: Option<JoinHandle<()>>,
    signal_task: Option<JoinHandle<()>>,

    /// Subscribers receive EngineEvents after each message processing cycle.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<A> Engine<A>
where
    A: EngineApi + Send + Sync + 'static,
{
    /// Create the engine and start its background tasks.
    ///
    /// Must be called inside a tokio runtime:
    /// - Creates AppState with settings
    /// - Creates message channel (capacity 256)
    /// - Creates shutdown signal channel
    /// - Spawns signal handler
    /// - Spawns the sync loop (first cycle starts immediately)
    pub fn new(api: Arc<A>, settings: Settings) -> Self {
        let state = AppState::with_settings(settings.clone());
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let signal_task = signals::spawn_signal_handler(msg_tx.clone());
        let (sync, sync_task) = spawn_sync_loop(
            api.clone(),
            msg_tx.clone(),
            settings.sync.interval_ms,
            shutdown_rx.clone(),
        );

        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            settings,
            api,
            sync,
            sync_task: Some(sync_task),
            signal_task: Some(signal_task),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for what changed
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.msg_tx, &self.api, &self.sync);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message; `None` once every sender is gone
    pub async fn recv_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn sync_handle(&self) -> &SyncHandle {
        &self.sync
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Signal background tasks to stop and wait for the sync loop
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);

        if let Some(task) = self.signal_task.take() {
            task.abort();
        }

        if let Some(task) = self.sync_task.take() {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
                Ok(Ok(())) => info!("Sync loop stopped"),
                Ok(Err(e)) => warn!("Sync loop panicked: {}", e),
                Err(_) => warn!("Sync loop shutdown timed out"),
            }
        }
    }

    /// Compare pre/post snapshots and broadcast what changed
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if post.generation != pre.generation {
            let data = &self.state.data;
            self.emit(EngineEvent::SyncApplied {
                generation: post.generation,
                assets: data.assets.len(),
                methodologies: data.methodologies.len(),
                trigger_matches: data.trigger_matches.len(),
                batch_commands: data.batch_commands.len(),
                relationships: data.relationships.len(),
                failed: self
                    .state
                    .sync
                    .failed
                    .iter()
                    .map(|(c, e)| (c.to_string(), e.clone()))
                    .collect(),
            });
        }

        if post.connection != pre.connection {
            self.emit(EngineEvent::ConnectionChanged {
                connection: post.connection.clone(),
            });
        }

        let raised = post.notifications.saturating_sub(pre.notifications) as usize;
        if raised > 0 {
            let items: Vec<_> = self.state.notifications.iter().collect();
            let start = items.len().saturating_sub(raised);
            for notification in &items[start..] {
                self.emit(EngineEvent::Notification {
                    level: notification.level,
                    message: notification.message.clone(),
                });
            }
        }
    }

    /// send() only fails without subscribers, which is fine
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_api::test_utils::{test_asset, FakeEngineApi, FakeFailure};

    fn engine() -> Engine<FakeEngineApi> {
        let api = FakeEngineApi::new().with_assets(vec![test_asset("a1", "host", "web-01")]);
        Engine::new(Arc::new(api), Settings::default())
    }

    /// Process channel messages until `done` holds or time runs out
    async fn pump(engine: &mut Engine<FakeEngineApi>, done: impl Fn(&AppState) -> bool) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while !done(&engine.state) {
            match tokio::time::timeout_at(deadline, engine.recv_message()).await {
                Ok(Some(msg)) => engine.process_message(msg),
                _ => panic!("Condition not reached in time"),
            }
        }
    }

    #[tokio::test]
    async fn test_engine_process_quit_message() {
        let mut engine = engine();
        assert!(!engine.should_quit());
        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_first_sync_populates_state() {
        let mut engine = engine();
        let mut rx = engine.subscribe();

        pump(&mut engine, |s| s.sync.last_generation >= 1).await;
        assert_eq!(engine.state.data.assets.len(), 1);
        assert_eq!(engine.state.sync.connection, ConnectionState::Connected);

        let mut saw_sync = false;
        while let Ok(event) = rx.try_recv() {
            if let EngineEvent::SyncApplied { assets, .. } = event {
                assert_eq!(assets, 1);
                saw_sync = true;
            }
        }
        assert!(saw_sync);
        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_unreachable_engine_raises_one_toast() {
        let api = FakeEngineApi::new();
        for endpoint in [
            "stats",
            "assets",
            "methodologies",
            "trigger_matches",
            "batch_commands",
            "relationships",
        ] {
            api.fail(endpoint, FakeFailure::Transport("connection refused".into()));
        }
        let mut engine = Engine::new(Arc::new(api), Settings::default());
        let mut rx = engine.subscribe();

        pump(&mut engine, |s| s.sync.last_generation >= 1).await;
        engine.sync_handle().request_refresh();
        pump(&mut engine, |s| s.sync.last_generation >= 2).await;

        let mut toasts = 0;
        while let Ok(event) = rx.try_recv() {
            if let EngineEvent::Notification { message, .. } = event {
                assert!(message.contains("connection refused"));
                toasts += 1;
            }
        }
        assert_eq!(toasts, 1);
        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_subscribe_receives_shutdown_event() {
        let mut engine = engine();
        let mut rx = engine.subscribe();

        engine.shutdown().await;

        match tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {
            Ok(Ok(event)) => assert!(matches!(event, EngineEvent::Shutdown)),
            _ => panic!("Should have received shutdown event"),
        }
    }

    #[tokio::test]
    async fn test_engine_drain_empty_channel() {
        let mut engine = engine();
        // Stop the sync loop first so nothing arrives
        engine.shutdown().await;
        while engine.msg_rx.try_recv().is_ok() {}
        assert_eq!(engine.drain_pending_messages(), 0);
    }
}
