//! Headless mode runner - main event loop without TUI
//!
//! Feeds the engine's message channel through the update cycle and prints
//! every broadcast EngineEvent as NDJSON.

use tokio::sync::broadcast::{self, error::TryRecvError};

use pivot_api::EngineApi;
use pivot_app::{Engine, EngineEvent};
use pivot_core::prelude::*;

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless<A>(mut engine: Engine<A>) -> Result<()>
where
    A: EngineApi + Send + Sync + 'static,
{
    info!("═══════════════════════════════════════════════════════");
    info!("Pivot console starting in HEADLESS mode");
    info!("Engine API: {}", engine.settings.api.base_url);
    info!("═══════════════════════════════════════════════════════");

    HeadlessEvent::started(
        &engine.settings.api.base_url,
        engine.settings.sync.interval_ms,
    )
    .emit();

    headless_event_loop(&mut engine, |event| event.emit()).await;

    info!("Pivot console headless mode exiting");
    Ok(())
}

/// Process messages until quit, handing every translated event to `sink`.
///
/// Shuts the engine down before returning, so the final `shutdown` event
/// is delivered too.
async fn headless_event_loop<A>(engine: &mut Engine<A>, mut sink: impl FnMut(HeadlessEvent))
where
    A: EngineApi + Send + Sync + 'static,
{
    let mut events = engine.subscribe();

    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.recv_message().await {
            Some(msg) => {
                engine.process_message(msg);
                forward_events(&mut events, &mut sink);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    engine.shutdown().await;
    forward_events(&mut events, &mut sink);
}

fn forward_events(
    events: &mut broadcast::Receiver<EngineEvent>,
    sink: &mut impl FnMut(HeadlessEvent),
) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from_engine_event(&event)
                .into_iter()
                .for_each(&mut *sink),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use pivot_api::test_utils::{test_asset, FakeEngineApi, FakeFailure};
    use pivot_app::config::Settings;
    use pivot_app::Message;

    /// Run the loop, quitting as soon as the first sync summary is seen
    async fn run_until_first_sync(api: FakeEngineApi) -> Vec<HeadlessEvent> {
        let mut engine = Engine::new(Arc::new(api), Settings::default());
        let quit_tx = engine.msg_sender();
        let mut seen = Vec::new();

        let run = headless_event_loop(&mut engine, |event| {
            if matches!(event, HeadlessEvent::SyncCompleted { .. }) {
                let _ = quit_tx.try_send(Message::Quit);
            }
            seen.push(event);
        });
        tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .expect("headless loop did not finish");

        seen
    }

    #[tokio::test]
    async fn test_first_sync_then_shutdown() {
        let api = FakeEngineApi::new().with_assets(vec![test_asset("a1", "host", "web-01")]);
        let seen = run_until_first_sync(api).await;

        let summary = seen
            .iter()
            .find_map(|e| match e {
                HeadlessEvent::SyncCompleted {
                    generation,
                    assets,
                    failed,
                    ..
                } => Some((*generation, *assets, failed.len())),
                _ => None,
            })
            .expect("no sync_completed event");
        assert_eq!(summary, (1, 1, 0));

        assert!(matches!(seen.last(), Some(HeadlessEvent::Shutdown { .. })));
    }

    #[tokio::test]
    async fn test_partial_failure_reports_collection() {
        let api = FakeEngineApi::new();
        api.fail("relationships", FakeFailure::Transport("timed out".into()));
        let seen = run_until_first_sync(api).await;

        let failures: Vec<_> = seen
            .iter()
            .filter_map(|e| match e {
                HeadlessEvent::SyncFailed { collection, .. } => Some(collection.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(failures, vec!["relationships"]);
    }
}
