//! Message processing
//!
//! Runs a message through the TEA update function, follows up on any chained
//! messages and dispatches the resulting actions.

use std::sync::Arc;

use tokio::sync::mpsc;

use pivot_api::EngineApi;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;
use crate::sync::SyncHandle;

/// Process a message through the TEA update function
pub fn process_message<A>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    api: &Arc<A>,
    sync: &SyncHandle,
) where
    A: EngineApi + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), api.clone(), sync);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_key::InputKey;
    use crate::sync::spawn_sync_loop;
    use pivot_api::test_utils::FakeEngineApi;
    use std::time::Duration;
    use tokio::sync::watch;

    #[tokio::test]
    async fn test_follow_up_messages_are_processed() {
        let api = Arc::new(FakeEngineApi::new());
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sync, _task) = spawn_sync_loop(api.clone(), tx.clone(), 60_000, shutdown_rx);
        let mut state = AppState::new();

        // Key -> RequestQuit -> quitting, in one call
        process_message(
            &mut state,
            Message::Key(InputKey::Char('q')),
            &tx,
            &api,
            &sync,
        );
        assert!(state.should_quit());

        // The first sync cycle still arrives through the channel
        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(matches!(first, Ok(Some(Message::SyncCompleted(_)))));
    }
}
