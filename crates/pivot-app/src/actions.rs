//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every request runs in its own task and reports back through the message
//! channel; failures become [`Message::MutationFailed`] (or
//! [`Message::MethodologyFailed`]) and never reach the caller directly.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use pivot_api::EngineApi;
use pivot_core::prelude::*;
use pivot_core::{AssetDraft, RelationshipDraft, Scenario};

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::sync::SyncHandle;

/// Execute an action, spawning a background task when it needs the network.
///
/// Returns the spawned task, if any.
pub fn handle_action<A>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    api: Arc<A>,
    sync: &SyncHandle,
) -> Option<JoinHandle<()>>
where
    A: EngineApi + Send + Sync + 'static,
{
    match action {
        UpdateAction::RefreshNow => {
            sync.request_refresh();
            None
        }

        UpdateAction::SaveAsset { id, draft } => {
            Some(tokio::spawn(save_asset(api, msg_tx, id, draft)))
        }

        UpdateAction::DeleteAsset { id, name } => {
            Some(tokio::spawn(delete_asset(api, msg_tx, id, name)))
        }

        UpdateAction::CreateRelationship(draft) => {
            Some(tokio::spawn(create_relationship(api, msg_tx, draft)))
        }

        UpdateAction::FetchMethodology { id, token } => {
            Some(tokio::spawn(fetch_methodology(api, msg_tx, id, token)))
        }

        UpdateAction::RunScenario(scenario) => {
            Some(tokio::spawn(run_scenario(api, msg_tx, scenario)))
        }

        UpdateAction::ResetEngine => Some(tokio::spawn(reset_engine(api, msg_tx))),
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if msg_tx.send(message).await.is_err() {
        debug!("Message channel closed, dropping action result");
    }
}

fn failed(context: &str, error: Error) -> Message {
    Message::MutationFailed {
        context: context.to_string(),
        error: error.user_message(),
    }
}

async fn save_asset<A: EngineApi>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    id: Option<String>,
    draft: AssetDraft,
) {
    let created = id.is_none();
    let result = match &id {
        None => api.create_asset(&draft).await,
        Some(id) => api.update_asset(id, &draft).await,
    };

    let message = match result {
        Ok(mutation) => Message::AssetSaved {
            created,
            name: mutation.asset.map(|a| a.name).unwrap_or(draft.name),
            triggered_matches: mutation.triggered_matches,
            generated_commands: mutation.generated_commands,
        },
        Err(e) => failed("Failed to save asset", e),
    };
    send(&msg_tx, message).await;
}

async fn delete_asset<A: EngineApi>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    id: String,
    name: String,
) {
    let message = match api.delete_asset(&id).await {
        Ok(()) => Message::AssetDeleted { name },
        Err(e) => failed("Failed to delete asset", e),
    };
    send(&msg_tx, message).await;
}

async fn create_relationship<A: EngineApi>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    draft: RelationshipDraft,
) {
    let message = match api.create_relationship(&draft).await {
        Ok(relationship) => Message::RelationshipCreated {
            relationship_type: relationship.relationship_type,
        },
        Err(e) => failed("Failed to create relationship", e),
    };
    send(&msg_tx, message).await;
}

async fn fetch_methodology<A: EngineApi>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    id: String,
    token: u64,
) {
    let message = match api.methodology(&id).await {
        Ok(detail) => Message::MethodologyLoaded {
            token,
            detail: Box::new(detail),
        },
        Err(e) => Message::MethodologyFailed {
            token,
            error: e.user_message(),
        },
    };
    send(&msg_tx, message).await;
}

async fn run_scenario<A: EngineApi>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    scenario: Scenario,
) {
    info!("Running demo scenario {}", scenario.slug());
    let message = match api.run_scenario(scenario).await {
        Ok(()) => Message::ScenarioCompleted(scenario),
        Err(e) => failed("Failed to run scenario", e),
    };
    send(&msg_tx, message).await;
}

async fn reset_engine<A: EngineApi>(api: Arc<A>, msg_tx: mpsc::Sender<Message>) {
    info!("Resetting engine");
    let message = match api.reset().await {
        Ok(()) => Message::ResetCompleted,
        Err(e) => failed("Failed to reset engine", e),
    };
    send(&msg_tx, message).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_api::test_utils::{test_asset, FakeEngineApi, FakeFailure};
    use pivot_core::Properties;
    use std::time::Duration;
    use tokio::sync::watch;

    use crate::sync::spawn_sync_loop;

    fn draft(name: &str) -> AssetDraft {
        AssetDraft {
            asset_type: "host".into(),
            name: name.into(),
            properties: Properties::new(),
            confidence: 1.0,
        }
    }

    /// A sync handle whose loop has already exited
    async fn idle_sync_handle() -> SyncHandle {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let (_shutdown_tx, shutdown_rx) = watch::channel(true);
        let (handle, task) =
            spawn_sync_loop(Arc::new(FakeEngineApi::new()), tx, 60_000, shutdown_rx);
        let _ = task.await;
        handle
    }

    async fn run(action: UpdateAction, api: Arc<FakeEngineApi>) -> Message {
        let (tx, mut rx) = mpsc::channel(4);
        let sync = idle_sync_handle().await;
        let task = handle_action(action, tx, api, &sync).expect("spawns a task");
        task.await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_asset_reports_counts() {
        let api = Arc::new(FakeEngineApi::new());
        let message = run(
            UpdateAction::SaveAsset {
                id: None,
                draft: draft("web-01"),
            },
            api.clone(),
        )
        .await;

        match message {
            Message::AssetSaved {
                created,
                name,
                triggered_matches,
                ..
            } => {
                assert!(created);
                assert_eq!(name, "web-01");
                assert_eq!(triggered_matches, 1);
            }
            other => panic!("Expected AssetSaved, got {:?}", other),
        }
        assert_eq!(api.assets_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_surfaces_detail() {
        let api = Arc::new(
            FakeEngineApi::new().with_assets(vec![test_asset("a1", "host", "web-01")]),
        );
        api.fail("create_asset", FakeFailure::api(400, "duplicate name"));

        let message = run(
            UpdateAction::SaveAsset {
                id: None,
                draft: draft("web-01"),
            },
            api.clone(),
        )
        .await;

        match message {
            Message::MutationFailed { context, error } => {
                assert_eq!(context, "Failed to save asset");
                assert_eq!(error, "duplicate name");
            }
            other => panic!("Expected MutationFailed, got {:?}", other),
        }
        assert_eq!(api.assets_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_update_uses_put() {
        let api = Arc::new(FakeEngineApi::new().with_assets(vec![test_asset("a1", "host", "old")]));
        let message = run(
            UpdateAction::SaveAsset {
                id: Some("a1".into()),
                draft: draft("new"),
            },
            api.clone(),
        )
        .await;

        assert!(matches!(message, Message::AssetSaved { created: false, .. }));
        assert_eq!(api.calls(), vec!["update_asset"]);
        assert_eq!(api.assets_snapshot()[0].name, "new");
    }

    #[tokio::test]
    async fn test_self_relationship_makes_no_request() {
        let api = Arc::new(FakeEngineApi::new());
        let message = run(
            UpdateAction::CreateRelationship(RelationshipDraft {
                source_asset_id: "a1".into(),
                target_asset_id: "a1".into(),
                relationship_type: "can_pivot_to".into(),
                properties: Properties::new(),
                confidence: 1.0,
            }),
            api.clone(),
        )
        .await;

        assert!(matches!(message, Message::MutationFailed { .. }));
        assert_eq!(api.call_count("create_relationship"), 0);
    }

    #[tokio::test]
    async fn test_fetch_methodology_failure_keeps_token() {
        let api = Arc::new(FakeEngineApi::new());
        let message = run(
            UpdateAction::FetchMethodology {
                id: "missing".into(),
                token: 9,
            },
            api,
        )
        .await;

        match message {
            Message::MethodologyFailed { token, error } => {
                assert_eq!(token, 9);
                assert!(error.contains("not found"));
            }
            other => panic!("Expected MethodologyFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_spawns_nothing() {
        let (tx, _rx) = mpsc::channel(1);
        let sync = idle_sync_handle().await;
        let api = Arc::new(FakeEngineApi::new());
        assert!(handle_action(UpdateAction::RefreshNow, tx, api, &sync).is_none());
    }
}
