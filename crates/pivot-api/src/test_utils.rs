//! Test utilities for engine API consumers
//!
//! Provides an in-memory [`FakeEngineApi`] that records every request it
//! would have sent, plus builders for common wire objects.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use pivot_core::prelude::*;
use pivot_core::{
    Asset, AssetDraft, AssetMutation, BatchCommand, MethodologyDetail, MethodologySummary,
    Properties, Relationship, RelationshipDraft, Scenario, Stats, TriggerMatch,
};

use crate::engine_api::{check_asset, check_relationship, EngineApi};

/// Failure injected into one endpoint of the fake
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Transport(String),
    Api { status: u16, detail: String },
}

impl FakeFailure {
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    fn to_error(&self) -> Error {
        match self {
            FakeFailure::Transport(msg) => Error::transport(msg.clone()),
            FakeFailure::Api { status, detail } => Error::api(*status, detail.clone()),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    stats: Stats,
    assets: Vec<Asset>,
    methodologies: Vec<MethodologySummary>,
    details: HashMap<String, MethodologyDetail>,
    trigger_matches: Vec<TriggerMatch>,
    batch_commands: Vec<BatchCommand>,
    relationships: Vec<Relationship>,
    failures: HashMap<&'static str, FakeFailure>,
    calls: Vec<&'static str>,
    next_id: u32,
}

/// In-memory engine. Endpoint names match the [`EngineApi`] method names.
#[derive(Debug, Default)]
pub struct FakeEngineApi {
    state: Mutex<FakeState>,
    delay: Option<Duration>,
}

impl FakeEngineApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read sleeps for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_assets(self, assets: Vec<Asset>) -> Self {
        self.lock().assets = assets;
        self
    }

    pub fn with_methodologies(self, methodologies: Vec<MethodologySummary>) -> Self {
        self.lock().methodologies = methodologies;
        self
    }

    pub fn with_detail(self, detail: MethodologyDetail) -> Self {
        self.lock().details.insert(detail.id.clone(), detail);
        self
    }

    pub fn with_relationships(self, relationships: Vec<Relationship>) -> Self {
        self.lock().relationships = relationships;
        self
    }

    pub fn with_batch_commands(self, commands: Vec<BatchCommand>) -> Self {
        self.lock().batch_commands = commands;
        self
    }

    pub fn set_assets(&self, assets: Vec<Asset>) {
        self.lock().assets = assets;
    }

    /// Make `endpoint` fail until [`FakeEngineApi::clear_failure`]
    pub fn fail(&self, endpoint: &'static str, failure: FakeFailure) {
        self.lock().failures.insert(endpoint, failure);
    }

    pub fn clear_failure(&self, endpoint: &'static str) {
        self.lock().failures.remove(endpoint);
    }

    /// Requests that reached the fake, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.lock().calls.iter().filter(|c| **c == endpoint).count()
    }

    pub fn assets_snapshot(&self) -> Vec<Asset> {
        self.lock().assets.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a request and return the injected failure, if any
    fn record(&self, endpoint: &'static str) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.lock();
        state.calls.push(endpoint);
        let failure = state.failures.get(endpoint).map(FakeFailure::to_error);
        match failure {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl EngineApi for FakeEngineApi {
    async fn stats(&self) -> Result<Stats> {
        self.pause().await;
        let state = self.record("stats")?;
        let mut stats = state.stats.clone();
        stats.total_assets = state.assets.len() as u32;
        stats.total_methodologies = state.methodologies.len() as u32;
        stats.total_trigger_matches = state.trigger_matches.len() as u32;
        stats.total_batch_commands = state.batch_commands.len() as u32;
        Ok(stats)
    }

    async fn assets(&self) -> Result<Vec<Asset>> {
        self.pause().await;
        Ok(self.record("assets")?.assets.clone())
    }

    async fn methodologies(&self) -> Result<Vec<MethodologySummary>> {
        self.pause().await;
        Ok(self.record("methodologies")?.methodologies.clone())
    }

    async fn methodology(&self, id: &str) -> Result<MethodologyDetail> {
        self.pause().await;
        self.record("methodology")?
            .details
            .get(id)
            .cloned()
            .ok_or_else(|| Error::api(404, format!("Methodology {id} not found")))
    }

    async fn trigger_matches(&self) -> Result<Vec<TriggerMatch>> {
        self.pause().await;
        Ok(self.record("trigger_matches")?.trigger_matches.clone())
    }

    async fn batch_commands(&self) -> Result<Vec<BatchCommand>> {
        self.pause().await;
        Ok(self.record("batch_commands")?.batch_commands.clone())
    }

    async fn relationships(&self) -> Result<Vec<Relationship>> {
        self.pause().await;
        Ok(self.record("relationships")?.relationships.clone())
    }

    async fn create_asset(&self, draft: &AssetDraft) -> Result<AssetMutation> {
        check_asset(draft)?;
        let mut state = self.record("create_asset")?;
        state.next_id += 1;
        let asset = Asset {
            id: format!("fake-{}", state.next_id),
            asset_type: draft.asset_type.clone(),
            name: draft.name.clone(),
            properties: draft.properties.clone(),
            confidence: draft.confidence,
            discovered_at: "2024-01-01T00:00:00".to_string(),
        };
        state.assets.push(asset.clone());
        Ok(AssetMutation {
            asset: Some(asset),
            triggered_matches: 1,
            generated_commands: 0,
        })
    }

    async fn update_asset(&self, id: &str, draft: &AssetDraft) -> Result<AssetMutation> {
        check_asset(draft)?;
        let mut state = self.record("update_asset")?;
        let asset = state
            .assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::api(404, format!("Asset {id} not found")))?;
        asset.name = draft.name.clone();
        asset.properties = draft.properties.clone();
        asset.confidence = draft.confidence;
        Ok(AssetMutation {
            asset: Some(asset.clone()),
            ..Default::default()
        })
    }

    async fn delete_asset(&self, id: &str) -> Result<()> {
        let mut state = self.record("delete_asset")?;
        let before = state.assets.len();
        state.assets.retain(|a| a.id != id);
        if state.assets.len() == before {
            return Err(Error::api(404, format!("Asset {id} not found")));
        }
        Ok(())
    }

    async fn create_relationship(&self, draft: &RelationshipDraft) -> Result<Relationship> {
        check_relationship(draft)?;
        let mut state = self.record("create_relationship")?;
        state.next_id += 1;
        let relationship = Relationship {
            id: format!("rel-{}", state.next_id),
            source_asset_id: draft.source_asset_id.clone(),
            target_asset_id: draft.target_asset_id.clone(),
            relationship_type: draft.relationship_type.clone(),
            properties: draft.properties.clone(),
            confidence: draft.confidence,
        };
        state.relationships.push(relationship.clone());
        Ok(relationship)
    }

    async fn run_scenario(&self, _scenario: Scenario) -> Result<()> {
        self.record("run_scenario").map(|_| ())
    }

    async fn reset(&self) -> Result<()> {
        let mut state = self.record("reset")?;
        state.assets.clear();
        state.relationships.clear();
        state.trigger_matches.clear();
        state.batch_commands.clear();
        Ok(())
    }
}

/// Creates a test asset with empty properties.
pub fn test_asset(id: &str, asset_type: &str, name: &str) -> Asset {
    test_asset_with(id, asset_type, name, Properties::new())
}

/// Creates a test asset with the given properties.
pub fn test_asset_with(id: &str, asset_type: &str, name: &str, properties: Properties) -> Asset {
    Asset {
        id: id.to_string(),
        asset_type: asset_type.to_string(),
        name: name.to_string(),
        properties,
        confidence: 1.0,
        discovered_at: "2024-01-01T00:00:00".to_string(),
    }
}

/// Creates a test methodology summary.
pub fn test_methodology(id: &str, name: &str, category: &str) -> MethodologySummary {
    MethodologySummary {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        category: Some(category.to_string()),
        risk_level: Some("medium".to_string()),
        trigger_count: 1,
        step_count: 2,
        batch_compatible: false,
    }
}

/// Creates a test relationship.
pub fn test_relationship(id: &str, source: &str, target: &str, kind: &str) -> Relationship {
    Relationship {
        id: id.to_string(),
        source_asset_id: source.to_string(),
        target_asset_id: target.to_string(),
        relationship_type: kind.to_string(),
        properties: Properties::new(),
        confidence: 1.0,
    }
}

/// Creates a test batch command.
pub fn test_batch_command(
    id: &str,
    methodology: &str,
    command: &str,
    batched: bool,
) -> BatchCommand {
    BatchCommand {
        id: id.to_string(),
        methodology_id: methodology.to_lowercase().replace(' ', "_"),
        methodology_name: methodology.to_string(),
        command: command.to_string(),
        target_count: 1,
        created_at: "2024-01-01T00:00:00".to_string(),
        batched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_records_calls() {
        let api = FakeEngineApi::new().with_assets(vec![test_asset("a1", "host", "web")]);
        assert_eq!(api.assets().await.unwrap().len(), 1);
        assert_eq!(api.calls(), vec!["assets"]);
    }

    #[tokio::test]
    async fn test_fake_injected_failure() {
        let api = FakeEngineApi::new();
        api.fail("create_asset", FakeFailure::api(400, "duplicate name"));
        let draft = AssetDraft {
            asset_type: "host".into(),
            name: "web".into(),
            properties: Properties::new(),
            confidence: 1.0,
        };
        let err = api.create_asset(&draft).await.unwrap_err();
        assert_eq!(err.user_message(), "duplicate name");
        assert!(api.assets_snapshot().is_empty());

        api.clear_failure("create_asset");
        assert!(api.create_asset(&draft).await.is_ok());
    }

    #[tokio::test]
    async fn test_fake_self_relationship_not_recorded() {
        let api = FakeEngineApi::new();
        let draft = RelationshipDraft {
            source_asset_id: "a1".into(),
            target_asset_id: "a1".into(),
            relationship_type: "contains".into(),
            properties: Properties::new(),
            confidence: 1.0,
        };
        assert!(api.create_relationship(&draft).await.is_err());
        assert_eq!(api.call_count("create_relationship"), 0);
    }
}
